use pulse_core::{Aggregator, Result, Snapshot};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Cloneable handle to one aggregator shared between tasks.
///
/// Every call takes the lock, so ticks from different tasks are serialized
/// and readers only ever receive owned snapshots.
#[derive(Debug, Clone)]
pub struct SharedAggregator {
    inner: Arc<Mutex<Aggregator>>,
}

impl SharedAggregator {
    pub fn new(aggregator: Aggregator) -> Self {
        Self {
            inner: Arc::new(Mutex::new(aggregator)),
        }
    }

    pub fn tick(&self) -> Result<Snapshot> {
        self.lock().tick()
    }

    pub fn peek(&self) -> Snapshot {
        self.lock().peek()
    }

    // History is only written after a value has been generated, so a
    // poisoned lock still guards a consistent buffer.
    fn lock(&self) -> MutexGuard<'_, Aggregator> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
