use crate::{
    error::{PulseError, Result},
    history::History,
    reading::Reading,
    snapshot::Snapshot,
    source::{Clock, SystemClock, ValueSource},
};
use tracing::{debug, trace};

/// Owns a bounded history and appends one reading per [`tick`](Self::tick).
///
/// The history is only ever mutated inside `tick`; every accessor hands out
/// an owned [`Snapshot`], so callers on other threads must serialize ticks
/// themselves (see `pulse-runtime::SharedAggregator`).
#[derive(Debug)]
pub struct Aggregator<S = Box<dyn ValueSource>, C = SystemClock> {
    history: History,
    source: S,
    clock: C,
}

impl<S: ValueSource> Aggregator<S> {
    /// Create an aggregator stamped by the system clock.
    pub fn new(capacity: usize, source: S) -> Result<Self> {
        Self::with_clock(capacity, source, SystemClock)
    }
}

impl<S: ValueSource, C: Clock> Aggregator<S, C> {
    pub fn with_clock(capacity: usize, source: S, clock: C) -> Result<Self> {
        Ok(Self {
            history: History::new(capacity)?,
            source,
            clock,
        })
    }

    /// Generate one reading, append it, and return the updated snapshot.
    ///
    /// On failure nothing is appended and the previous snapshot stays valid.
    pub fn tick(&mut self) -> Result<Snapshot> {
        let value = self.source.next_value().map_err(|e| match e {
            PulseError::DataUnavailable(_) => e,
            other => PulseError::DataUnavailable(other.to_string()),
        })?;

        if !value.is_finite() {
            return Err(PulseError::DataUnavailable(format!(
                "{} produced a non-finite value ({value})",
                self.source.name()
            )));
        }

        // Timestamps never go backwards, even if the wall clock does.
        let now = self.clock.now();
        let stamp = match self.history.latest() {
            Some(last) if now < last.timestamp() => last.timestamp(),
            _ => now,
        };

        let reading = Reading::new(value, stamp);
        if let Some(evicted) = self.history.push(reading) {
            trace!("evicted {evicted}");
        }
        debug!(source = self.source.name(), "appended {reading}");

        Ok(Snapshot::from_history(&self.history))
    }

    /// Snapshot of the current history without generating a reading.
    pub fn peek(&self) -> Snapshot {
        Snapshot::from_history(&self.history)
    }

    pub fn capacity(&self) -> usize {
        self.history.capacity()
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}
