use crate::{
    error::{PulseError, Result},
    reading::Reading,
};
use std::collections::VecDeque;

/// Bounded FIFO of recent readings, oldest first.
#[derive(Debug, Clone, PartialEq)]
pub struct History {
    readings: VecDeque<Reading>,
    capacity: usize,
}

impl History {
    /// Create an empty history holding at most `capacity` readings.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(PulseError::CapacityMisconfigured(capacity));
        }
        Ok(Self {
            readings: VecDeque::with_capacity(capacity),
            capacity,
        })
    }

    /// Push a new reading, evicting the oldest if at capacity.
    /// Returns the evicted reading, if any.
    pub fn push(&mut self, reading: Reading) -> Option<Reading> {
        let evicted = if self.readings.len() == self.capacity {
            self.readings.pop_front()
        } else {
            None
        };
        self.readings.push_back(reading);
        evicted
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.readings.len() == self.capacity
    }

    /// Most recently pushed reading.
    pub fn latest(&self) -> Option<&Reading> {
        self.readings.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Reading> {
        self.readings.iter()
    }

    /// Owned copy of the readings, oldest first.
    pub fn to_vec(&self) -> Vec<Reading> {
        self.readings.iter().copied().collect()
    }
}
