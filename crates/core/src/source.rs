use crate::error::Result;
use chrono::{DateTime, Local};

/// Produces one value per tick.
///
/// Implementations live in `pulse-source`.  A failed call must not leave the
/// source half-advanced in a way that produces a corrupt value later; it is
/// reported as [`PulseError::DataUnavailable`](crate::PulseError) and the
/// aggregator skips the tick.
pub trait ValueSource: Send + std::fmt::Debug {
    /// Short identifier used in logs, e.g. `"random"` or `"replay"`.
    fn name(&self) -> &str;

    fn next_value(&mut self) -> Result<f64>;
}

impl<S: ValueSource + ?Sized> ValueSource for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn next_value(&mut self) -> Result<f64> {
        (**self).next_value()
    }
}

/// Wall-clock source for reading timestamps.
pub trait Clock: Send + std::fmt::Debug {
    fn now(&self) -> DateTime<Local>;
}

/// The local system clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}
