use chrono::{DateTime, Local, SubsecRound};
use serde::{Serialize, Serializer};
use std::fmt;

/// Display pattern for reading timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One timestamped observation, produced once per tick and never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Reading {
    value: f64,
    #[serde(serialize_with = "serialize_timestamp")]
    timestamp: DateTime<Local>,
}

impl Reading {
    /// Build a reading; the timestamp is truncated to whole seconds.
    pub fn new(value: f64, timestamp: DateTime<Local>) -> Self {
        Self {
            value,
            timestamp: timestamp.trunc_subsecs(0),
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    /// Timestamp rendered with [`TIMESTAMP_FORMAT`].
    pub fn timestamp_str(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.value, self.timestamp_str())
    }
}

fn serialize_timestamp<S>(ts: &DateTime<Local>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&ts.format(TIMESTAMP_FORMAT))
}
