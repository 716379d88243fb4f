use pulse_core::{Consumer, Snapshot};

/// Placeholder shown before the first reading arrives.
pub const EMPTY: &str = "--";

/// Displays the latest value with its unit, e.g. `71.3 C`.
#[derive(Debug, Clone)]
pub struct LatestValue {
    unit:     String,
    decimals: usize,
}

impl LatestValue {
    pub fn new(unit: impl Into<String>, decimals: usize) -> Self {
        Self {
            unit: unit.into(),
            decimals,
        }
    }
}

impl Consumer for LatestValue {
    fn id(&self) -> &str {
        "value"
    }

    fn render(&self, snapshot: &Snapshot) -> String {
        match &snapshot.latest {
            Some(r) => with_unit(format!("{:.*}", self.decimals, r.value()), &self.unit),
            None => EMPTY.to_string(),
        }
    }
}

/// Displays the timestamp of the latest reading.
#[derive(Debug, Default, Clone)]
pub struct LatestTime;

impl LatestTime {
    pub fn new() -> Self {
        Self
    }
}

impl Consumer for LatestTime {
    fn id(&self) -> &str {
        "time"
    }

    fn render(&self, snapshot: &Snapshot) -> String {
        snapshot
            .latest
            .map(|r| r.timestamp_str())
            .unwrap_or_else(|| EMPTY.to_string())
    }
}

pub(crate) fn with_unit(value: String, unit: &str) -> String {
    if unit.is_empty() {
        value
    } else {
        format!("{value} {unit}")
    }
}
