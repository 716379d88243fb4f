use crate::{history::History, reading::Reading};
use serde::Serialize;

/// Column names of the tabular projection, in row order.
pub const TABLE_COLUMNS: [&str; 2] = ["value", "timestamp"];

/// A consistent, owned view of the history at one point in time.
///
/// Consumers receive snapshots by value, so nothing they do can race with
/// the next tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    /// Readings oldest first.
    pub history: Vec<Reading>,
    /// Row-per-reading projection of `history`.
    pub table: Table,
    /// Most recent reading, `None` only when `history` is empty.
    pub latest: Option<Reading>,
}

impl Snapshot {
    pub fn from_history(history: &History) -> Self {
        let readings = history.to_vec();
        Self {
            table: Table::project(&readings),
            latest: readings.last().copied(),
            history: readings,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Summary statistics over the snapshot window.
    pub fn stats(&self) -> Option<WindowStats> {
        WindowStats::compute(self.history.iter().map(Reading::value))
    }
}

/// Tabular projection of a history: one row per reading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub columns: [&'static str; 2],
    pub rows: Vec<TableRow>,
}

impl Table {
    fn project(readings: &[Reading]) -> Self {
        Self {
            columns: TABLE_COLUMNS,
            rows: readings
                .iter()
                .enumerate()
                .map(|(index, r)| TableRow {
                    index,
                    value: r.value(),
                    timestamp: r.timestamp_str(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    /// Position in the history, 0 = oldest.
    pub index: usize,
    pub value: f64,
    pub timestamp: String,
}

/// Count, min, max and mean over a window of values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WindowStats {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl WindowStats {
    pub fn compute(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;

        for v in values {
            count += 1;
            sum += v;
            min = min.min(v);
            max = max.max(v);
        }

        if count == 0 {
            return None;
        }
        Some(Self {
            count,
            min,
            max,
            mean: sum / count as f64,
        })
    }
}
