use pulse_core::{PulseError, Result, ValueSource};
use std::path::Path;

/// Replays recorded values one row per tick, in file order.
///
/// The row index advances on every call, including calls that fail to parse,
/// so a malformed row costs exactly one tick and is never retried.
#[derive(Debug, Clone)]
pub struct ReplaySource {
    rows:   Vec<String>,
    cursor: usize,
    wrap:   bool,
}

impl ReplaySource {
    pub fn new(rows: Vec<String>, wrap: bool) -> Self {
        Self { rows, cursor: 0, wrap }
    }

    /// Load one value per line from a plain text file.
    ///
    /// Trailing blank lines are dropped; blank lines elsewhere are kept and
    /// surface as unavailable data when their turn comes.
    pub fn load(path: impl AsRef<Path>, skip_header: bool, wrap: bool) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;

        let mut rows: Vec<String> = raw
            .lines()
            .skip(usize::from(skip_header))
            .map(|l| l.trim().to_string())
            .collect();
        while rows.last().is_some_and(|r| r.is_empty()) {
            rows.pop();
        }

        tracing::info!("Loaded {} replay rows from '{}'", rows.len(), path.display());
        Ok(Self::new(rows, wrap))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of the row the next call will read.
    pub fn position(&self) -> usize {
        self.cursor
    }
}

impl ValueSource for ReplaySource {
    fn name(&self) -> &str {
        "replay"
    }

    fn next_value(&mut self) -> Result<f64> {
        if self.cursor >= self.rows.len() {
            if !self.wrap || self.rows.is_empty() {
                return Err(PulseError::DataUnavailable(format!(
                    "replay exhausted after {} rows",
                    self.rows.len()
                )));
            }
            self.cursor = 0;
        }

        let index = self.cursor;
        self.cursor += 1;

        let cell = &self.rows[index];
        cell.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| {
                PulseError::DataUnavailable(format!("row {index}: '{cell}' is not a number"))
            })
    }
}
