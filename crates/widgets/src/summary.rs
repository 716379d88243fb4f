use crate::value::with_unit;
use pulse_core::{Consumer, Snapshot};

/// One-line min / max / mean over the current window.
#[derive(Debug, Clone)]
pub struct WindowSummary {
    unit:     String,
    decimals: usize,
}

impl WindowSummary {
    pub fn new(unit: impl Into<String>, decimals: usize) -> Self {
        Self {
            unit: unit.into(),
            decimals,
        }
    }
}

impl Consumer for WindowSummary {
    fn id(&self) -> &str {
        "summary"
    }

    fn render(&self, snapshot: &Snapshot) -> String {
        let Some(stats) = snapshot.stats() else {
            return "n=0".to_string();
        };
        let p = self.decimals;
        with_unit(
            format!(
                "n={} min={:.p$} max={:.p$} mean={:.p$}",
                stats.count, stats.min, stats.max, stats.mean
            ),
            &self.unit,
        )
    }
}
