use pulse_core::{Consumer, Snapshot};

/// Emits the whole snapshot as a single JSON line, for piping into other tools.
#[derive(Debug, Default, Clone)]
pub struct JsonFeed;

impl JsonFeed {
    pub fn new() -> Self {
        Self
    }
}

impl Consumer for JsonFeed {
    fn id(&self) -> &str {
        "json"
    }

    fn render(&self, snapshot: &Snapshot) -> String {
        serde_json::to_string(snapshot).unwrap_or_else(|e| {
            tracing::warn!("Snapshot serialization failed: {e}");
            String::new()
        })
    }
}
