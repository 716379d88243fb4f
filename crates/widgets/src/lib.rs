pub mod json;
pub mod summary;
pub mod table;
pub mod value;

pub use json::JsonFeed;
pub use summary::WindowSummary;
pub use table::ReadingsTable;
pub use value::{LatestTime, LatestValue};

use pulse_config::{ConsumerConfig, DisplayConfig, PulseConfig};
use pulse_core::{Consumer, Snapshot};
use tracing::warn;

/// A consumer plus the heading it is printed under.
#[derive(Debug)]
pub struct Panel {
    pub label:    String,
    pub consumer: Box<dyn Consumer>,
}

impl Panel {
    /// Render the consumer under its label.  Multi-line output starts on
    /// its own line.
    pub fn render(&self, snapshot: &Snapshot) -> String {
        let body = self.consumer.render(snapshot);
        if body.contains('\n') {
            format!("{}\n{body}", self.label)
        } else {
            format!("{}: {body}", self.label)
        }
    }
}

/// Build a single consumer.  Returns `None` for unknown kinds.
pub fn build(config: &ConsumerConfig, display: &DisplayConfig) -> Option<Panel> {
    let unit = display.unit.as_str();
    let decimals = display.decimals;

    let (consumer, default_label): (Box<dyn Consumer>, &str) = match config.kind.as_str() {
        "value"   => (Box::new(LatestValue::new(unit, decimals)), "Current reading"),
        "time"    => (Box::new(LatestTime::new()), "Current date and time"),
        "table"   => (Box::new(ReadingsTable::new(decimals)), "Most recent readings"),
        "summary" => (Box::new(WindowSummary::new(unit, decimals)), "Window summary"),
        "json"    => (Box::new(JsonFeed::new()), "Snapshot"),
        other => {
            warn!("Unknown consumer kind '{other}'; skipping");
            return None;
        }
    };

    Some(Panel {
        label: config.label.clone().unwrap_or_else(|| default_label.to_string()),
        consumer,
    })
}

/// Build every configured consumer in order, skipping unknown kinds.
pub fn build_all(config: &PulseConfig) -> Vec<Panel> {
    config
        .consumers
        .iter()
        .filter_map(|c| build(c, &config.display))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Local, TimeZone};
    use pulse_core::{History, Reading};

    fn snapshot(values: &[f64]) -> Snapshot {
        let base = Local.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let mut h = History::new(values.len().max(1)).unwrap();
        for (i, v) in values.iter().enumerate() {
            h.push(Reading::new(*v, base + Duration::seconds(4 * i as i64)));
        }
        Snapshot::from_history(&h)
    }

    #[test]
    fn latest_value_with_unit() {
        let c = LatestValue::new("C", 1);
        assert_eq!(c.render(&snapshot(&[70.0, 71.26])), "71.3 C");
        assert_eq!(c.render(&snapshot(&[])), "--");
        assert_eq!(LatestValue::new("", 0).render(&snapshot(&[412.0])), "412");
    }

    #[test]
    fn latest_time() {
        assert_eq!(
            LatestTime::new().render(&snapshot(&[1.0, 2.0])),
            "2024-03-01 12:00:04"
        );
        assert_eq!(LatestTime::new().render(&snapshot(&[])), "--");
    }

    #[test]
    fn table_lists_rows_oldest_first() {
        let out = ReadingsTable::new(1).render(&snapshot(&[70.0, 72.5]));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "  #       value  timestamp");
        assert_eq!(lines[1], "  0        70.0  2024-03-01 12:00:00");
        assert_eq!(lines[2], "  1        72.5  2024-03-01 12:00:04");
    }

    #[test]
    fn empty_table_is_header_only() {
        let out = ReadingsTable::new(1).render(&snapshot(&[]));
        assert_eq!(out.lines().count(), 1);
    }

    #[test]
    fn summary_line() {
        let c = WindowSummary::new("C", 1);
        assert_eq!(
            c.render(&snapshot(&[10.0, 20.0, 30.0])),
            "n=3 min=10.0 max=30.0 mean=20.0 C"
        );
        assert_eq!(c.render(&snapshot(&[])), "n=0");
    }

    #[test]
    fn json_feed_contains_latest() {
        let out = JsonFeed::new().render(&snapshot(&[71.3]));
        assert!(out.starts_with('{'));
        assert!(out.contains(r#""latest":{"value":71.3,"timestamp":"2024-03-01 12:00:00"}"#));
        assert!(!out.contains('\n'));
    }

    #[test]
    fn build_skips_unknown_kinds() {
        let mut config = PulseConfig::default();
        config.consumers.push(ConsumerConfig::new("chart"));
        let panels = build_all(&config);
        let ids: Vec<&str> = panels.iter().map(|p| p.consumer.id()).collect();
        assert_eq!(ids, vec!["value", "time", "table"]);
    }

    #[test]
    fn panel_label_placement() {
        let display = DisplayConfig::default();
        let mut cfg = ConsumerConfig::new("value");
        cfg.label = Some("Current Temperature".into());
        let panel = build(&cfg, &display).unwrap();
        assert_eq!(panel.render(&snapshot(&[71.3])), "Current Temperature: 71.3 C");

        let table = build(&ConsumerConfig::new("table"), &display).unwrap();
        assert!(table.render(&snapshot(&[71.3])).starts_with("Most recent readings\n"));
    }
}
