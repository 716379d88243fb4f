use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure parsed from `pulse.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PulseConfig {
    /// History size and tick cadence.
    pub aggregator: AggregatorConfig,
    /// Where readings come from.
    pub source: SourceConfig,
    /// Labels shared by every consumer.
    pub display: DisplayConfig,
    /// Consumers rendered on every published snapshot, in order.
    pub consumers: Vec<ConsumerConfig>,
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self {
            aggregator: AggregatorConfig::default(),
            source:     SourceConfig::default(),
            display:    DisplayConfig::default(),
            consumers:  vec![
                ConsumerConfig::new("value"),
                ConsumerConfig::new("time"),
                ConsumerConfig::new("table"),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregatorConfig {
    /// Number of readings kept in the history window.
    pub capacity: usize,
    /// Seconds between ticks.
    pub tick_interval_secs: u64,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            capacity:           7,
            tick_interval_secs: 4,
        }
    }
}

/// Value source selection.  `kind` picks the variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SourceConfig {
    /// Uniform random values in `[min, max]`.
    Random {
        #[serde(default = "default_min")]
        min: f64,
        #[serde(default = "default_max")]
        max: f64,
        /// Decimal places kept after rounding.
        #[serde(default = "default_precision")]
        precision: u32,
        /// Fixed RNG seed for reproducible runs; drawn from the OS when unset.
        #[serde(default)]
        seed: Option<u64>,
    },
    /// Recorded values replayed row by row from a text file.
    Replay {
        path: PathBuf,
        #[serde(default)]
        skip_header: bool,
        /// Restart from the first row once every row has been used.
        #[serde(default)]
        wrap: bool,
    },
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self::Random {
            min:       default_min(),
            max:       default_max(),
            precision: default_precision(),
            seed:      None,
        }
    }
}

fn default_min() -> f64 {
    67.0
}

fn default_max() -> f64 {
    76.0
}

fn default_precision() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Heading printed above each rendered snapshot.
    pub title: String,
    /// Unit suffix for values, e.g. `"C"`.
    pub unit: String,
    /// Decimal places used when printing values.
    pub decimals: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            title: "Memphis Metro: Live Weather Data".to_string(),
            unit:  "C".to_string(),
            decimals: 1,
        }
    }
}

/// Config block for a single consumer instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsumerConfig {
    /// Consumer type identifier, e.g. `"value"`, `"table"`, `"json"`.
    pub kind: String,
    /// Optional label printed before the rendered output.
    #[serde(default)]
    pub label: Option<String>,
}

impl ConsumerConfig {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            label: None,
        }
    }
}
