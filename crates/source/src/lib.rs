//! Value sources that feed the aggregator one reading per tick.

pub mod random;
pub mod replay;

pub use random::RandomSource;
pub use replay::ReplaySource;

use pulse_config::SourceConfig;
use pulse_core::{Result, ValueSource};

/// Build the value source described by `config`.
pub fn build_source(config: &SourceConfig) -> Result<Box<dyn ValueSource>> {
    let source: Box<dyn ValueSource> = match config {
        SourceConfig::Random { min, max, precision, seed: None } => {
            Box::new(RandomSource::new(*min, *max, *precision)?)
        }
        SourceConfig::Random { min, max, precision, seed: Some(seed) } => {
            Box::new(RandomSource::seeded(*min, *max, *precision, *seed)?)
        }
        SourceConfig::Replay { path, skip_header, wrap } => {
            Box::new(ReplaySource::load(path, *skip_header, *wrap)?)
        }
    };
    tracing::info!("Using '{}' value source", source.name());
    Ok(source)
}
