use thiserror::Error;

/// Top-level error type used across the entire workspace.
#[derive(Debug, Error)]
pub enum PulseError {
    /// The value source could not produce a reading for this tick.
    #[error("data unavailable: {0}")]
    DataUnavailable(String),

    /// A history buffer must hold at least one reading.
    #[error("history capacity must be at least 1 (got {0})")]
    CapacityMisconfigured(usize),

    #[error("config error: {0}")]
    Config(String),

    #[error("runtime error: {0}")]
    Runtime(String),

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

pub type Result<T, E = PulseError> = std::result::Result<T, E>;
