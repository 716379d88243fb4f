//! pulse — a bounded rolling-history aggregator for live metrics.
//!
//! Run with:  `RUST_LOG=info pulse [path/to/pulse.toml]`

use anyhow::Result;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Structured logging on stderr so stdout carries only rendered snapshots.
    // RUST_LOG controls verbosity (default: info).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("pulse v{} starting", env!("CARGO_PKG_VERSION"));

    let config_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(pulse_config::default_path);

    pulse_runtime::run(config_path).await.map_err(Into::into)
}
