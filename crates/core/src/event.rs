use crate::snapshot::Snapshot;

/// Messages produced by the aggregator side of the runtime event loop.
///
/// Sources:
/// - Ticker task           → `SnapshotPublished`, `TickerStopped`
/// - Signal handler        → `Shutdown`
#[derive(Debug, Clone)]
pub enum Message {
    /// The aggregator appended a reading and published a new snapshot.
    SnapshotPublished(Snapshot),
    /// The ticker exited; no further snapshots will arrive.
    TickerStopped,
    /// Graceful shutdown requested.
    Shutdown,
}
