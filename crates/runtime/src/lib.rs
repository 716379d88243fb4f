//! Headless runtime for `pulse`.
//!
//! Owns the event loop and wires together all background tasks:
//! - Ticker (drives the aggregator, publishes snapshots)
//! - Config file watcher (live reload on change)
//! - Ctrl-C handler (graceful shutdown)

pub mod dashboard;
pub mod shared;
pub mod ticker;

pub use dashboard::{Dashboard, Event, Step};
pub use shared::SharedAggregator;
pub use ticker::spawn_ticker;

use pulse_config::{ConfigWatcher, PulseConfig};
use pulse_core::{Aggregator, Message, PulseError, Result, Snapshot};
use pulse_source::build_source;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tracing::{info, warn};

// ── Entry point ───────────────────────────────────────────────────────────────

/// Load `config_path`, start the aggregator, and print every published
/// snapshot to stdout until Ctrl-C.
///
/// Returns an error if the ticker dies, since nothing would be printed after.
pub async fn run(config_path: PathBuf) -> Result<()> {
    let config   = pulse_config::load(&config_path)?;
    let interval = tick_interval(&config)?;
    let source   = build_source(&config.source)?;
    let shared   = SharedAggregator::new(Aggregator::new(config.aggregator.capacity, source)?);

    info!(
        capacity = config.aggregator.capacity,
        interval_secs = config.aggregator.tick_interval_secs,
        "Aggregator ready"
    );

    let (tx, mut rx) = mpsc::channel::<Event>(8);
    tokio::spawn(snapshot_stream(spawn_ticker(shared, interval), tx.clone()));
    tokio::spawn(config_stream(config_path, tx.clone()));
    tokio::spawn(shutdown_signal(tx));

    let mut dashboard = Dashboard::new(config);
    let mut stdout = std::io::stdout();

    while let Some(event) = rx.recv().await {
        match dashboard.handle(event)? {
            Step::Print(frame) => {
                writeln!(stdout, "{frame}")?;
                stdout.flush()?;
            }
            Step::Idle => {}
            Step::Exit => break,
        }
    }

    Ok(())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Tick cadence from config; zero is rejected.
pub fn tick_interval(config: &PulseConfig) -> Result<Duration> {
    match config.aggregator.tick_interval_secs {
        0 => Err(PulseError::Config(
            "aggregator.tick_interval_secs must be at least 1".to_string(),
        )),
        secs => Ok(Duration::from_secs(secs)),
    }
}

// ── Background tasks ──────────────────────────────────────────────────────────

/// Forwards every published snapshot onto the event loop, then reports
/// `TickerStopped` once the ticker's sender is gone.
async fn snapshot_stream(mut rx: watch::Receiver<Snapshot>, tx: mpsc::Sender<Event>) {
    while rx.changed().await.is_ok() {
        let snapshot = rx.borrow_and_update().clone();
        if tx.send(Event::App(Message::SnapshotPublished(snapshot))).await.is_err() {
            return;
        }
    }
    let _ = tx.send(Event::App(Message::TickerStopped)).await;
}

/// Forwards each re-parsed config from the watcher.
async fn config_stream(path: PathBuf, tx: mpsc::Sender<Event>) {
    let (_watcher, mut rx) = ConfigWatcher::spawn(path);

    while let Some(result) = rx.recv().await {
        if tx.send(Event::Config(result)).await.is_err() {
            break;
        }
    }
}

async fn shutdown_signal(tx: mpsc::Sender<Event>) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            let _ = tx.send(Event::App(Message::Shutdown)).await;
        }
        Err(e) => warn!("Cannot listen for Ctrl-C: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_core::{Reading, ValueSource};
    use std::collections::VecDeque;

    #[derive(Debug)]
    struct Scripted(VecDeque<Option<f64>>);

    impl ValueSource for Scripted {
        fn name(&self) -> &str {
            "scripted"
        }

        fn next_value(&mut self) -> Result<f64> {
            self.0
                .pop_front()
                .flatten()
                .ok_or_else(|| PulseError::DataUnavailable("scripted gap".into()))
        }
    }

    fn shared(capacity: usize, values: &[Option<f64>]) -> SharedAggregator {
        let source: Box<dyn ValueSource> = Box::new(Scripted(values.iter().copied().collect()));
        SharedAggregator::new(Aggregator::new(capacity, source).unwrap())
    }

    fn values(snapshot: &Snapshot) -> Vec<f64> {
        snapshot.history.iter().map(Reading::value).collect()
    }

    async fn next(rx: &mut watch::Receiver<Snapshot>) -> Snapshot {
        tokio::time::timeout(Duration::from_secs(5), rx.changed())
            .await
            .expect("ticker stalled")
            .expect("ticker exited");
        rx.borrow_and_update().clone()
    }

    #[tokio::test]
    async fn ticker_publishes_each_snapshot() {
        let agg = shared(2, &[Some(1.0), Some(2.0), Some(3.0)]);
        let mut rx = spawn_ticker(agg.clone(), Duration::from_millis(10));

        assert_eq!(values(&next(&mut rx).await), vec![1.0]);
        assert_eq!(values(&next(&mut rx).await), vec![1.0, 2.0]);
        let last = next(&mut rx).await;
        assert_eq!(values(&last), vec![2.0, 3.0]);
        assert_eq!(agg.peek(), last);
    }

    #[tokio::test]
    async fn failed_tick_publishes_nothing() {
        let agg = shared(5, &[Some(1.0), None, Some(3.0)]);
        let mut rx = spawn_ticker(agg.clone(), Duration::from_millis(10));

        assert_eq!(values(&next(&mut rx).await), vec![1.0]);
        assert_eq!(values(&next(&mut rx).await), vec![1.0, 3.0]);

        // Source is now exhausted; the published snapshot must stay put.
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!rx.has_changed().unwrap());
        assert_eq!(values(&agg.peek()), vec![1.0, 3.0]);
    }

    #[test]
    fn zero_interval_rejected() {
        let mut cfg = PulseConfig::default();
        cfg.aggregator.tick_interval_secs = 0;
        assert!(matches!(tick_interval(&cfg), Err(PulseError::Config(_))));

        cfg.aggregator.tick_interval_secs = 4;
        assert_eq!(tick_interval(&cfg).unwrap(), Duration::from_secs(4));
    }

    #[derive(Debug)]
    struct Faulty;

    impl ValueSource for Faulty {
        fn name(&self) -> &str {
            "faulty"
        }

        fn next_value(&mut self) -> Result<f64> {
            panic!("sensor fault");
        }
    }

    async fn next_event(rx: &mut mpsc::Receiver<Event>) -> Event {
        tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("no event")
            .expect("event channel closed")
    }

    #[tokio::test]
    async fn snapshot_stream_reports_closed_ticker() {
        let (snap_tx, snap_rx) = watch::channel(shared(1, &[]).peek());
        let (tx, mut rx) = mpsc::channel(4);
        tokio::spawn(snapshot_stream(snap_rx, tx));

        drop(snap_tx);
        assert!(matches!(next_event(&mut rx).await, Event::App(Message::TickerStopped)));
    }

    #[tokio::test]
    async fn panicking_source_stops_the_event_loop() {
        let source: Box<dyn ValueSource> = Box::new(Faulty);
        let agg = SharedAggregator::new(Aggregator::new(3, source).unwrap());
        let (tx, mut rx) = mpsc::channel(4);
        tokio::spawn(snapshot_stream(
            spawn_ticker(agg.clone(), Duration::from_millis(10)),
            tx,
        ));

        let event = next_event(&mut rx).await;
        let mut dashboard = Dashboard::new(PulseConfig::default());
        assert!(matches!(dashboard.handle(event), Err(PulseError::Runtime(_))));
        assert!(agg.peek().is_empty());
    }

    #[test]
    fn concurrent_ticks_never_exceed_capacity() {
        let agg = shared(3, &[Some(1.0); 40]);
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let agg = agg.clone();
                std::thread::spawn(move || {
                    for _ in 0..10 {
                        let snap = agg.tick().unwrap();
                        assert!(snap.history.len() <= 3);
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(agg.peek().history.len(), 3);
    }
}
