use crate::shared::SharedAggregator;
use pulse_core::Snapshot;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, warn};

/// Spawn a background Tokio task that ticks `shared` every `interval` and
/// publishes each new [`Snapshot`] through the returned watch channel.
///
/// The first tick fires immediately.  Failed ticks are logged and publish
/// nothing, so subscribers keep the previous snapshot.  The task stops when
/// every receiver has been dropped.
///
/// # Panics
/// Panics if `interval` is zero.
pub fn spawn_ticker(shared: SharedAggregator, interval: Duration) -> watch::Receiver<Snapshot> {
    let (tx, rx) = watch::channel(shared.peek());

    tokio::spawn(async move {
        let mut ticker = time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            match shared.tick() {
                Ok(snapshot) => {
                    if tx.send(snapshot).is_err() {
                        break; // all receivers dropped
                    }
                }
                Err(e) => {
                    warn!("Tick skipped: {e}");
                    if tx.is_closed() {
                        break;
                    }
                }
            }
        }

        debug!("Ticker stopped");
    });

    rx
}
