use crate::schema::PulseConfig;
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use pulse_core::Result;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Burst window: one save usually produces several filesystem events.
const SETTLE: Duration = Duration::from_millis(100);

/// Watches a config file and delivers a freshly parsed config after every save.
///
/// The parent directory is watched rather than the file itself, so editors
/// that save by renaming a temp file over the original keep triggering
/// reloads.  Parse failures are delivered as `Err` so the caller can keep
/// its current config.
///
/// # Example
/// ```no_run
/// # async fn demo() {
/// let (_, mut rx) = pulse_config::ConfigWatcher::spawn("/home/user/.config/pulse/pulse.toml");
/// while let Some(result) = rx.recv().await {
///     match result {
///         Ok(cfg) => println!("capacity is now {}", cfg.aggregator.capacity),
///         Err(e)  => eprintln!("ignoring bad config: {e}"),
///     }
/// }
/// # }
/// ```
pub struct ConfigWatcher {
    path: PathBuf,
}

impl ConfigWatcher {
    /// Start watching `path`.  The watch is registered before this returns,
    /// so any later write is observed.  If it cannot be registered the
    /// receiver closes immediately.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn spawn(path: impl AsRef<Path>) -> (Self, mpsc::Receiver<Result<PulseConfig>>) {
        let (tx, rx) = mpsc::channel(1);
        let path = path.as_ref().to_path_buf();
        let handle = Self { path: path.clone() };

        let Some(file_name) = path.file_name().map(OsString::from) else {
            warn!("Not watching '{}': no file name", path.display());
            return (handle, rx);
        };
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let (event_tx, event_rx) = mpsc::unbounded_channel::<notify::Result<Event>>();
        let watcher = RecommendedWatcher::new(
            move |res| {
                let _ = event_tx.send(res);
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        );
        let mut watcher = match watcher {
            Ok(w) => w,
            Err(e) => {
                error!("Failed to create filesystem watcher: {e}");
                return (handle, rx);
            }
        };

        if let Err(e) = watcher.watch(&dir, RecursiveMode::NonRecursive) {
            warn!("Not watching '{}': {e}", dir.display());
            return (handle, rx);
        }
        info!("Watching config file: {}", path.display());

        tokio::spawn(reload_loop(watcher, event_rx, path, file_name, tx));

        (handle, rx)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Owns `_watcher` so the OS watch lives as long as the loop.
async fn reload_loop(
    _watcher: RecommendedWatcher,
    mut events: mpsc::UnboundedReceiver<notify::Result<Event>>,
    path: PathBuf,
    file_name: OsString,
    tx: mpsc::Sender<Result<PulseConfig>>,
) {
    loop {
        let event = tokio::select! {
            event = events.recv() => event,
            _ = tx.closed() => break,
        };
        let Some(event) = event else { break };

        if !touches(&event, &file_name) {
            continue;
        }

        // Let the rest of the save land, then parse once for the whole burst.
        tokio::time::sleep(SETTLE).await;
        while events.try_recv().is_ok() {}

        if !path.exists() {
            debug!("'{}' removed; waiting for it to reappear", path.display());
            continue;
        }
        if tx.send(crate::load(&path)).await.is_err() {
            break;
        }
    }
}

/// Whether a raw event is a content change of the watched file.
fn touches(event: &notify::Result<Event>, file_name: &OsString) -> bool {
    match event {
        Ok(e) => {
            matches!(e.kind, EventKind::Modify(_) | EventKind::Create(_))
                && e.paths.iter().any(|p| p.file_name() == Some(file_name.as_os_str()))
        }
        Err(e) => {
            warn!("Watcher error: {e}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_core::PulseError;

    async fn wait_for(
        rx: &mut mpsc::Receiver<Result<PulseConfig>>,
        accept: impl Fn(&Result<PulseConfig>) -> bool,
    ) {
        let deadline = tokio::time::Instant::now() + Duration::from_secs(10);
        loop {
            let next = tokio::time::timeout_at(deadline, rx.recv())
                .await
                .expect("no matching reload before deadline")
                .expect("watcher closed");
            if accept(&next) {
                return;
            }
        }
    }

    fn capacity_is(n: usize) -> impl Fn(&Result<PulseConfig>) -> bool {
        move |r| matches!(r, Ok(cfg) if cfg.aggregator.capacity == n)
    }

    #[tokio::test]
    async fn reloads_after_rename_save_and_later_writes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pulse.toml");
        std::fs::write(&path, "[aggregator]\ncapacity = 2\n").unwrap();

        let (watcher, mut rx) = ConfigWatcher::spawn(&path);
        assert_eq!(watcher.path(), path.as_path());

        // Atomic save: write a sibling, rename it over the config.
        let tmp = dir.path().join(".pulse.toml.swp");
        std::fs::write(&tmp, "[aggregator]\ncapacity = 3\n").unwrap();
        std::fs::rename(&tmp, &path).unwrap();
        wait_for(&mut rx, capacity_is(3)).await;

        // The watch must survive the rename.
        std::fs::write(&path, "[aggregator]\ncapacity = 5\n").unwrap();
        wait_for(&mut rx, capacity_is(5)).await;

        std::fs::write(&path, "[aggregator\n").unwrap();
        wait_for(&mut rx, |r| matches!(r, Err(PulseError::Config(_)))).await;
    }

    #[tokio::test]
    async fn other_files_in_directory_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pulse.toml");
        std::fs::write(&path, "").unwrap();

        let (_watcher, mut rx) = ConfigWatcher::spawn(&path);
        std::fs::write(dir.path().join("notes.txt"), "hello").unwrap();

        let next = tokio::time::timeout(Duration::from_millis(500), rx.recv()).await;
        assert!(next.is_err(), "unrelated file triggered a reload");
    }

    #[tokio::test]
    async fn missing_directory_closes_channel() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent").join("pulse.toml");
        let (_watcher, mut rx) = ConfigWatcher::spawn(&path);

        let next = tokio::time::timeout(Duration::from_secs(5), rx.recv()).await;
        assert!(matches!(next, Ok(None)));
    }
}
