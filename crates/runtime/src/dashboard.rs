use pulse_config::PulseConfig;
use pulse_core::{Message, PulseError, Result, Snapshot};
use pulse_widgets::{build_all, Panel};
use tracing::{info, warn};

/// Everything the event loop can receive.
#[derive(Debug)]
pub enum Event {
    /// Propagate an aggregator-side message.
    App(Message),
    /// The config watcher re-read the file.
    Config(Result<PulseConfig>),
}

/// What the event loop should do after handling an [`Event`].
#[derive(Debug, PartialEq, Eq)]
pub enum Step {
    /// Write this frame to the output.
    Print(String),
    Idle,
    Exit,
}

/// Display-side state: the active config and the panels built from it.
///
/// Consumers and display settings follow config reloads.  Aggregator and
/// source settings are fixed at launch; a reload that changes them is
/// recorded but only applies after a restart.
#[derive(Debug)]
pub struct Dashboard {
    launched: PulseConfig,
    active:   PulseConfig,
    panels:   Vec<Panel>,
}

impl Dashboard {
    pub fn new(config: PulseConfig) -> Self {
        Self {
            panels:   build_all(&config),
            launched: config.clone(),
            active:   config,
        }
    }

    pub fn handle(&mut self, event: Event) -> Result<Step> {
        match event {
            Event::App(Message::SnapshotPublished(snapshot)) => {
                Ok(Step::Print(self.render(&snapshot)))
            }
            Event::App(Message::TickerStopped) => Err(PulseError::Runtime(
                "snapshot ticker stopped; no further readings".to_string(),
            )),
            Event::App(Message::Shutdown) => {
                info!("Shutting down");
                Ok(Step::Exit)
            }
            Event::Config(Ok(cfg)) => {
                self.apply(cfg);
                Ok(Step::Idle)
            }
            Event::Config(Err(e)) => {
                warn!("Config reload failed: {e}");
                Ok(Step::Idle)
            }
        }
    }

    /// Render every panel against the same snapshot, under a title rule.
    pub fn render(&self, snapshot: &Snapshot) -> String {
        let mut frame = format!("── {} ──", self.active.display.title);
        for panel in &self.panels {
            frame.push('\n');
            frame.push_str(&panel.render(snapshot));
        }
        frame
    }

    pub fn active(&self) -> &PulseConfig {
        &self.active
    }

    /// Whether the active config differs from the running aggregator setup.
    pub fn restart_pending(&self) -> bool {
        self.active.aggregator != self.launched.aggregator
            || self.active.source != self.launched.source
    }

    fn apply(&mut self, cfg: PulseConfig) {
        self.panels = build_all(&cfg);
        self.active = cfg;
        if self.restart_pending() {
            warn!("Aggregator and source changes take effect after a restart");
        }
        info!("Config reloaded ({} consumers)", self.panels.len());
    }
}
