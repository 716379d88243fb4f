use crate::snapshot::Snapshot;

/// Anything that turns a [`Snapshot`] into display output.
///
/// Consumers are read-only: they receive the snapshot published for the
/// current tick and never touch the aggregator.  Implementations live in the
/// `pulse-widgets` crate.
pub trait Consumer: Send + Sync + std::fmt::Debug {
    /// Unique string identifier, e.g. `"value"` or `"table"`.
    fn id(&self) -> &str;

    fn render(&self, snapshot: &Snapshot) -> String;
}
