pub mod aggregator;
pub mod consumer;
pub mod error;
pub mod event;
pub mod history;
pub mod reading;
pub mod snapshot;
pub mod source;

pub use aggregator::Aggregator;
pub use consumer::Consumer;
pub use error::{PulseError, Result};
pub use event::Message;
pub use history::History;
pub use reading::Reading;
pub use snapshot::{Snapshot, Table, TableRow, WindowStats};
pub use source::{Clock, SystemClock, ValueSource};
