//! Logging infrastructure: the injected [`Log`] sink and its backends.

mod buffered;
mod logger;
mod subscriber;
mod types;
mod utils;

pub use buffered::{BufferedLog, LogEntry};
pub use logger::Logger;
pub use subscriber::init_subscriber;
pub use types::{EntryStatus, Log};
