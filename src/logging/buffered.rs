//! In-memory log sink for inspecting a walk.
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::types::{EntryStatus, Log};

/// A single buffered log message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEntry {
    /// A stage header entry.
    Stage(String),
    /// An informational entry.
    Info(String),
    /// A debug entry.
    Debug(String),
    /// A warning entry.
    Warn(String),
    /// An error entry.
    Error(String),
}

impl LogEntry {
    /// Message text regardless of level.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Stage(msg)
            | Self::Info(msg)
            | Self::Debug(msg)
            | Self::Warn(msg)
            | Self::Error(msg) => msg,
        }
    }
}

/// Implement the display methods of [`Log`] by buffering each message into
/// `self.entries` as the corresponding [`LogEntry`] variant.
macro_rules! buffer_log_methods {
    ($($method:ident => $variant:ident),+ $(,)?) => {
        $(
            fn $method(&self, msg: &str) {
                if let Ok(mut guard) = self.entries.lock() {
                    guard.push(LogEntry::$variant(msg.to_string()));
                }
            }
        )+
    };
}

/// Log sink that keeps every message and entry status in memory.
///
/// Nothing reaches the console; tests inspect the walk through
/// [`entries`](Self::entries) and [`records`](Self::records).
#[derive(Debug, Default)]
pub struct BufferedLog {
    entries: Mutex<Vec<LogEntry>>,
    records: Mutex<Vec<(PathBuf, EntryStatus)>>,
}

impl BufferedLog {
    /// Create an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the buffered messages, in emission order.
    #[must_use]
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().map_or_else(|_| vec![], |g| g.clone())
    }

    /// Snapshot of the recorded entry statuses, in visit order.
    #[must_use]
    pub fn records(&self) -> Vec<(PathBuf, EntryStatus)> {
        self.records.lock().map_or_else(|_| vec![], |g| g.clone())
    }

    /// Paths recorded with `status`, in visit order.
    #[must_use]
    pub fn paths_with(&self, status: EntryStatus) -> Vec<PathBuf> {
        self.records()
            .into_iter()
            .filter(|(_, s)| *s == status)
            .map(|(p, _)| p)
            .collect()
    }

    /// Return `true` if any warning message contains `needle`.
    #[must_use]
    pub fn has_warning(&self, needle: &str) -> bool {
        self.entries()
            .iter()
            .any(|e| matches!(e, LogEntry::Warn(m) if m.contains(needle)))
    }
}

impl Log for BufferedLog {
    buffer_log_methods! {
        stage => Stage,
        info  => Info,
        debug => Debug,
        warn  => Warn,
        error => Error,
    }

    fn record_entry(&self, path: &Path, status: EntryStatus) {
        if let Ok(mut guard) = self.records.lock() {
            guard.push((path.to_path_buf(), status));
        }
    }
}
