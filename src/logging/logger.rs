//! Structured logger with summary collection.
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::types::{EntryStatus, Log};

/// Implement the display methods of [`Log`] by delegating to inherent methods
/// of the same name on the implementing type.
///
/// The `record_entry` method is **not** included because its signature differs
/// from the `fn(&self, &str)` pattern shared by the display methods.
macro_rules! forward_log_methods {
    ($($method:ident),+ $(,)?) => {
        $(
            fn $method(&self, msg: &str) {
                self.$method(msg);
            }
        )+
    };
}

/// Structured logger that forwards to `tracing` and tallies entry statuses.
///
/// Console and file output are configured once by
/// [`init_subscriber`](super::subscriber::init_subscriber); this type only
/// emits events and keeps the counters for [`print_summary`](Self::print_summary).
#[derive(Debug, Default)]
pub struct Logger {
    counts: Mutex<BTreeMap<EntryStatus, u64>>,
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Create a new logger.
    ///
    /// `log_file` is only shown in the summary; the file itself is written
    /// by the subscriber's file layer.
    #[must_use]
    pub fn new(log_file: Option<PathBuf>) -> Self {
        Self {
            counts: Mutex::new(BTreeMap::new()),
            log_file,
        }
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Log a stage header (major section).
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: "baku::stage", "{msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a debug message (suppressed on console unless verbose).
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// Record the final status of a visited entry.
    pub fn record_entry(&self, path: &Path, status: EntryStatus) {
        tracing::trace!(path = %path.display(), status = status.label(), "entry");
        if let Ok(mut guard) = self.counts.lock() {
            *guard.entry(status).or_insert(0) += 1;
        }
    }

    /// Number of entries recorded with `status`.
    #[must_use]
    pub fn count(&self, status: EntryStatus) -> u64 {
        self.counts
            .lock()
            .map_or(0, |guard| guard.get(&status).copied().unwrap_or(0))
    }

    /// Total number of recorded entries.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts
            .lock()
            .map_or(0, |guard| guard.values().sum())
    }

    /// Print the summary of all recorded entries.
    pub fn print_summary(&self) {
        let counts = match self.counts.lock() {
            Ok(guard) => guard.clone(),
            Err(_) => return,
        };
        if counts.is_empty() {
            return;
        }

        self.stage("Summary");
        let total = self.total();
        let parts: Vec<String> = counts
            .iter()
            .map(|(status, n)| format!("{n} {}", status.label()))
            .collect();
        self.info(&format!("{total} entries: {}", parts.join(", ")));

        if let Some(path) = &self.log_file {
            self.info(&format!("\x1b[2mlog: {}\x1b[0m", path.display()));
        }
    }
}

impl Log for Logger {
    forward_log_methods!(stage, info, debug, warn, error);

    fn record_entry(&self, path: &Path, status: EntryStatus) {
        self.record_entry(path, status);
    }
}
