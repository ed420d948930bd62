//! Core logging types: entry status and the [`Log`] trait.
use std::path::Path;

/// Final status of one visited entry, recorded for the run summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntryStatus {
    /// Leaf action completed (file copied, linked, or handed to a command).
    Copied,
    /// Directory created or already present at the destination.
    Directory,
    /// Destination already existed; entry skipped.
    Exists,
    /// Source path matched the ignore pattern; entry skipped.
    Ignored,
    /// Symlink to a directory; not followed.
    Unsupported,
    /// Overwrite failed and the previous destination was put back.
    Restored,
    /// Entry aborted the walk.
    Failed,
}

impl EntryStatus {
    /// Short label used in summaries.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Copied => "copied",
            Self::Directory => "directories",
            Self::Exists => "existing",
            Self::Ignored => "ignored",
            Self::Unsupported => "unsupported",
            Self::Restored => "restored",
            Self::Failed => "failed",
        }
    }
}

/// Observer sink injected into the walk and every action.
///
/// [`Logger`](super::logger::Logger) forwards to `tracing` for console and
/// file output; [`BufferedLog`](super::buffered::BufferedLog) keeps
/// everything in memory so a walk can be inspected without capturing the
/// console.
pub trait Log: Send + Sync {
    /// Log a stage header (major section).
    fn stage(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a debug message (may be suppressed on console).
    fn debug(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
    /// Record the final status of a visited entry.
    fn record_entry(&self, path: &Path, status: EntryStatus);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_distinct() {
        let all = [
            EntryStatus::Copied,
            EntryStatus::Directory,
            EntryStatus::Exists,
            EntryStatus::Ignored,
            EntryStatus::Unsupported,
            EntryStatus::Restored,
            EntryStatus::Failed,
        ];
        let labels: std::collections::HashSet<&str> = all.iter().map(|s| s.label()).collect();
        assert_eq!(labels.len(), all.len());
    }

    #[test]
    fn entry_status_orders_by_declaration() {
        assert!(EntryStatus::Copied < EntryStatus::Failed);
        assert_ne!(EntryStatus::Exists, EntryStatus::Ignored);
    }
}
