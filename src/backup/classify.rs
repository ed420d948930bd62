//! Entry classification and destination directory bookkeeping.
use std::fs;
use std::path::Path;

use super::entry::{Entry, Outcome};
use crate::error::FatalError;
use crate::logging::Log;

/// How an entry must be handled once directory bookkeeping is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handling {
    /// Directory; its destination now exists.
    Directory,
    /// Symlink resolving to a directory; not followed.
    LinkedDirectory,
    /// Needs the leaf operation.
    File,
}

impl Handling {
    /// Success outcome for an already handled entry.
    #[must_use]
    pub const fn outcome(self) -> Option<Outcome> {
        match self {
            Self::Directory => Some(Outcome::Directory),
            Self::LinkedDirectory => Some(Outcome::Unsupported),
            Self::File => None,
        }
    }
}

/// Classify `entry` and create its destination directory when it is one.
///
/// A directory whose destination exists as anything but a directory is a
/// [`FatalError::TypeConflict`].  A non-directory that resolves through
/// symlinks to a directory is reported as [`Handling::LinkedDirectory`]
/// with a warning.
///
/// # Errors
///
/// Returns a [`FatalError`] on a type conflict, when the destination
/// directory cannot be created, or when a resolved symlink target cannot be
/// inspected.
pub fn classify(entry: &Entry<'_>, log: &dyn Log) -> Result<Handling, FatalError> {
    if entry.metadata.is_dir() {
        return match fs::metadata(entry.destination) {
            Ok(meta) if meta.is_dir() => Ok(Handling::Directory),
            Ok(_) => Err(FatalError::TypeConflict {
                path: entry.destination.to_path_buf(),
            }),
            Err(_) => {
                create_dir_all(entry.destination)?;
                Ok(Handling::Directory)
            }
        };
    }

    if let Ok(real) = fs::canonicalize(entry.source) {
        let real_meta = fs::metadata(&real).map_err(|e| FatalError::io("stat", &real, e))?;
        if real_meta.is_dir() {
            log.warn(&format!(
                "unsupported symbolic link of directory: {}",
                entry.source.display()
            ));
            return Ok(Handling::LinkedDirectory);
        }
    }

    Ok(Handling::File)
}

/// Create `path` and any missing ancestors with mode `0755` on Unix.
fn create_dir_all(path: &Path) -> Result<(), FatalError> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt as _;
        builder.mode(0o755);
    }
    builder
        .create(path)
        .map_err(|e| FatalError::io("create directory", path, e))
}
