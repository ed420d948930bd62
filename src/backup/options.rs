//! Option decorators: ignore-by-pattern and safe overwrite.
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use regex::bytes::Regex;

use super::entry::{Action, BackupOption, Entry, Outcome};
use crate::error::{ActionError, BackupError, FatalError};
use crate::logging::Log;

/// Skip every entry whose source path matches a regular expression.
///
/// Matching runs against the whole source path, not just the file name, so
/// `\.git/` ignores everything inside any `.git` directory.
#[derive(Debug, Clone)]
pub struct IgnoreOption {
    pattern: Regex,
}

impl IgnoreOption {
    /// Compile `pattern`.
    ///
    /// # Errors
    ///
    /// Returns [`BackupError::Pattern`] if the pattern is not a valid regex.
    pub fn new(pattern: &str) -> Result<Self, BackupError> {
        let pattern = Regex::new(pattern).map_err(|source| BackupError::Pattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self { pattern })
    }

    /// Return `true` if `path` matches the pattern.
    #[must_use]
    pub fn matches(&self, path: &Path) -> bool {
        self.pattern.is_match(path.as_os_str().as_encoded_bytes())
    }
}

impl BackupOption for IgnoreOption {
    fn wrap<'a>(&'a self, action: Box<dyn Action + 'a>) -> Box<dyn Action + 'a> {
        Box::new(Ignore {
            option: self,
            inner: action,
        })
    }
}

struct Ignore<'a> {
    option: &'a IgnoreOption,
    inner: Box<dyn Action + 'a>,
}

impl Action for Ignore<'_> {
    fn run(&self, entry: &Entry<'_>, log: &dyn Log) -> Result<Outcome, ActionError> {
        if self.option.matches(entry.source) {
            return Err(ActionError::Ignored);
        }
        self.inner.run(entry, log)
    }
}

/// Replace existing destination files, keeping `<dest>.bak` until the
/// inner action has finished.
///
/// On failure the backup is renamed back and the rename's result replaces
/// the inner error: a successful rollback reports [`Outcome::Restored`].
/// Destination directories are never moved aside.
#[derive(Debug, Clone, Copy, Default)]
pub struct OverwriteOption;

impl BackupOption for OverwriteOption {
    fn wrap<'a>(&'a self, action: Box<dyn Action + 'a>) -> Box<dyn Action + 'a> {
        Box::new(Overwrite { inner: action })
    }
}

struct Overwrite<'a> {
    inner: Box<dyn Action + 'a>,
}

impl Action for Overwrite<'_> {
    fn run(&self, entry: &Entry<'_>, log: &dyn Log) -> Result<Outcome, ActionError> {
        let destination = entry.destination;
        let backup = backup_path(destination);

        let armed = match fs::metadata(destination) {
            Ok(meta) if !meta.is_dir() => {
                fs::rename(destination, &backup)
                    .map_err(|e| FatalError::io("rename", destination, e))?;
                log.debug(&format!("moved {} aside", destination.display()));
                true
            }
            _ => false,
        };

        let result = self.inner.run(entry, log);
        if !armed {
            return result;
        }

        match result {
            Err(err) => {
                log.warn(&format!(
                    "overwrite of {} failed, restoring previous file: {err}",
                    destination.display()
                ));
                fs::rename(&backup, destination)
                    .map_err(|source| FatalError::Rollback {
                        path: backup,
                        source,
                    })?;
                Ok(Outcome::Restored)
            }
            Ok(outcome) => {
                fs::remove_file(&backup).map_err(|source| FatalError::Cleanup {
                    path: backup,
                    source,
                })?;
                Ok(outcome)
            }
        }
    }
}

/// `<path>.bak`, next to `path`.
#[must_use]
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".bak");
    PathBuf::from(name)
}
