//! Depth-first tree walk that applies the composed action to every entry.
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::entry::{Action, BackupOption, Entry, compose};
use crate::error::{ActionError, BackupError};
use crate::logging::{EntryStatus, Log};

/// Mirror `source_root` into `destination_root`.
///
/// Entries are visited parent-first with siblings in file-name order.  For
/// each entry the destination is `destination_root` joined with the path
/// relative to `source_root`, and `action` is wrapped with `options` afresh
/// before it runs.
///
/// Entries rejected with [`ActionError::AlreadyExists`] or
/// [`ActionError::Ignored`] are logged and skipped; an ignored directory is
/// skipped together with its contents.  Errors from reading the source tree
/// are logged and do not stop the walk.
///
/// # Errors
///
/// Returns [`BackupError::SourceRoot`] if `source_root` cannot be inspected,
/// and [`BackupError::Action`] for the first entry whose action fails with
/// [`ActionError::Fatal`].
pub fn backup(
    source_root: &Path,
    destination_root: &Path,
    action: &dyn Action,
    options: &[Box<dyn BackupOption>],
    log: &dyn Log,
) -> Result<(), BackupError> {
    fs::symlink_metadata(source_root).map_err(|source| BackupError::SourceRoot {
        path: source_root.to_path_buf(),
        source,
    })?;

    let mut walker = WalkDir::new(source_root).sort_by_file_name().into_iter();
    while let Some(item) = walker.next() {
        let dir_entry = match item {
            Ok(dir_entry) => dir_entry,
            Err(err) => {
                log.error(&format!("walk err: {err}"));
                continue;
            }
        };
        let metadata = match dir_entry.metadata() {
            Ok(metadata) => metadata,
            Err(err) => {
                log.error(&format!("walk err: {err}"));
                continue;
            }
        };

        let source = dir_entry.path();
        let destination = destination_for(source_root, destination_root, source)?;
        let entry = Entry::new(source, &destination, &metadata);

        match compose(action, options).run(&entry, log) {
            Ok(outcome) => log.record_entry(source, outcome.into()),
            Err(ActionError::AlreadyExists) => {
                log.info(&format!("{}: {}", ActionError::AlreadyExists, source.display()));
                log.record_entry(source, EntryStatus::Exists);
            }
            Err(ActionError::Ignored) => {
                log.info(&format!("{}: {}", ActionError::Ignored, source.display()));
                log.record_entry(source, EntryStatus::Ignored);
                if metadata.is_dir() {
                    walker.skip_current_dir();
                }
            }
            Err(ActionError::Fatal(cause)) => {
                log.record_entry(source, EntryStatus::Failed);
                return Err(BackupError::Action {
                    path: source.to_path_buf(),
                    source: cause,
                });
            }
        }
    }
    Ok(())
}

/// `destination_root` joined with `path` relative to `source_root`.
fn destination_for(
    source_root: &Path,
    destination_root: &Path,
    path: &Path,
) -> Result<PathBuf, BackupError> {
    let relative = path
        .strip_prefix(source_root)
        .map_err(|_| BackupError::Path {
            path: path.to_path_buf(),
            root: source_root.to_path_buf(),
        })?;
    if relative.as_os_str().is_empty() {
        return Ok(destination_root.to_path_buf());
    }
    Ok(destination_root.join(relative))
}
