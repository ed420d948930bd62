//! Base actions: byte copy, hard link, and a delegated external command.
//!
//! Every action first runs the entry [`classify`]er; only entries that
//! still need a leaf operation reach the existence check and the operation
//! itself.
use std::fs;
use std::io;
use std::path::Path;

use super::classify::classify;
use super::entry::{Action, Entry, Outcome};
use crate::error::{ActionError, FatalError};
use crate::exec;
use crate::logging::Log;

/// Run the classifier and return the outcome when the entry is already
/// handled, or `None` when the leaf operation should run.
///
/// When the leaf should run, also rejects an existing destination with
/// [`ActionError::AlreadyExists`].
fn prepare(entry: &Entry<'_>, log: &dyn Log) -> Result<Option<Outcome>, ActionError> {
    if let Some(outcome) = classify(entry, log)?.outcome() {
        log.debug(&format!(
            "operated directory: {} to {}",
            entry.source.display(),
            entry.destination.display()
        ));
        return Ok(Some(outcome));
    }
    if entry.destination.symlink_metadata().is_ok() {
        return Err(ActionError::AlreadyExists);
    }
    Ok(None)
}

/// Copy file bytes from source to destination.
#[derive(Debug, Clone, Copy, Default)]
pub struct CopyFile;

impl Action for CopyFile {
    fn run(&self, entry: &Entry<'_>, log: &dyn Log) -> Result<Outcome, ActionError> {
        if let Some(outcome) = prepare(entry, log)? {
            return Ok(outcome);
        }
        log.info(&format!(
            "copy {} to {}",
            entry.source.display(),
            entry.destination.display()
        ));
        let written = copy_file(entry.source, entry.destination)?;
        log.debug(&format!("---> written {written}"));
        Ok(Outcome::Transferred)
    }
}

/// Stream `src` into a newly created `dst`, returning the bytes written.
///
/// A destination that appears between the existence check and the create
/// is reported as [`ActionError::AlreadyExists`].
fn copy_file(src: &Path, dst: &Path) -> Result<u64, ActionError> {
    let mut reader = fs::File::open(src).map_err(|e| FatalError::io("open", src, e))?;
    let mut writer = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(dst)
        .map_err(|e| match e.kind() {
            io::ErrorKind::AlreadyExists => ActionError::AlreadyExists,
            _ => FatalError::io("create", dst, e).into(),
        })?;
    let written = io::copy(&mut reader, &mut writer).map_err(|e| FatalError::io("copy", dst, e))?;
    Ok(written)
}

/// Create a hard link at the destination pointing at the source content.
#[derive(Debug, Clone, Copy, Default)]
pub struct HardLink;

impl Action for HardLink {
    fn run(&self, entry: &Entry<'_>, log: &dyn Log) -> Result<Outcome, ActionError> {
        if let Some(outcome) = prepare(entry, log)? {
            return Ok(outcome);
        }
        log.info(&format!(
            "link {} to {}",
            entry.source.display(),
            entry.destination.display()
        ));
        fs::hard_link(entry.source, entry.destination)
            .map_err(|e| FatalError::io("link", entry.destination, e))?;
        Ok(Outcome::Transferred)
    }
}

/// Hand each file to an external program as `<program> <source> <destination>`.
#[derive(Debug, Clone)]
pub struct CustomCommand {
    program: String,
}

impl CustomCommand {
    /// Delegate leaf operations to `program`.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Action for CustomCommand {
    fn run(&self, entry: &Entry<'_>, log: &dyn Log) -> Result<Outcome, ActionError> {
        if let Some(outcome) = prepare(entry, log)? {
            return Ok(outcome);
        }
        log.info(&format!(
            "{} {} {}",
            self.program,
            entry.source.display(),
            entry.destination.display()
        ));
        exec::run_inherited(
            &self.program,
            &[entry.source.as_os_str(), entry.destination.as_os_str()],
        )?;
        Ok(Outcome::Transferred)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::logging::BufferedLog;
    use std::path::PathBuf;

    fn run_action(
        action: &dyn Action,
        source: &Path,
        destination: &Path,
    ) -> Result<Outcome, ActionError> {
        let meta = fs::symlink_metadata(source).unwrap();
        action.run(&Entry::new(source, destination, &meta), &BufferedLog::new())
    }

    fn source_file(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join(".test_file");
        fs::write(&path, content).unwrap();
        path
    }

    // -----------------------------------------------------------------------
    // CopyFile
    // -----------------------------------------------------------------------

    #[test]
    fn copy_file_copies_then_reports_exists() {
        let dir = tempfile::tempdir().unwrap();
        let source = source_file(dir.path(), "data1");
        let target = dir.path().join(".test_file.copy");

        let outcome = run_action(&CopyFile, &source, &target).unwrap();
        assert_eq!(outcome, Outcome::Transferred);
        assert_eq!(fs::read_to_string(&target).unwrap(), "data1");

        fs::write(&source, "changed").unwrap();
        let err = run_action(&CopyFile, &source, &target).unwrap_err();
        assert!(matches!(err, ActionError::AlreadyExists));
        assert_eq!(fs::read_to_string(&target).unwrap(), "data1");
    }

    #[test]
    fn copy_file_into_missing_parent_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let source = source_file(dir.path(), "x");
        let target = dir.path().join("missing").join("out");

        let err = run_action(&CopyFile, &source, &target).unwrap_err();
        assert!(matches!(err, ActionError::Fatal(FatalError::Io { op: "create", .. })));
    }

    #[test]
    fn copy_file_on_directory_creates_directory() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        let target = dst.path().join("mirror");

        let outcome = run_action(&CopyFile, src.path(), &target).unwrap();
        assert_eq!(outcome, Outcome::Directory);
        assert!(target.is_dir());
    }

    #[cfg(unix)]
    #[test]
    fn copy_file_skips_symlinked_directory() {
        let dir = tempfile::tempdir().unwrap();
        let real = dir.path().join("real");
        fs::create_dir(&real).unwrap();
        let link = dir.path().join("link");
        std::os::unix::fs::symlink(&real, &link).unwrap();
        let target = dir.path().join("out");

        let outcome = run_action(&CopyFile, &link, &target).unwrap();
        assert_eq!(outcome, Outcome::Unsupported);
        assert!(!target.exists());
    }

    // -----------------------------------------------------------------------
    // HardLink
    // -----------------------------------------------------------------------

    #[test]
    fn hard_link_links_then_reports_exists() {
        let dir = tempfile::tempdir().unwrap();
        let source = source_file(dir.path(), "data2");
        let target = dir.path().join(".test_file.link");

        run_action(&HardLink, &source, &target).unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "data2");

        let err = run_action(&HardLink, &source, &target).unwrap_err();
        assert!(matches!(err, ActionError::AlreadyExists));
        assert_eq!(fs::read_to_string(&target).unwrap(), "data2");
    }

    #[test]
    fn hard_link_shares_content_with_source() {
        let dir = tempfile::tempdir().unwrap();
        let source = source_file(dir.path(), "before");
        let target = dir.path().join("linked");

        run_action(&HardLink, &source, &target).unwrap();
        fs::write(&source, "after").unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "after");
    }

    // -----------------------------------------------------------------------
    // CustomCommand
    // -----------------------------------------------------------------------

    #[cfg(unix)]
    #[test]
    fn custom_command_copies_with_cp() {
        let dir = tempfile::tempdir().unwrap();
        let source = source_file(dir.path(), "data1");
        let target = dir.path().join(".test_file.copy");
        let action = CustomCommand::new("cp");

        run_action(&action, &source, &target).unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "data1");

        let err = run_action(&action, &source, &target).unwrap_err();
        assert!(matches!(err, ActionError::AlreadyExists));
    }

    #[cfg(unix)]
    #[test]
    fn custom_command_failure_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let source = source_file(dir.path(), "x");
        let target = dir.path().join("out");

        let err = run_action(&CustomCommand::new("false"), &source, &target).unwrap_err();
        assert!(matches!(
            err,
            ActionError::Fatal(FatalError::CommandFailed { .. })
        ));
    }
}
