//! Command: mirror the source tree into the destination.
use anyhow::{Context as _, Result};

use crate::backup;
use crate::config::{ActionKind, Settings};
use crate::exec;
use crate::logging::Log;

/// Run a backup with resolved `settings`.
///
/// # Errors
///
/// Returns an error if the ignore pattern is invalid, the source root
/// cannot be read, or an entry fails fatally.
pub fn run(settings: &Settings, log: &dyn Log) -> Result<()> {
    log.info(&format!("Copy command: {}", settings.action.label()));
    if let ActionKind::Command(program) = &settings.action
        && !exec::which(program)
    {
        log.warn(&format!("{program} not found on PATH"));
    }

    let action = settings.build_action();
    let options = settings.build_options()?;
    log.debug(&format!("{} option(s): {options:?}", options.len()));

    log.stage(&format!(
        "Backing up {} to {}",
        settings.source.display(),
        settings.destination.display()
    ));
    backup::backup(
        &settings.source,
        &settings.destination,
        action.as_ref(),
        &options,
        log,
    )
    .with_context(|| format!("backup of {} failed", settings.source.display()))
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::BackupError;
    use crate::logging::{BufferedLog, EntryStatus, LogEntry};
    use std::fs;
    use std::path::Path;

    fn settings(source: &Path, destination: &Path) -> Settings {
        Settings {
            source: source.to_path_buf(),
            destination: destination.to_path_buf(),
            action: ActionKind::Copy,
            overwrite: false,
            ignore: None,
            log_file: None,
        }
    }

    #[test]
    fn run_logs_banner_and_copies() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        fs::write(src.path().join("a"), "a").unwrap();
        let out = dst.path().join("out");
        let log = BufferedLog::new();

        run(&settings(src.path(), &out), &log).unwrap();

        assert!(matches!(
            log.entries().first(),
            Some(LogEntry::Info(msg)) if msg == "Copy command: builtin copy"
        ));
        assert_eq!(fs::read_to_string(out.join("a")).unwrap(), "a");
        assert_eq!(log.paths_with(EntryStatus::Copied).len(), 1);
    }

    #[test]
    fn run_rejects_bad_pattern_before_walking() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        let out = dst.path().join("out");
        let mut config = settings(src.path(), &out);
        config.ignore = Some("[".to_string());

        let err = run(&config, &BufferedLog::new()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BackupError>(),
            Some(BackupError::Pattern { .. })
        ));
        assert!(!out.exists());
    }

    #[test]
    fn run_warns_about_missing_program() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        let mut config = settings(src.path(), dst.path());
        config.action = ActionKind::Command("baku-no-such-program".to_string());
        let log = BufferedLog::new();

        run(&config, &log).unwrap();
        assert!(log.has_warning("baku-no-such-program not found"));
    }

    #[test]
    fn run_reports_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let config = settings(&dir.path().join("absent"), &dir.path().join("out"));

        let err = run(&config, &BufferedLog::new()).unwrap_err();
        assert!(err.to_string().starts_with("backup of"));
        assert!(matches!(
            err.downcast_ref::<BackupError>(),
            Some(BackupError::SourceRoot { .. })
        ));
    }
}
