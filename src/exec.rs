//! External program invocation.
use std::ffi::OsStr;
use std::process::Command;

use crate::error::FatalError;

/// Run `program` with `args`, inheriting stdout and stderr, and fail on a
/// non-zero exit.
///
/// # Errors
///
/// Returns [`FatalError::Spawn`] if the program cannot be started and
/// [`FatalError::CommandFailed`] if it exits unsuccessfully.
pub fn run_inherited(program: &str, args: &[&OsStr]) -> Result<(), FatalError> {
    let status = Command::new(program)
        .args(args)
        .status()
        .map_err(|source| FatalError::Spawn {
            program: program.to_string(),
            source,
        })?;
    if !status.success() {
        return Err(FatalError::CommandFailed {
            program: program.to_string(),
            code: status.code(),
        });
    }
    Ok(())
}

/// Check if a program is available on PATH.
#[must_use]
pub fn which(program: &str) -> bool {
    #[cfg(target_os = "windows")]
    let check = Command::new("where").arg(program).output();

    #[cfg(not(target_os = "windows"))]
    let check = Command::new("which").arg(program).output();

    check.is_ok_and(|o| o.status.success())
}
