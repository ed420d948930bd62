//! Domain-specific error types for the backup engine.
//!
//! This module provides a structured error hierarchy using [`thiserror`].
//! Actions return [`ActionError`], whose kind decides whether the walk skips
//! the current entry or aborts.  The walk itself returns [`BackupError`],
//! which command handlers at the CLI boundary convert to [`anyhow::Error`]
//! via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! BackupError
//! ├── Pattern             — invalid ignore pattern (configuration time)
//! ├── SourceRoot          — source root cannot be read
//! ├── Path                — relative path cannot be derived
//! └── Action(FatalError)  — a node aborted the walk
//!
//! ActionError
//! ├── AlreadyExists       — skippable
//! ├── Ignored             — skippable
//! └── Fatal(FatalError)   — aborts the walk
//!
//! ConfigError             — settings cannot be resolved
//! ```

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Outcome of one action invocation that did not succeed.
///
/// The two skippable kinds abort only the current entry; [`Fatal`](Self::Fatal)
/// aborts the whole walk.
#[derive(Error, Debug)]
pub enum ActionError {
    /// The destination already exists and was left untouched.
    #[error("file already exists")]
    AlreadyExists,

    /// The source path matched an ignore pattern.
    #[error("file ignored")]
    Ignored,

    /// Any other failure.
    #[error(transparent)]
    Fatal(#[from] FatalError),
}

/// Failures that abort a walk.
#[derive(Error, Debug)]
pub enum FatalError {
    /// A directory entry maps onto a destination that exists but is not a directory.
    #[error("{} not a directory", .path.display())]
    TypeConflict {
        /// Destination path that has the wrong type.
        path: PathBuf,
    },

    /// A filesystem operation failed.
    #[error("{op} {}: {source}", .path.display())]
    Io {
        /// Short name of the operation (e.g. `"create directory"`).
        op: &'static str,
        /// Path the operation was applied to.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The external copy program could not be started.
    #[error("failed to execute '{program}': {source}")]
    Spawn {
        /// Program that was invoked.
        program: String,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The external copy program exited unsuccessfully.
    #[error(
        "command '{program}' failed (exit {})",
        .code.map_or_else(|| "signal".to_string(), |c| c.to_string())
    )]
    CommandFailed {
        /// Program that was invoked.
        program: String,
        /// Exit code, `None` when terminated by a signal.
        code: Option<i32>,
    },

    /// Restoring `<dest>.bak` after a failed overwrite did not succeed.
    #[error("restore backup {}: {source}", .path.display())]
    Rollback {
        /// Backup path that could not be moved back.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Removing `<dest>.bak` after a successful overwrite did not succeed.
    #[error("remove backup {}: {source}", .path.display())]
    Cleanup {
        /// Backup path that could not be removed.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
}

impl FatalError {
    /// Build an [`Io`](Self::Io) variant.
    pub fn io(op: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            op,
            path: path.into(),
            source,
        }
    }
}

/// Errors returned by a whole backup walk.
#[derive(Error, Debug)]
pub enum BackupError {
    /// The ignore pattern does not compile.
    #[error("failed to compile the regexp ({pattern}): {source}")]
    Pattern {
        /// Pattern as supplied by the user.
        pattern: String,
        /// Compilation error.
        source: regex::Error,
    },

    /// The source root does not exist or cannot be read.
    #[error("cannot read source root {}: {source}", .path.display())]
    SourceRoot {
        /// Source root that was supplied.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A visited path is not located under the source root.
    #[error("{} is not under source root {}", .path.display(), .root.display())]
    Path {
        /// Visited path.
        path: PathBuf,
        /// Source root.
        root: PathBuf,
    },

    /// A fatal action error aborted the walk.
    #[error("{}: {source}", .path.display())]
    Action {
        /// Source path of the entry that failed.
        path: PathBuf,
        /// The fatal cause.
        source: FatalError,
    },
}

/// Errors that arise while resolving settings from flags and the config file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required root path was given neither on the command line nor in the file.
    #[error("missing {name} path: pass --{flag} or set '{name}' in the config file")]
    MissingPath {
        /// Config file key (`"source"` or `"destination"`).
        name: &'static str,
        /// Command-line flag name.
        flag: &'static str,
    },

    /// A `~` path was given but no home directory is known.
    #[error("cannot expand {}: home directory is unknown", .path.display())]
    HomeUnknown {
        /// The unexpanded path.
        path: PathBuf,
    },
}
