//! Run settings: an optional TOML file merged with command-line flags.
pub mod toml_loader;

use anyhow::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::backup::{
    Action, BackupOption, CopyFile, CustomCommand, HardLink, IgnoreOption, OverwriteOption,
};
use crate::cli::BackupArgs;
use crate::error::{BackupError, ConfigError};

/// Contents of a `--config` file.  Every key is optional.
#[derive(Debug, Default, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Source root.
    pub source: Option<PathBuf>,
    /// Destination root.
    pub destination: Option<PathBuf>,
    /// Hard-link instead of copying.
    pub link: bool,
    /// Replace existing destination files.
    pub overwrite: bool,
    /// Ignore pattern.
    pub ignore: Option<String>,
    /// External copy program.
    pub command: Option<String>,
    /// Log file path.
    pub log_file: Option<PathBuf>,
}

impl FileConfig {
    /// Load a config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        toml_loader::load_config(path)
    }
}

/// How each file reaches the destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionKind {
    /// Copy bytes.
    Copy,
    /// Hard-link.
    Link,
    /// Run an external program.
    Command(String),
}

impl ActionKind {
    /// Human-readable name for the startup banner.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Copy => "builtin copy",
            Self::Link => "builtin hard link",
            Self::Command(program) => program,
        }
    }
}

/// Fully resolved settings for one backup run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Source root, `~` expanded.
    pub source: PathBuf,
    /// Destination root, `~` expanded.
    pub destination: PathBuf,
    /// Base action.
    pub action: ActionKind,
    /// Wrap the action with [`OverwriteOption`].
    pub overwrite: bool,
    /// Wrap the action with an [`IgnoreOption`] for this pattern.
    pub ignore: Option<String>,
    /// Extra log destination.
    pub log_file: Option<PathBuf>,
}

impl Settings {
    /// Merge command-line flags over an optional config file.
    ///
    /// Flags win over file values; boolean flags can only switch a setting
    /// on.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be loaded or a root path
    /// is missing or cannot be expanded.
    pub fn resolve(args: &BackupArgs) -> Result<Self> {
        let file = match &args.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        Ok(Self::merge(args, file, home_dir().as_deref())?)
    }

    /// Combine `args` and `file`, expanding `~` against `home`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a root path is missing or cannot be expanded.
    pub fn merge(
        args: &BackupArgs,
        file: FileConfig,
        home: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        let source = args
            .source
            .clone()
            .or(file.source)
            .ok_or(ConfigError::MissingPath {
                name: "source",
                flag: "src",
            })?;
        let destination = args
            .destination
            .clone()
            .or(file.destination)
            .ok_or(ConfigError::MissingPath {
                name: "destination",
                flag: "dst",
            })?;

        let action = match args.command.clone().or(file.command) {
            Some(program) => ActionKind::Command(program),
            None if args.link || file.link => ActionKind::Link,
            None => ActionKind::Copy,
        };

        let log_file = args
            .log_file
            .clone()
            .or(file.log_file)
            .map(|path| expand_user_home(&path, home))
            .transpose()?;

        Ok(Self {
            source: expand_user_home(&source, home)?,
            destination: expand_user_home(&destination, home)?,
            action,
            overwrite: args.overwrite || file.overwrite,
            ignore: args.ignore.clone().or(file.ignore),
            log_file,
        })
    }

    /// The base action for the selected [`ActionKind`].
    #[must_use]
    pub fn build_action(&self) -> Box<dyn Action> {
        match &self.action {
            ActionKind::Copy => Box::new(CopyFile),
            ActionKind::Link => Box::new(HardLink),
            ActionKind::Command(program) => Box::new(CustomCommand::new(program.clone())),
        }
    }

    /// The option list: overwrite first, then ignore, so ignore wraps outermost.
    ///
    /// # Errors
    ///
    /// Returns [`BackupError::Pattern`] if the ignore pattern is invalid.
    pub fn build_options(&self) -> Result<Vec<Box<dyn BackupOption>>, BackupError> {
        let mut options: Vec<Box<dyn BackupOption>> = Vec::new();
        if self.overwrite {
            options.push(Box::new(OverwriteOption));
        }
        if let Some(pattern) = &self.ignore {
            options.push(Box::new(IgnoreOption::new(pattern)?));
        }
        Ok(options)
    }
}

/// Replace a leading `~` with `home`.
///
/// Only `~` and `~/...` are expanded; `~user` and every other path are
/// returned unchanged.
///
/// # Errors
///
/// Returns [`ConfigError::HomeUnknown`] if expansion is needed but `home` is `None`.
pub fn expand_user_home(path: &Path, home: Option<&Path>) -> Result<PathBuf, ConfigError> {
    let Ok(rest) = path.strip_prefix("~") else {
        return Ok(path.to_path_buf());
    };
    let home = home.ok_or_else(|| ConfigError::HomeUnknown {
        path: path.to_path_buf(),
    })?;
    if rest.as_os_str().is_empty() {
        return Ok(home.to_path_buf());
    }
    Ok(home.join(rest))
}

/// The current user's home directory from `$HOME` (or `%USERPROFILE%`).
#[must_use]
pub fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}
