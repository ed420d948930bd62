//! Command-line argument definitions.
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::commands::version::VERSION;

/// Top-level CLI entry point for the backup tool.
#[derive(Parser, Debug)]
#[command(
    name = "baku",
    about = "Back up a directory tree by copy, hard link, or an external command",
    version = VERSION,
    args_conflicts_with_subcommands = true
)]
pub struct Cli {
    /// Optional subcommand; without one a backup is run.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Backup flags.
    #[command(flatten)]
    pub backup: BackupArgs,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print version information
    Version,
}

/// Flags for a backup run.  Each one overrides the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct BackupArgs {
    /// The source directory to back up
    #[arg(long = "src", value_name = "DIR")]
    pub source: Option<PathBuf>,

    /// The destination directory
    #[arg(long = "dst", value_name = "DIR")]
    pub destination: Option<PathBuf>,

    /// Create hard links instead of copying
    #[arg(long)]
    pub link: bool,

    /// Overwrite existing destination files
    #[arg(long)]
    pub overwrite: bool,

    /// Ignore entries whose source path matches this regex
    #[arg(long, value_name = "REGEX")]
    pub ignore: Option<String>,

    /// Copy files with a custom program, run as `<PROGRAM> <src path> <dst path>`
    #[arg(long = "cmd", value_name = "PROGRAM")]
    pub command: Option<String>,

    /// Read defaults from a TOML config file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Also append log output to this file
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}
