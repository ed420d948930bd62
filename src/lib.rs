//! Recursive directory backup engine.
//!
//! Walks a source tree parent-first and mirrors it into a destination tree
//! by copying bytes, creating hard links, or handing each file to an
//! external program.  Entries that already exist are skipped; ignore and
//! safe-overwrite options wrap the chosen action for every entry.
//!
//! The public API is organised into these layers:
//!
//! - **[`backup`]** — entry classification, actions, options, and the walk
//! - **[`config`]** — TOML config file merged with command-line flags
//! - **[`logging`]** — the [`Log`](logging::Log) observer, console/file output, summary
//! - **[`commands`]** — top-level subcommand orchestration (`backup`, `version`)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod backup;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exec;
pub mod logging;
