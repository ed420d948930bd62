//! Tree-walk backup engine.
//!
//! - **[`entry`]** — [`Entry`], the [`Action`] and [`BackupOption`] traits, composition
//! - **[`classify`]** — directory / file / symlinked-directory decision
//! - **[`actions`]** — copy, hard-link, and delegated-command leaf actions
//! - **[`options`]** — ignore-by-pattern and safe-overwrite decorators
//! - **[`walk`]** — the depth-first walk and per-entry error handling
pub mod actions;
pub mod classify;
pub mod entry;
pub mod options;
pub mod walk;

pub use actions::{CopyFile, CustomCommand, HardLink};
pub use classify::{Handling, classify};
pub use entry::{Action, BackupOption, Entry, FnAction, Outcome, action_fn, compose};
pub use options::{IgnoreOption, OverwriteOption, backup_path};
pub use walk::backup;
