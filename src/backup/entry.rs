//! Entries, actions, and option composition.
use std::fmt;
use std::fs::Metadata;
use std::path::Path;

use crate::error::ActionError;
use crate::logging::{EntryStatus, Log};

/// One filesystem node visited during a walk.
#[derive(Debug, Clone, Copy)]
pub struct Entry<'a> {
    /// Path of the node in the source tree.
    pub source: &'a Path,
    /// Mirrored path in the destination tree.
    pub destination: &'a Path,
    /// Metadata of the source node, not following a final symlink.
    pub metadata: &'a Metadata,
}

impl<'a> Entry<'a> {
    /// Bundle the three inputs of an action.
    #[must_use]
    pub const fn new(source: &'a Path, destination: &'a Path, metadata: &'a Metadata) -> Self {
        Self {
            source,
            destination,
            metadata,
        }
    }
}

/// What a successful action did with its entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Directory created or already present.
    Directory,
    /// Leaf operation performed (copy, link, or command).
    Transferred,
    /// Symlink to a directory; nothing done.
    Unsupported,
    /// A failed overwrite was rolled back to the previous destination.
    Restored,
}

impl From<Outcome> for EntryStatus {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Directory => Self::Directory,
            Outcome::Transferred => Self::Copied,
            Outcome::Unsupported => Self::Unsupported,
            Outcome::Restored => Self::Restored,
        }
    }
}

/// The operation applied to one entry.
pub trait Action {
    /// Apply the action to `entry`, reporting progress to `log`.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::AlreadyExists`] or [`ActionError::Ignored`] to
    /// skip the entry, or [`ActionError::Fatal`] to abort the walk.
    fn run(&self, entry: &Entry<'_>, log: &dyn Log) -> Result<Outcome, ActionError>;
}

impl<A: Action + ?Sized> Action for &A {
    fn run(&self, entry: &Entry<'_>, log: &dyn Log) -> Result<Outcome, ActionError> {
        (**self).run(entry, log)
    }
}

impl<A: Action + ?Sized> Action for Box<A> {
    fn run(&self, entry: &Entry<'_>, log: &dyn Log) -> Result<Outcome, ActionError> {
        (**self).run(entry, log)
    }
}

/// An [`Action`] backed by a closure.
pub struct FnAction<F>(F);

impl<F> fmt::Debug for FnAction<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnAction")
    }
}

impl<F> Action for FnAction<F>
where
    F: Fn(&Entry<'_>, &dyn Log) -> Result<Outcome, ActionError>,
{
    fn run(&self, entry: &Entry<'_>, log: &dyn Log) -> Result<Outcome, ActionError> {
        (self.0)(entry, log)
    }
}

/// Wrap a closure as an [`Action`].
pub const fn action_fn<F>(f: F) -> FnAction<F>
where
    F: Fn(&Entry<'_>, &dyn Log) -> Result<Outcome, ActionError>,
{
    FnAction(f)
}

/// A policy that wraps an action and yields a new action with the same
/// contract.
///
/// Options hold no per-entry state: the walker rebuilds the wrapped action
/// for every entry.
pub trait BackupOption: fmt::Debug {
    /// Wrap `action` with this option's policy.
    fn wrap<'a>(&'a self, action: Box<dyn Action + 'a>) -> Box<dyn Action + 'a>;
}

/// Apply `options` to `base` in order, so the last option is the outermost
/// wrapper.
#[must_use]
pub fn compose<'a>(
    base: &'a dyn Action,
    options: &'a [Box<dyn BackupOption>],
) -> Box<dyn Action + 'a> {
    let start: Box<dyn Action + 'a> = Box::new(base);
    options
        .iter()
        .fold(start, |action, option| option.wrap(action))
}
