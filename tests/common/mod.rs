// Shared helpers for integration tests.
//
// Provides a pair of temporary directories (source and destination) and a
// fluent builder so each integration test can lay out an isolated tree
// without repeating filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use baku::backup::{self, Action, BackupOption};
use baku::error::BackupError;
use baku::logging::BufferedLog;

/// A source tree and a destination root, both backed by [`tempfile::TempDir`].
///
/// The destination root itself is `<dst tempdir>/mirror` and does not exist
/// until a walk (or [`BackupFixtureBuilder::dest_file`]) creates it.
pub struct BackupFixture {
    src: tempfile::TempDir,
    dst: tempfile::TempDir,
}

impl BackupFixture {
    /// Source root.
    pub fn source(&self) -> &Path {
        self.src.path()
    }

    /// Destination root.
    pub fn destination(&self) -> PathBuf {
        self.dst.path().join("mirror")
    }

    /// Walk the source into the destination with `action` and `options`.
    pub fn run(
        &self,
        action: &dyn Action,
        options: &[Box<dyn BackupOption>],
    ) -> (Result<(), BackupError>, BufferedLog) {
        let log = BufferedLog::new();
        let result = backup::backup(self.source(), &self.destination(), action, options, &log);
        (result, log)
    }

    /// Listing of the source tree, see [`listing`].
    pub fn source_listing(&self) -> String {
        listing(self.source())
    }

    /// Listing of the destination tree, see [`listing`].
    pub fn destination_listing(&self) -> String {
        listing(&self.destination())
    }
}

/// Fluent builder for [`BackupFixture`].
pub struct BackupFixtureBuilder {
    fixture: BackupFixture,
}

impl BackupFixtureBuilder {
    /// Begin with empty source and destination directories.
    pub fn new() -> Self {
        Self {
            fixture: BackupFixture {
                src: tempfile::tempdir().expect("create source dir"),
                dst: tempfile::tempdir().expect("create destination dir"),
            },
        }
    }

    /// Write `content` to `<source>/<rel>`, creating parent directories.
    pub fn file(self, rel: &str, content: &str) -> Self {
        write_file(&self.fixture.source().join(rel), content);
        self
    }

    /// Create the directory `<source>/<rel>`.
    pub fn dir(self, rel: &str) -> Self {
        fs::create_dir_all(self.fixture.source().join(rel)).expect("create source subdir");
        self
    }

    /// Write `content` to `<destination>/<rel>` before the walk runs.
    pub fn dest_file(self, rel: &str, content: &str) -> Self {
        write_file(&self.fixture.destination().join(rel), content);
        self
    }

    /// Finish building.
    pub fn build(self) -> BackupFixture {
        self.fixture
    }
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(path, content).expect("write file");
}

/// One line per entry below `root`, in name order: `dir/` for directories
/// and `file = content` for regular files.
pub fn listing(root: &Path) -> String {
    walkdir::WalkDir::new(root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .map(|entry| {
            let entry = entry.expect("walk listing");
            let rel = entry
                .path()
                .strip_prefix(root)
                .expect("entry under root")
                .to_string_lossy()
                .replace('\\', "/");
            if entry.file_type().is_dir() {
                format!("{rel}/")
            } else {
                let content = fs::read_to_string(entry.path()).expect("read listed file");
                format!("{rel} = {content}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
