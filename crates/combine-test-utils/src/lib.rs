//! Shared test utilities for the yaml-combine workspace.
//!
//! Provides [`FixtureDir`], a temporary directory of YAML files used by the
//! engine and CLI test suites. It is a dev-dependency only, never published.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory populated with YAML documents.
///
/// # Example
///
/// ```rust,no_run
/// use combine_test_utils::FixtureDir;
///
/// let fixture = FixtureDir::new()
///     .with_file("input.yaml", "a: {$xref: 'defs.yaml#/A'}\n")
///     .with_file("defs.yaml", "A: 1\n");
/// fixture.assert_file_exists("defs.yaml");
/// ```
pub struct FixtureDir {
    temp_dir: TempDir,
}

impl Default for FixtureDir {
    fn default() -> Self {
        Self::new()
    }
}

impl FixtureDir {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("FixtureDir::new: failed to create temp dir"),
        }
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `relative` inside the fixture.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    /// Builder form of [`write_file`](Self::write_file).
    pub fn with_file(self, relative: &str, content: &str) -> Self {
        self.write_file(relative, content);
        self
    }

    /// Write `content` to `relative`, creating parent directories.
    pub fn write_file(&self, relative: &str, content: &str) {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("FixtureDir::write_file: failed to create parent");
        }
        fs::write(&path, content).expect("FixtureDir::write_file: failed to write file");
    }

    /// Read a fixture file back as text.
    pub fn read_file(&self, relative: &str) -> String {
        fs::read_to_string(self.path(relative))
            .unwrap_or_else(|e| panic!("FixtureDir::read_file: {relative}: {e}"))
    }

    /// Assert that `relative` exists inside the fixture.
    pub fn assert_file_exists(&self, relative: &str) {
        assert!(
            self.path(relative).exists(),
            "expected {} to exist in fixture",
            relative
        );
    }
}
