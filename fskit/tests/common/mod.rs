//! Common test utilities for integration tests.
//!
//! This module provides helper functions and fixture builders for testing
//! the fskit library.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// Creates a temporary directory for testing.
///
/// The directory will be automatically cleaned up when the returned
/// `TempDir` is dropped.
#[allow(dead_code)]
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

/// The path of `dir` as a `String`.
#[allow(dead_code)]
pub fn path_str(dir: &Path) -> String {
    dir.to_str().expect("temp path is not UTF-8").to_string()
}

/// Builder for a directory tree of files with fixed contents.
///
/// # Examples
///
/// ```no_run
/// # use common::TreeFixture;
/// let (dir, root) = TreeFixture::new()
///     .file("a.txt", "alpha")
///     .file("nested/b.txt", "beta")
///     .build();
/// ```
#[allow(dead_code)]
#[derive(Default)]
pub struct TreeFixture {
    files: Vec<(String, Vec<u8>)>,
    dirs: Vec<String>,
}

#[allow(dead_code)]
impl TreeFixture {
    /// Creates an empty fixture.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file at `relative` (parents are created).
    pub fn file(mut self, relative: &str, contents: impl AsRef<[u8]>) -> Self {
        self.files
            .push((relative.to_string(), contents.as_ref().to_vec()));
        self
    }

    /// Adds an empty directory at `relative`.
    pub fn dir(mut self, relative: &str) -> Self {
        self.dirs.push(relative.to_string());
        self
    }

    /// Materializes the tree in a fresh temp dir.
    pub fn build(&self) -> (TempDir, String) {
        let dir = create_temp_dir();
        self.build_in(dir.path());
        let root = path_str(dir.path());
        (dir, root)
    }

    /// Materializes the tree under `root`, in the order things were added.
    pub fn build_in(&self, root: &Path) {
        for relative in &self.dirs {
            fs::create_dir_all(root.join(relative)).unwrap();
        }
        for (relative, contents) in &self.files {
            let path = root.join(relative);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, contents).unwrap();
        }
    }

    /// Materializes the tree with files written in reverse order.
    pub fn build_reversed_in(&self, root: &Path) {
        for relative in self.dirs.iter().rev() {
            fs::create_dir_all(root.join(relative)).unwrap();
        }
        for (relative, contents) in self.files.iter().rev() {
            let path = root.join(relative);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, contents).unwrap();
        }
    }
}

/// Whether the filesystem under `dir` distinguishes `a` from `A`.
#[allow(dead_code)]
pub fn is_case_sensitive(dir: &Path) -> bool {
    let marker = dir.join("case-marker");
    fs::write(&marker, "").unwrap();
    let sensitive = !dir.join("CASE-MARKER").exists();
    fs::remove_file(marker).unwrap();
    sensitive
}
