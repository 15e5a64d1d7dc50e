//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with temporary directories
//! - Command builder helpers that isolate configuration
//! - Fixture helpers for files and directories

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Environment variables that would leak host configuration into a test.
const ISOLATED_VARS: [&str; 7] = [
    "FSKIT_CONFIG",
    "FSKIT_TEMP_DIR",
    "FSKIT_TEMP_MAX_ATTEMPTS",
    "FSKIT_READ_CHUNK_SIZE",
    "FSKIT_NEWLINE",
    "FSKIT_HASH_ALGORITHM",
    "FSKIT_LOG_MODE",
];

/// Test environment with an isolated home directory.
///
/// This struct provides an isolated test environment with:
/// - A temporary directory for test files
/// - A separate home directory so `~/.fskit/config.yaml` is under test control
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
    /// Path used as `HOME`
    pub home_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        let home_dir = temp_path.join("home");
        std::fs::create_dir_all(&home_dir).expect("Failed to create home dir");

        Self {
            temp_dir,
            temp_path,
            home_dir,
        }
    }

    /// Get a command builder for the fskit binary with host configuration
    /// stripped from the environment.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("fskit").expect("Failed to find fskit binary");
        for var in ISOLATED_VARS {
            cmd.env_remove(var);
        }
        cmd.env("HOME", &self.home_dir);
        cmd
    }

    /// The same isolated invocation as [`TestEnv::command`], as a plain
    /// `std::process::Command` for tests that manage the child's pipes.
    pub fn process(&self) -> std::process::Command {
        let mut cmd = std::process::Command::new(assert_cmd::cargo::cargo_bin("fskit"));
        for var in ISOLATED_VARS {
            cmd.env_remove(var);
        }
        cmd.env("HOME", &self.home_dir);
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// The temp path as a string argument.
    pub fn path_str(&self) -> String {
        self.temp_path.to_str().expect("temp path is not UTF-8").to_string()
    }

    /// Create a subdirectory in the test environment.
    pub fn create_dir(&self, name: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        std::fs::create_dir_all(&path).expect("Failed to create test directory");
        path
    }

    /// Create a file (and its parents) in the test environment.
    pub fn create_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        std::fs::create_dir_all(path.parent().unwrap()).expect("Failed to create parent");
        std::fs::write(&path, contents).expect("Failed to write test file");
        path
    }

    /// Write `~/.fskit/config.yaml` for this environment.
    pub fn write_user_config(&self, contents: &str) -> PathBuf {
        let dir = self.home_dir.join(".fskit");
        std::fs::create_dir_all(&dir).expect("Failed to create config dir");
        let path = dir.join("config.yaml");
        std::fs::write(&path, contents).expect("Failed to write config");
        path
    }

    /// Run a command that must succeed and return its trimmed stdout.
    pub fn stdout_of(&self, args: &[&str]) -> String {
        let output = self
            .command()
            .args(args)
            .output()
            .expect("Failed to run fskit");
        assert!(
            output.status.success(),
            "fskit {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout)
            .expect("Invalid UTF-8 in output")
            .trim_end_matches('\n')
            .to_string()
    }
}
