//! Common test utilities for CLI integration tests.
//!
//! Every test runs the binary inside its own temporary directory, with
//! `HOME` pointed there and the cfgmerge environment variables cleared, so
//! settings on the machine running the tests never leak in.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated working directory for one CLI invocation.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    temp_dir: TempDir,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Get a command builder running in the temp directory.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("cfgmerge").expect("Failed to find cfgmerge binary");
        cmd.current_dir(self.path())
            .env("HOME", self.path())
            .env_remove("CFGMERGE_OUTPUT_FORMAT")
            .env_remove("CFGMERGE_MODULES")
            .env_remove("CFGMERGE_LOG_MODE");
        cmd
    }

    /// Write a file below the temp directory, creating parent directories.
    pub fn write(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&path, contents).expect("Failed to write file");
        path
    }

    /// Create a module directory with a descriptor and one config source.
    ///
    /// The module is named after its directory and lives in group `g`,
    /// project `p`.
    pub fn module(&self, name: &str, after: &[&str], config: &str) -> PathBuf {
        let mut descriptor = format!("group: g\nproject: p\nmodule:\n  name: {name}\n");
        if !after.is_empty() {
            descriptor.push_str(&format!("  after: [{}]\n", after.join(", ")));
        }
        self.write(&format!("{name}/module.yaml"), &descriptor);
        self.write(&format!("{name}/config/main.yaml"), config);
        self.path().join(name)
    }
}
