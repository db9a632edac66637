//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with temporary directories
//! - Command builder helpers with an isolated environment
//! - A small project layer document used by most tests

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Layer document with a global ignore, an unscoped base and a test layer.
///
/// Indices: 0 ignores, 1 base, 2 tests.
#[allow(dead_code)]
pub const PROJECT_LAYERS: &str = "\
- name: ignores
  ignores: ['dist/**']
- name: base
  plugins: [import]
  settings:
    import/resolver:
      node: true
  rules:
    no-console: error
    eqeqeq: warn
    import/order: [error, { newlines-between: always }]
- name: tests
  files: ['**/*.test.js']
  rules:
    no-console: 'off'
";

/// Environment variables that would leak host configuration into a test.
const ISOLATED_ENV: [&str; 6] = [
    "STRATA_CONFIG",
    "STRATA_DATA_DIR",
    "STRATA_MEMOIZE",
    "STRATA_NO_USER_CONFIG",
    "STRATA_OUTPUT_FORMAT",
    "STRATA_LOG_MODE",
];

/// Test environment with isolated project and data directories.
///
/// This struct provides an isolated test environment with:
/// - A project directory commands run in
/// - A separate data directory for user layers
/// - Helper methods for writing layer documents
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Directory commands run in
    pub project_dir: PathBuf,
    /// Directory holding user layers
    pub data_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment with empty project and data directories.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let project_dir = temp_dir.path().join("project");
        let data_dir = temp_dir.path().join("data");
        std::fs::create_dir_all(&project_dir).expect("Failed to create project dir");
        std::fs::create_dir_all(&data_dir).expect("Failed to create data dir");

        Self {
            temp_dir,
            project_dir,
            data_dir,
        }
    }

    /// Create an environment whose project holds [`PROJECT_LAYERS`].
    pub fn with_project() -> Self {
        let env = Self::new();
        env.write_project_file("strata.yaml", PROJECT_LAYERS);
        env
    }

    /// Get a bare command builder running in the project directory.
    ///
    /// Host `STRATA_*` variables are cleared but no flags are set.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("strata").expect("Failed to find strata binary");
        cmd.current_dir(&self.project_dir);
        for key in ISOLATED_ENV {
            cmd.env_remove(key);
        }
        cmd
    }

    /// Get a command builder with the data directory pre-configured.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--data-dir").arg(&self.data_dir);
        cmd
    }

    /// Root of the temporary tree (parent of the project directory).
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write a file under the project directory.
    pub fn write_project_file(&self, name: &str, content: &str) -> PathBuf {
        write_file(&self.project_dir, name, content)
    }

    /// Write the user layer document.
    pub fn write_user_layers(&self, content: &str) -> PathBuf {
        write_file(&self.data_dir, "layers.yaml", content)
    }
}

/// Write `content` to `dir/name`, creating parent directories.
#[allow(dead_code)]
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create parent dir");
    }
    std::fs::write(&path, content).expect("Failed to write file");
    path
}
