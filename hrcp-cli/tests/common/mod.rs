//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with temporary directories
//! - Command builder helpers that isolate the binary from the host config
//! - Tree file fixtures

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// The platform tree in the record format, as YAML.
#[allow(dead_code)]
pub const PLATFORM_YAML: &str = "\
name: platform
attributes:
  timeout: 30
  cfg:
    retries: 3
    db:
      host: primary
children:
  us-east:
    name: us-east
    children:
      api:
        name: api
        attributes:
          timeout: 60
          cfg:
            db:
              host: replica
      db:
        name: db
  eu-west:
    name: eu-west
    children:
      api:
        name: api
";

/// Test environment with an isolated working and config directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory, used as the working directory
    pub temp_path: PathBuf,
    /// Directory passed as HRCP_CONFIG_DIR
    pub config_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    ///
    /// The config directory is created empty so no user configuration
    /// is picked up.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        let config_dir = temp_path.join("user-config");
        std::fs::create_dir_all(&config_dir).expect("Failed to create config dir");

        Self {
            temp_dir,
            temp_path,
            config_dir,
        }
    }

    /// Get a command builder running in this environment.
    ///
    /// The working directory is the temporary directory and every
    /// `HRCP_*` variable that could leak in from the host is cleared.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("hrcp").expect("Failed to find hrcp binary");
        cmd.current_dir(&self.temp_path)
            .env("HRCP_CONFIG_DIR", &self.config_dir)
            .env_remove("HRCP_ROOT_NAME")
            .env_remove("HRCP_DEFAULT_MODE")
            .env_remove("HRCP_OUTPUT_FORMAT")
            .env_remove("HRCP_LOG_MODE");
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Write a file under the temporary directory and return its path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        std::fs::write(&path, contents).expect("Failed to write test file");
        path
    }

    /// Write the platform tree as `platform.yaml`.
    pub fn platform(&self) -> PathBuf {
        self.write("platform.yaml", PLATFORM_YAML)
    }

    /// Write the project configuration file `hrcp.yaml`.
    pub fn project_config(&self, contents: &str) -> PathBuf {
        self.write("hrcp.yaml", contents)
    }

    /// Run a command that must succeed and return its stdout.
    pub fn stdout(&self, args: &[&str]) -> String {
        let output = self
            .command()
            .args(args)
            .output()
            .expect("Failed to run hrcp");

        assert!(
            output.status.success(),
            "hrcp {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout).expect("Invalid UTF-8 in output")
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
