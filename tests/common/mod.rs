//! Common test utilities and harness
//!
//! Provides an isolated environment for running the `spv-embed` binary:
//! - Fake SDK root with a stub compiler script in `bin/`
//! - Isolated configuration file
//! - Helpers for reading the generated header

#![allow(dead_code)]

use std::ffi::OsStr;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Name the stub compiler is installed under
pub const COMPILER_NAME: &str = "slangc";

/// Shell prelude that leaves the declared output path in `$out` and keeps `$@`
const STUB_PRELUDE: &str = r#"#!/bin/sh
out=""
find_out() {
  while [ $# -gt 0 ]; do
    case "$1" in
      -o) out="$2"; shift ;;
      -o=*) out="${1#-o=}" ;;
    esac
    shift
  done
}
find_out "$@"
"#;

/// Test environment with a fake SDK and isolated config
pub struct TestEnvironment {
    /// Temporary directory holding everything
    pub temp_dir: TempDir,
    /// Fake SDK install root
    pub sdk_root: PathBuf,
    /// Path handed to the binary as `SPV_EMBED_CONFIG` once written
    pub config_path: PathBuf,
}

impl TestEnvironment {
    /// Create a new isolated test environment
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let sdk_root = temp_dir.path().join("sdk");
        fs::create_dir_all(sdk_root.join("bin")).expect("Failed to create sdk directory");
        let config_path = temp_dir.path().join("config.toml");

        Self {
            temp_dir,
            sdk_root,
            config_path,
        }
    }

    /// Path inside the temp directory
    pub fn path(&self, rel: &str) -> PathBuf {
        self.temp_dir.path().join(rel)
    }

    /// Path inside the temp directory as a command line argument
    pub fn arg(&self, rel: &str) -> String {
        self.path(rel).to_string_lossy().into_owned()
    }

    /// Install a stub compiler; `body` runs after `$out` is set
    pub fn install_compiler(&self, body: &str) -> PathBuf {
        let path = self.sdk_root.join("bin").join(COMPILER_NAME);
        fs::write(&path, format!("{STUB_PRELUDE}{body}\n")).expect("Failed to write stub compiler");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
            .expect("Failed to make stub compiler executable");
        path
    }

    /// Stub compiler writing `bytes` to the declared output
    pub fn install_compiler_writing(&self, bytes: &[u8]) -> PathBuf {
        let escaped: String = bytes.iter().map(|b| format!("\\{:03o}", b)).collect();
        self.install_compiler(&format!("printf '{escaped}' > \"$out\""))
    }

    /// Write a test config file
    pub fn write_config(&self, content: &str) {
        fs::write(&self.config_path, content).expect("Failed to write test config");
    }

    /// Command for the binary with the fake SDK selected
    pub fn command(&self, args: &[&str]) -> Command {
        self.command_os(args)
    }

    /// Like `command`, for arguments that may not be UTF-8
    pub fn command_os<S: AsRef<OsStr>>(&self, args: &[S]) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_spv-embed"));
        cmd.args(args)
            .env("VULKAN_SDK", &self.sdk_root)
            .env_remove("SPV_EMBED_CONFIG")
            .env_remove("RUST_LOG");
        if self.config_path.exists() {
            cmd.env("SPV_EMBED_CONFIG", &self.config_path);
        }
        cmd
    }

    /// Run the binary with the fake SDK selected
    pub fn run(&self, args: &[&str]) -> RunResult {
        run_command(&mut self.command(args))
    }

    /// Like `run`, for arguments that may not be UTF-8
    pub fn run_os<S: AsRef<OsStr>>(&self, args: &[S]) -> RunResult {
        run_command(&mut self.command_os(args))
    }

    /// Read a generated header
    pub fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.path(rel)).expect("Failed to read output")
    }
}

impl Default for TestEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

/// Captured result of one binary run
pub struct RunResult {
    pub output: Output,
}

impl RunResult {
    pub fn code(&self) -> Option<i32> {
        self.output.status.code()
    }

    pub fn success(&self) -> bool {
        self.output.status.success()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }
}

/// Run a command, retrying while a freshly written stub is still busy
pub fn run_command(cmd: &mut Command) -> RunResult {
    let mut attempts = 0;
    loop {
        let output = cmd.output().expect("Failed to run spv-embed");
        attempts += 1;
        let busy = String::from_utf8_lossy(&output.stderr).contains("Text file busy");
        if !busy || attempts >= 5 {
            return RunResult { output };
        }
        std::thread::sleep(std::time::Duration::from_millis(50));
    }
}

/// Assert that `path` does not exist
pub fn assert_absent(path: &Path) {
    assert!(!path.exists(), "{:?} should not exist", path);
}
