//! Test environment builder for isolated restack testing.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tempfile::TempDir;

/// Result of running a restack CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

/// Isolated source tree in a temp directory, with CLI command helpers.
///
/// Environment overrides are stripped from every run so ambient `RESTACK_*`
/// variables can't leak into assertions.
pub struct TestEnv {
    pub source_root: TempDir,
    bin: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            source_root: TempDir::new().expect("create temp source root"),
            bin: PathBuf::from(env!("CARGO_BIN_EXE_restack")),
        }
    }

    /// Get path relative to the source root
    pub fn path(&self, relative: &str) -> PathBuf {
        self.source_root.path().join(relative)
    }

    /// Write a file under the source root, creating parent directories
    pub fn write(&self, relative: &str, content: &str) {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent dirs");
        }
        std::fs::write(path, content).expect("write fixture file");
    }

    /// Run restack with empty stdin
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_stdin(args, "")
    }

    /// Run restack with the given text piped to stdin
    pub fn run_with_stdin(&self, args: &[&str], stdin: &str) -> TestResult {
        self.run_from(self.source_root.path(), args, stdin)
    }

    fn run_from(&self, cwd: &Path, args: &[&str], stdin: &str) -> TestResult {
        let mut child = Command::new(&self.bin)
            .args(args)
            .current_dir(cwd)
            .env_remove("RESTACK_ENVIRONMENT")
            .env_remove("RESTACK_ACCOUNT_ID")
            .env_remove("RESTACK_REGION")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("spawn restack");

        child
            .stdin
            .as_mut()
            .expect("child stdin")
            .write_all(stdin.as_bytes())
            .expect("write child stdin");

        let output = child.wait_with_output().expect("wait for restack");

        TestResult {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
