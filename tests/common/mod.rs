//! Shared test infrastructure for integration tests.

use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Temporary directory holding input, expected-output, and config files.
pub struct Fixture {
    dir: TempDir,
}

/// Captured result of one `cgh` invocation.
#[derive(Debug)]
pub struct CghRun {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    #[allow(dead_code)]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `contents` to `name` inside the fixture and return its path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, contents).expect("write fixture file");
        path
    }

    /// Run the `cgh` binary from the fixture directory (binary tests only).
    #[allow(dead_code)]
    pub fn cgh(&self, args: &[&str]) -> CghRun {
        let output = Command::new(env!("CARGO_BIN_EXE_cgh"))
            .args(args)
            .current_dir(self.dir.path())
            .output()
            .expect("run cgh");
        CghRun {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}
