//! Shared integration-test harness for running the `knitrow` binary
//! against a throwaway store.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// A scratch directory holding one store file.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    /// Creates an empty workspace.
    #[allow(clippy::missing_panics_doc)]
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("failed to create temp dir"),
        }
    }

    /// Directory of the workspace.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path of the store file used by [`Workspace::run`].
    pub fn store(&self) -> PathBuf {
        self.dir.path().join("knitrow.json")
    }

    /// Runs `knitrow` with `args` against this workspace's store.
    pub fn run(&self, args: &[&str]) -> Output {
        let store = self.store();
        let mut full = vec!["--store", store.to_str().expect("utf-8 temp path")];
        full.extend_from_slice(args);
        Self::spawn_command(&full)
    }

    /// Runs `knitrow` with exactly `args` and a clean environment.
    pub fn spawn_command(args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_knitrow"))
            .args(args)
            .env_remove("KNITROW_STORE")
            .env_remove("KNITROW_CONFIG")
            .env_remove("KNITROW_COLOR")
            .env_remove("KNITROW_LOG_FORMAT")
            .env_remove("KNITROW_LOG_LEVEL")
            .output()
            .expect("failed to run knitrow")
    }
}

/// Stdout of a finished command as text.
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Stderr of a finished command as text.
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// Asserts success, printing stderr on failure.
#[track_caller]
pub fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "command failed with {:?}: {}",
        output.status.code(),
        stderr(output)
    );
}
