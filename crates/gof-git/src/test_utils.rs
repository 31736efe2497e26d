//! Test utilities for git lookups
//!
//! Provides a scripted [`GitRunner`] and helpers for creating real
//! repositories in temporary directories.

use std::cell::RefCell;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use gof_core::QueryMode;
use tempfile::TempDir;

use crate::runner::{GitOutput, GitRunner};

/// A [`GitRunner`] answering from a table instead of spawning git.
///
/// Modes without an answer behave like a directory outside any repository
/// (exit status 128). Every call is recorded.
#[derive(Debug, Default)]
pub struct FakeGit {
    answers: HashMap<QueryMode, String>,
    calls: RefCell<Vec<(PathBuf, QueryMode)>>,
}

impl FakeGit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `mode` with `stdout` (a trailing newline is added, like git).
    pub fn answer(mut self, mode: QueryMode, stdout: impl AsRef<str>) -> Self {
        self.answers.insert(mode, format!("{}\n", stdout.as_ref()));
        self
    }

    /// Answer `--show-toplevel` with `root`.
    pub fn repo(root: impl AsRef<Path>) -> Self {
        Self::new().answer(QueryMode::ShowToplevel, root.as_ref().to_string_lossy())
    }

    /// Recorded `(working directory, mode)` pairs.
    pub fn calls(&self) -> Vec<(PathBuf, QueryMode)> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl GitRunner for FakeGit {
    fn rev_parse(&self, dir: &Path, mode: QueryMode) -> io::Result<GitOutput> {
        self.calls.borrow_mut().push((dir.to_path_buf(), mode));
        Ok(match self.answers.get(&mode) {
            Some(stdout) => GitOutput::success(stdout.clone()),
            None => GitOutput::failure(128),
        })
    }
}

/// Run git in `dir`, panicking on failure.
pub fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to run git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Create a repository in a fresh temporary directory.
///
/// Returns the guard and the canonical repository root (on macOS the
/// temporary directory lives behind the `/var -> /private/var` symlink,
/// while git reports the resolved path).
pub fn temp_repo() -> (TempDir, PathBuf) {
    let temp = TempDir::new().expect("failed to create temp dir");
    let root = dunce::canonicalize(temp.path()).expect("failed to canonicalize temp dir");
    git(&root, &["init", "--quiet"]);
    (temp, root)
}

/// A temporary directory that is not inside any repository.
///
/// Returns the guard and the canonical path.
pub fn temp_dir() -> (TempDir, PathBuf) {
    let temp = TempDir::new().expect("failed to create temp dir");
    let root = dunce::canonicalize(temp.path()).expect("failed to canonicalize temp dir");
    (temp, root)
}

/// Write `contents` to `root/relative`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, contents: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("failed to create parent dirs");
    }
    std::fs::write(&path, contents).expect("failed to write file");
    path
}
