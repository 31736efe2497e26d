//! Git process execution
//!
//! [`GitRunner`] is the only place a `git` child process is started. The
//! locator talks to it so tests can count or fake invocations.

use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

use gof_core::QueryMode;

/// Captured result of a finished git process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitOutput {
    /// Whether the process exited with status 0
    pub success: bool,
    /// Exit code, if the process was not terminated by a signal
    pub code: Option<i32>,
    /// Standard output, lossily decoded
    pub stdout: String,
}

impl GitOutput {
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            success: true,
            code: Some(0),
            stdout: stdout.into(),
        }
    }

    pub fn failure(code: i32) -> Self {
        Self {
            success: false,
            code: Some(code),
            stdout: String::new(),
        }
    }
}

/// Runs `git rev-parse <mode>` in a working directory.
#[cfg_attr(test, mockall::automock)]
pub trait GitRunner {
    /// Run the query in `dir`, blocking until git exits.
    ///
    /// `Err` means the process could not be started at all.
    fn rev_parse(&self, dir: &Path, mode: QueryMode) -> io::Result<GitOutput>;
}

/// Spawns the real git executable.
#[derive(Debug, Clone)]
pub struct SystemGit {
    binary: String,
}

impl SystemGit {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }
}

impl Default for SystemGit {
    fn default() -> Self {
        Self::new("git")
    }
}

impl GitRunner for SystemGit {
    fn rev_parse(&self, dir: &Path, mode: QueryMode) -> io::Result<GitOutput> {
        tracing::debug!("running {} rev-parse {} in {}", self.binary, mode, dir.display());

        // stderr is discarded: "not a git repository" is an expected outcome
        let output = Command::new(&self.binary)
            .args(["rev-parse", mode.as_arg()])
            .current_dir(dir)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()?;

        Ok(GitOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        })
    }
}

impl<T: GitRunner + ?Sized> GitRunner for &T {
    fn rev_parse(&self, dir: &Path, mode: QueryMode) -> io::Result<GitOutput> {
        (**self).rev_parse(dir, mode)
    }
}
