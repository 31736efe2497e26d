//! Repository lookup through `git rev-parse`
//!
//! A file's repository is found by running `git rev-parse <mode>` with the
//! file's directory as working directory. "Not in a repository" is a normal
//! answer here, so every failure of the git process collapses into `None`;
//! only an invalid query mode or an unexpected path resolution failure is an
//! error.

use std::path::{Path, PathBuf};

use gof_core::prelude::*;
use gof_core::QueryMode;

use crate::realpath::realpath;
use crate::runner::{GitRunner, SystemGit};

/// Finds repository paths for files.
#[derive(Debug, Clone)]
pub struct RepoLocator<R = SystemGit> {
    runner: R,
}

impl RepoLocator<SystemGit> {
    /// Locator backed by the given git executable.
    pub fn system(binary: impl Into<String>) -> Self {
        Self::new(SystemGit::new(binary))
    }
}

impl Default for RepoLocator<SystemGit> {
    fn default() -> Self {
        Self::new(SystemGit::default())
    }
}

impl<R: GitRunner> RepoLocator<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    /// Query `mode` for the repository containing `file`.
    ///
    /// Returns `Ok(None)` without starting git when `file` is absent or
    /// empty, and `Ok(None)` when git cannot be started, exits non-zero or
    /// prints nothing. Relative output is resolved against the directory git
    /// ran in.
    #[instrument(level = "debug", skip(self))]
    pub fn locate(&self, file: Option<&Path>, mode: QueryMode) -> Result<Option<PathBuf>> {
        let Some(file) = file.filter(|p| !p.as_os_str().is_empty()) else {
            debug!("no file path, skipping git");
            return Ok(None);
        };

        let resolved = realpath(file)?;
        let Some(dir) = working_dir(&resolved) else {
            debug!("{} has no containing directory", resolved.display());
            return Ok(None);
        };

        let output = match self.runner.rev_parse(dir, mode) {
            Ok(output) => output,
            Err(e) => {
                debug!("git could not be started in {}: {}", dir.display(), e);
                return Ok(None);
            }
        };

        if !output.success {
            debug!(
                "git rev-parse {} exited with {:?} in {}",
                mode,
                output.code,
                dir.display()
            );
            return Ok(None);
        }

        let line = output.stdout.trim();
        if line.is_empty() {
            debug!("git rev-parse {} printed nothing in {}", mode, dir.display());
            return Ok(None);
        }

        let path = Path::new(line);
        let located = if path.is_absolute() {
            path.to_path_buf()
        } else {
            dir.join(path)
        };
        trace!("located {}", located.display());
        Ok(Some(located))
    }

    /// Like [`locate`](Self::locate), taking the mode as a raw flag.
    ///
    /// A flag outside the allow-list fails with
    /// [`Error::InvalidQueryMode`] before anything else happens.
    pub fn locate_arg(&self, file: Option<&Path>, arg: &str) -> Result<Option<PathBuf>> {
        let mode: QueryMode = arg.parse()?;
        self.locate(file, mode)
    }

    /// Top-level working directory of the repository containing `file`.
    pub fn toplevel(&self, file: Option<&Path>) -> Result<Option<PathBuf>> {
        self.locate(file, QueryMode::ShowToplevel)
    }
}

/// Directory git should run in for a resolved path: the path itself when it
/// is a directory, otherwise its parent.
fn working_dir(resolved: &Path) -> Option<&Path> {
    if resolved.is_dir() {
        Some(resolved)
    } else {
        resolved.parent().filter(|p| !p.as_os_str().is_empty())
    }
}
