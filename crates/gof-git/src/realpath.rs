//! Symlink resolution for file paths
//!
//! The resolution strategy is chosen once per process and hidden behind
//! [`realpath`]. On Windows `std::fs::canonicalize` returns verbatim
//! (`\\?\C:\...`) paths that git and most editors reject, so the final path
//! name is obtained through `dunce` instead, which strips the prefix whenever
//! the result is an ordinary drive path.

use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::OnceLock;

/// How symbolic links are resolved on this host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RealPathStrategy {
    /// `std::fs::canonicalize`
    Canonicalize,
    /// Final path name with the verbatim prefix stripped (`dunce`)
    FinalPathName,
}

impl RealPathStrategy {
    /// Pick the strategy for the current platform.
    pub fn detect() -> Self {
        if cfg!(windows) {
            RealPathStrategy::FinalPathName
        } else {
            RealPathStrategy::Canonicalize
        }
    }

    fn resolve(self, path: &Path) -> io::Result<PathBuf> {
        match self {
            RealPathStrategy::Canonicalize => std::fs::canonicalize(path),
            RealPathStrategy::FinalPathName => dunce::canonicalize(path),
        }
    }
}

static STRATEGY: OnceLock<RealPathStrategy> = OnceLock::new();

/// The strategy selected for this process.
pub fn strategy() -> RealPathStrategy {
    *STRATEGY.get_or_init(|| {
        let strategy = RealPathStrategy::detect();
        tracing::debug!("realpath strategy: {:?}", strategy);
        strategy
    })
}

/// Resolve symlinks and return the real, absolute path.
///
/// - An empty path is returned unchanged.
/// - A path that does not exist is not an error: its existing prefix is
///   resolved, `..` components are applied to what has been resolved so far,
///   and the missing components are appended.
/// - Any other I/O failure is returned to the caller.
pub fn realpath(path: &Path) -> io::Result<PathBuf> {
    realpath_with(strategy(), path)
}

/// [`realpath`] with an explicit strategy.
pub fn realpath_with(strategy: RealPathStrategy, path: &Path) -> io::Result<PathBuf> {
    if path.as_os_str().is_empty() {
        return Ok(path.to_path_buf());
    }

    match strategy.resolve(path) {
        Ok(resolved) => Ok(resolved),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::trace!("{} does not exist, resolving existing ancestor", path.display());
            Ok(resolve_missing(strategy, path))
        }
        Err(e) => Err(e),
    }
}

fn resolve_missing(strategy: RealPathStrategy, path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());

    // Walk left to right: existing prefixes are resolved, `..` pops the last
    // resolved component, missing components are kept as written.
    let mut resolved = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => resolved.push(component),
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            Component::Normal(name) => {
                resolved.push(name);
                if let Ok(real) = strategy.resolve(&resolved) {
                    resolved = real;
                }
            }
        }
    }

    resolved
}
