//! Git executable availability
//!
//! A missing git binary makes every lookup answer "no repository", which is
//! indistinguishable from a file outside any checkout. This check lets the
//! front end tell the two apart.

use std::path::PathBuf;

use gof_core::prelude::*;

/// Where (and whether) the configured git executable was found
#[derive(Debug, Clone, Default)]
pub struct GitAvailability {
    /// Whether the executable was found
    pub available: bool,

    /// Resolved path of the executable
    pub path: Option<PathBuf>,
}

impl GitAvailability {
    /// Look up `binary` (a name searched on `PATH`, or a path).
    pub fn check(binary: &str) -> Self {
        match which::which(binary) {
            Ok(path) => {
                debug!("git executable: {}", path.display());
                Self {
                    available: true,
                    path: Some(path),
                }
            }
            Err(e) => {
                debug!("git executable '{}' not found: {}", binary, e);
                Self::default()
            }
        }
    }

    /// Error for an unavailable executable, `Ok` otherwise.
    pub fn require(&self, binary: &str) -> Result<()> {
        if self.available {
            Ok(())
        } else {
            Err(Error::git_not_found(binary))
        }
    }

    /// User-facing hint when git is unavailable
    pub fn unavailable_message(&self) -> Option<&'static str> {
        if self.available {
            None
        } else {
            Some("git not found. Install git or set [git] binary in config.toml.")
        }
    }
}
