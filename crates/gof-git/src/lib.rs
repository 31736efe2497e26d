//! # gof-git - Path Resolution and Git Lookups
//!
//! Resolves symbolic links and asks `git rev-parse` for repository paths.
//!
//! Depends on [`gof_core`] for the error type and [`QueryMode`](gof_core::QueryMode).
//!
//! ## Public API
//!
//! ### Path Resolution
//! - [`realpath()`] - Canonical absolute path, tolerant of missing files
//! - [`RealPathStrategy`] - Platform strategy, selected once per process
//!
//! ### Repository Lookup
//! - [`RepoLocator`] - `git rev-parse <mode>` for a file's directory
//! - [`GitRunner`] - Process seam; [`SystemGit`] spawns the real executable
//! - [`GitAvailability`] - Whether the configured git can be found on `PATH`

pub mod realpath;
pub mod rev_parse;
pub mod runner;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_utils;
pub mod tool_availability;

pub use realpath::{realpath, realpath_with, RealPathStrategy};
pub use rev_parse::RepoLocator;
pub use runner::{GitOutput, GitRunner, SystemGit};
pub use tool_availability::GitAvailability;
