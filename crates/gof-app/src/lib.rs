//! gof-app - Settings, editor integration and the open-file command
//!
//! Ties the repository lookup in `gof-git` to a host editor: the command
//! checks that the active file sits in a repository, then opens a file
//! relative to that repository through a [`HostEditor`].

pub mod command;
pub mod config;
pub mod editor;

// Re-export primary types
pub use command::{Applicability, GitOpenFileCommand, OpenOutcome, RepoContext};
pub use config::Settings;
pub use editor::{CommandEditor, HostEditor, OpenFlags, StdoutEditor, ViewHandle};
