//! The open-file command
//!
//! Two steps: [`GitOpenFileCommand::check`] decides whether the command
//! applies to the active file and returns the repository it found;
//! [`GitOpenFileCommand::run`] takes that result and opens the requested file
//! relative to the repository. The root travels from one step to the next in
//! a [`RepoContext`], so execution always works on the file the check saw.

use std::path::{Path, PathBuf};

use gof_core::prelude::*;
use gof_core::{OpenFileArgs, QueryMode};
use gof_git::{GitRunner, RepoLocator, SystemGit};
use serde::Serialize;

use crate::config::BehaviorSettings;
use crate::editor::{HostEditor, OpenFlags, ViewHandle};

/// Repository found for an active file by the applicability check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoContext {
    /// The file the check ran against
    pub active_file: PathBuf,
    /// Top-level working directory of its repository
    pub root: PathBuf,
}

/// Whether the command applies to the active file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applicability {
    Enabled(RepoContext),
    Disabled,
}

impl Applicability {
    pub fn is_enabled(&self) -> bool {
        matches!(self, Applicability::Enabled(_))
    }

    pub fn context(&self) -> Option<&RepoContext> {
        match self {
            Applicability::Enabled(ctx) => Some(ctx),
            Applicability::Disabled => None,
        }
    }
}

/// What an execution did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpenOutcome {
    /// Root the file name was joined onto
    pub root: PathBuf,
    /// Query that produced `root`
    pub mode: QueryMode,
    /// Path handed to the editor
    pub target: PathBuf,
    /// Whether `target` existed when it was opened
    pub target_exists: bool,
    /// View returned by the editor
    pub view: ViewHandle,
    /// Syntax requested for the view
    pub syntax: Option<String>,
    /// Whether the editor accepted the syntax
    pub syntax_assigned: bool,
}

/// Opens files relative to the repository of the active file.
#[derive(Debug, Clone)]
pub struct GitOpenFileCommand<R = SystemGit> {
    locator: RepoLocator<R>,
    behavior: BehaviorSettings,
}

impl<R: GitRunner> GitOpenFileCommand<R> {
    pub fn new(locator: RepoLocator<R>, behavior: BehaviorSettings) -> Self {
        Self { locator, behavior }
    }

    /// Applicability check: enabled iff the active file lies in a repository.
    pub fn check(&self, active_file: Option<&Path>) -> Result<Applicability> {
        let Some(active) = active_file else {
            return Ok(Applicability::Disabled);
        };

        Ok(match self.locator.toplevel(Some(active))? {
            Some(root) => {
                debug!("{} is in repository {}", active.display(), root.display());
                Applicability::Enabled(RepoContext {
                    active_file: active.to_path_buf(),
                    root,
                })
            }
            None => {
                debug!("{} is not in a repository", active.display());
                Applicability::Disabled
            }
        })
    }

    /// Boolean form of [`check`](Self::check); errors count as disabled.
    pub fn is_enabled(&self, active_file: Option<&Path>) -> bool {
        match self.check(active_file) {
            Ok(applicability) => applicability.is_enabled(),
            Err(e) => {
                warn!("Applicability check failed: {}", e);
                false
            }
        }
    }

    /// Open `args.file` relative to the repository in `ctx`.
    ///
    /// With `args.rev_parse_arg` set, the root is queried again with that mode
    /// for `ctx.active_file` instead of using `ctx.root`.
    #[instrument(level = "debug", skip(self, editor))]
    pub fn run(
        &self,
        ctx: &RepoContext,
        args: &OpenFileArgs,
        editor: &mut dyn HostEditor,
    ) -> Result<OpenOutcome> {
        let (root, mode) = match args.rev_parse_arg {
            Some(mode) => {
                let root = self
                    .locator
                    .locate(Some(&ctx.active_file), mode)?
                    .ok_or_else(|| Error::no_repository(&ctx.active_file, mode.as_arg()))?;
                (root, mode)
            }
            None => (ctx.root.clone(), QueryMode::ShowToplevel),
        };

        let target = root.join(&args.file);
        let target_exists = target.exists();
        if !target_exists && self.behavior.warn_missing_target {
            // The editor decides what opening a missing file means
            warn!("{} does not exist, opening anyway", target.display());
        }

        let flags = OpenFlags {
            transient: self.behavior.transient,
        };
        let view = editor
            .open_file(&target, flags)
            .with_context(|| format!("Failed to open {}", target.display()))?;
        info!("Opened {} (view {})", target.display(), view.id);

        let mut syntax_assigned = false;
        if let Some(syntax) = &args.syntax {
            match editor.assign_syntax(&view, syntax) {
                Ok(()) => syntax_assigned = true,
                Err(e) if e.is_recoverable() => warn!("Syntax not assigned: {}", e),
                Err(e) => return Err(e),
            }
        }

        Ok(OpenOutcome {
            root,
            mode,
            target,
            target_exists,
            view,
            syntax: args.syntax.clone(),
            syntax_assigned,
        })
    }

    /// Check, then run when enabled. `Ok(None)` means the command did not
    /// apply to the active file.
    pub fn invoke(
        &self,
        active_file: Option<&Path>,
        args: &OpenFileArgs,
        editor: &mut dyn HostEditor,
    ) -> Result<Option<OpenOutcome>> {
        match self.check(active_file)? {
            Applicability::Enabled(ctx) => self.run(&ctx, args, editor).map(Some),
            Applicability::Disabled => Ok(None),
        }
    }
}
