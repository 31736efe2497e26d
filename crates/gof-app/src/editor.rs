//! Host editor integration
//!
//! [`HostEditor`] is the editor as seen by the open-file command: it opens a
//! file, optionally as a transient (preview) view, and assigns a syntax to
//! the view it opened. [`CommandEditor`] drives a command-line editor,
//! [`StdoutEditor`] only prints the target.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use gof_core::prelude::*;
use serde::Serialize;

use crate::config::{EditorSettings, ResolvedEditor};

// ─────────────────────────────────────────────────────────────────────────────
// Types
// ─────────────────────────────────────────────────────────────────────────────

/// How a file should be opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OpenFlags {
    /// Preview-style view, replaced by the next transient open
    pub transient: bool,
}

impl OpenFlags {
    pub const TRANSIENT: Self = Self { transient: true };
}

/// Handle to a view opened by a [`HostEditor`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewHandle {
    /// Per-editor sequence number
    pub id: u64,
    /// File shown in the view
    pub path: PathBuf,
    /// Display name of the editor that owns the view
    pub editor: String,
}

/// The editor hosting the open-file command.
#[cfg_attr(test, mockall::automock)]
pub trait HostEditor {
    /// Open `path`, creating the view. A missing file is the editor's
    /// business.
    fn open_file(&mut self, path: &Path, flags: OpenFlags) -> Result<ViewHandle>;

    /// Assign the syntax profile `syntax` to `view`.
    fn assign_syntax(&mut self, view: &ViewHandle, syntax: &str) -> Result<()>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Command-line editors
// ─────────────────────────────────────────────────────────────────────────────

/// Launches a resolved command-line editor.
///
/// Launches are ordered: a detached launcher must exit before the next
/// command starts, so a syntax command reaches the editor after the open it
/// belongs to.
#[derive(Debug)]
pub struct CommandEditor {
    editor: ResolvedEditor,
    next_id: u64,
    pending: Option<Child>,
}

impl CommandEditor {
    pub fn new(editor: ResolvedEditor) -> Self {
        Self {
            editor,
            next_id: 1,
            pending: None,
        }
    }

    /// Editor from settings, falling back to auto-detection.
    pub fn from_settings(settings: &EditorSettings) -> Result<Self> {
        let editor = settings.resolve().ok_or(Error::NoEditor)?;
        info!("Using editor {} ({})", editor.display_name, editor.command);
        Ok(Self::new(editor))
    }

    pub fn editor(&self) -> &ResolvedEditor {
        &self.editor
    }

    /// Arguments used to open `path`.
    pub fn open_command_args(&self, path: &Path, flags: OpenFlags) -> Vec<String> {
        let mut args = Vec::new();
        if flags.transient {
            args.extend(substitute_args(&self.editor.transient_args, path, None));
        }
        args.extend(substitute_args(&self.editor.open_args, path, None));
        args
    }

    /// Arguments used to assign `syntax` to the view showing `path`, if the
    /// editor supports it.
    pub fn syntax_command_args(&self, path: &Path, syntax: &str) -> Option<Vec<String>> {
        if self.editor.syntax_args.is_empty() {
            return None;
        }
        Some(substitute_args(&self.editor.syntax_args, path, Some(syntax)))
    }

    fn launch(&mut self, args: &[String], wait: bool) -> Result<()> {
        self.wait_pending()?;

        let program = &self.editor.command;
        debug!("Launching {} {:?}", program, args);

        let mut command = Command::new(program);
        command.args(args);

        if wait {
            let status = command
                .status()
                .map_err(|e| Error::editor_launch(program, e.to_string()))?;
            if !status.success() {
                return Err(Error::editor_launch(program, format!("exited with {}", status)));
            }
        } else {
            // GUI editors (and their CLI shims) keep running in the background
            let child = command
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn()
                .map_err(|e| Error::editor_launch(program, e.to_string()))?;
            self.pending = Some(child);
        }

        Ok(())
    }

    /// Wait for the last detached launcher to exit.
    fn wait_pending(&mut self) -> Result<()> {
        let Some(mut child) = self.pending.take() else {
            return Ok(());
        };

        let program = &self.editor.command;
        let status = child
            .wait()
            .map_err(|e| Error::editor_launch(program, e.to_string()))?;
        if !status.success() {
            return Err(Error::editor_launch(program, format!("exited with {}", status)));
        }
        Ok(())
    }
}

impl HostEditor for CommandEditor {
    fn open_file(&mut self, path: &Path, flags: OpenFlags) -> Result<ViewHandle> {
        let args = self.open_command_args(path, flags);
        // Terminal editors take over the terminal until they exit
        self.launch(&args, self.editor.wait)?;

        let view = ViewHandle {
            id: self.next_id,
            path: path.to_path_buf(),
            editor: self.editor.display_name.clone(),
        };
        self.next_id += 1;
        Ok(view)
    }

    fn assign_syntax(&mut self, view: &ViewHandle, syntax: &str) -> Result<()> {
        let args = self
            .syntax_command_args(&view.path, syntax)
            .ok_or_else(|| Error::syntax_unsupported(&self.editor.display_name))?;
        self.launch(&args, true)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Print-only editor
// ─────────────────────────────────────────────────────────────────────────────

/// Writes the path of every opened file to a writer instead of launching an
/// editor. Syntax assignments are accepted and ignored.
#[derive(Debug)]
pub struct StdoutEditor<W = io::Stdout> {
    out: W,
    next_id: u64,
}

impl StdoutEditor<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> StdoutEditor<W> {
    pub fn new(out: W) -> Self {
        Self { out, next_id: 1 }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> HostEditor for StdoutEditor<W> {
    fn open_file(&mut self, path: &Path, _flags: OpenFlags) -> Result<ViewHandle> {
        writeln!(self.out, "{}", path.display())?;
        self.out.flush()?;

        let view = ViewHandle {
            id: self.next_id,
            path: path.to_path_buf(),
            editor: "stdout".to_string(),
        };
        self.next_id += 1;
        Ok(view)
    }

    fn assign_syntax(&mut self, view: &ViewHandle, syntax: &str) -> Result<()> {
        debug!("Not assigning syntax {} to {}", syntax, view.path.display());
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Argument Substitution
// ─────────────────────────────────────────────────────────────────────────────

/// Substitute placeholders in each argument template.
///
/// Substitution happens per argument, so a path containing spaces stays a
/// single argument.
///
/// # Variables
///
/// - `$FILE` - File path
/// - `$SYNTAX` - Syntax identifier (empty when absent)
/// - `$SYNTAX_JSON` - `{"syntax":"<identifier>"}`
/// - `$NVIM` - Neovim server address from the `NVIM` environment variable
pub fn substitute_args(templates: &[String], file: &Path, syntax: Option<&str>) -> Vec<String> {
    let file_str = file.display().to_string();
    let syntax = syntax.unwrap_or_default();
    let syntax_json = serde_json::json!({ "syntax": syntax }).to_string();
    let nvim = std::env::var("NVIM").unwrap_or_default();

    // `$SYNTAX_JSON` before `$SYNTAX`: longest name wins
    let values = [
        ("$SYNTAX_JSON", syntax_json.as_str()),
        ("$SYNTAX", syntax),
        ("$NVIM", nvim.as_str()),
        ("$FILE", file_str.as_str()),
    ];

    templates
        .iter()
        .map(|template| expand_placeholders(template, &values))
        .collect()
}

/// Replace placeholders in one pass; substituted text is never rescanned.
fn expand_placeholders(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        match values.iter().find(|(name, _)| tail.starts_with(name)) {
            Some((name, value)) => {
                out.push_str(value);
                rest = &tail[name.len()..];
            }
            None => {
                out.push('$');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
