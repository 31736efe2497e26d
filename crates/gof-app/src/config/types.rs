//! Configuration types for git-open-file
//!
//! Defines:
//! - `Settings` - Global settings (config.toml)
//! - `EditorSettings`, `GitSettings`, `BehaviorSettings` - its sections
//! - `ParentIde` - IDE detected from the terminal environment

use gof_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Application settings (config.toml)
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub editor: EditorSettings,

    #[serde(default)]
    pub git: GitSettings,

    #[serde(default)]
    pub behavior: BehaviorSettings,
}

impl Settings {
    /// Reject settings that parse but cannot work.
    pub fn validate(&self) -> Result<()> {
        if self.git.binary.trim().is_empty() {
            return Err(Error::config_invalid("[git] binary must not be empty"));
        }
        if let Some(args) = &self.editor.open_args {
            if !args.iter().any(|a| a.contains("$FILE")) {
                return Err(Error::config_invalid("[editor] open_args must contain $FILE"));
            }
        }
        Ok(())
    }
}

/// Behavior settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BehaviorSettings {
    /// Open files as transient (preview) views
    #[serde(default = "default_true")]
    pub transient: bool,

    /// Log a warning when the file to open does not exist yet
    #[serde(default = "default_true")]
    pub warn_missing_target: bool,
}

impl Default for BehaviorSettings {
    fn default() -> Self {
        Self {
            transient: true,
            warn_missing_target: true,
        }
    }
}

/// Git settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GitSettings {
    /// Git executable, searched on PATH unless it is a path
    #[serde(default = "default_git_binary")]
    pub binary: String,
}

impl Default for GitSettings {
    fn default() -> Self {
        Self {
            binary: default_git_binary(),
        }
    }
}

fn default_git_binary() -> String {
    "git".to_string()
}

fn default_true() -> bool {
    true
}

// ─────────────────────────────────────────────────────────────────────────────
// Editor Settings
// ─────────────────────────────────────────────────────────────────────────────

/// Editor integration settings.
///
/// Argument lists are templates. Placeholders: `$FILE`, `$SYNTAX`,
/// `$SYNTAX_JSON` (`{"syntax":"..."}`), `$NVIM` (the `NVIM` server socket).
/// Unset lists fall back to the known defaults for `command`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct EditorSettings {
    /// Editor command or name (e.g., "subl", "code", "nvim").
    /// If empty, attempts auto-detection.
    #[serde(default)]
    pub command: String,

    /// Arguments for opening a file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_args: Option<Vec<String>>,

    /// Extra arguments, placed first, when opening a transient view
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transient_args: Option<Vec<String>>,

    /// Arguments for assigning a syntax to the opened file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub syntax_args: Option<Vec<String>>,

    /// Wait for the editor to exit (terminal editors)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wait: Option<bool>,
}

/// Detected parent IDE when running in an integrated terminal.
///
/// Used to open files in the *current* IDE instance rather than
/// spawning a new window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentIde {
    VSCode,
    VSCodeInsiders,
    Cursor,
    Zed,
    IntelliJ,
    AndroidStudio,
    Neovim,
}

impl ParentIde {
    /// Display name for the IDE.
    pub fn display_name(&self) -> &'static str {
        match self {
            ParentIde::VSCode => "VS Code",
            ParentIde::VSCodeInsiders => "VS Code Insiders",
            ParentIde::Cursor => "Cursor",
            ParentIde::Zed => "Zed",
            ParentIde::IntelliJ => "IntelliJ IDEA",
            ParentIde::AndroidStudio => "Android Studio",
            ParentIde::Neovim => "Neovim",
        }
    }
}
