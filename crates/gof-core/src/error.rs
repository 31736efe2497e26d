//! Application error types with rich context

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types organized by layer/domain
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // Git Errors
    // ─────────────────────────────────────────────────────────────
    #[error(
        "\"{arg}\" is not a `git rev-parse` option with a single path output \
         (expected one of: {allowed})"
    )]
    InvalidQueryMode { arg: String, allowed: String },

    #[error("No Git repository found for {} (git rev-parse {})", .path.display(), .mode)]
    NoRepository { path: PathBuf, mode: String },

    #[error("Git executable not found: {binary}")]
    GitNotFound { binary: String },

    // ─────────────────────────────────────────────────────────────
    // Editor Errors
    // ─────────────────────────────────────────────────────────────
    #[error("No editor configured or detected")]
    NoEditor,

    #[error("Failed to launch editor '{editor}': {reason}")]
    EditorLaunch { editor: String, reason: String },

    #[error("Editor '{editor}' cannot assign a syntax from the command line")]
    SyntaxUnsupported { editor: String },

    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid configuration: {message}")]
    ConfigInvalid { message: String },
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn no_repository(path: impl Into<PathBuf>, mode: impl Into<String>) -> Self {
        Self::NoRepository {
            path: path.into(),
            mode: mode.into(),
        }
    }

    pub fn git_not_found(binary: impl Into<String>) -> Self {
        Self::GitNotFound {
            binary: binary.into(),
        }
    }

    pub fn editor_launch(editor: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::EditorLaunch {
            editor: editor.into(),
            reason: reason.into(),
        }
    }

    pub fn syntax_unsupported(editor: impl Into<String>) -> Self {
        Self::SyntaxUnsupported {
            editor: editor.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::ConfigInvalid {
            message: message.into(),
        }
    }

    /// Check if this is a recoverable error
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::NoRepository { .. } | Error::SyntaxUnsupported { .. }
        )
    }

    /// Check if this error should end the invocation with a failure status
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::InvalidQueryMode { .. }
                | Error::GitNotFound { .. }
                | Error::NoEditor
                | Error::EditorLaunch { .. }
                | Error::ConfigInvalid { .. }
        )
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Context Extensions
// ─────────────────────────────────────────────────────────────────

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", context.into(), err);
            err
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", f(), err);
            err
        })
    }
}
