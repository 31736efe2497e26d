//! Invocation arguments for the open-file command
//!
//! Arguments arrive either from the command line or as a JSON object shaped
//! like an editor key binding:
//!
//! ```json
//! { "file": ".gitignore", "rev_parse_arg": "--absolute-git-dir", "syntax": "Git Ignore" }
//! ```
//!
//! `rev_parse_arg` may also be `false`, `null` or `""`, all meaning "use the
//! top-level working directory found by the applicability check". An empty
//! `syntax` means no syntax.

use serde::{Deserialize, Deserializer, Serialize};
use std::path::PathBuf;

use crate::error::Result;
use crate::query::QueryMode;

/// Arguments of a single open-file invocation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OpenFileArgs {
    /// File to open, relative to the resolved root.
    pub file: PathBuf,

    /// Alternate root query. `None` uses the cached top-level root.
    #[serde(default, deserialize_with = "deserialize_rev_parse_arg")]
    pub rev_parse_arg: Option<QueryMode>,

    /// Syntax profile to assign to the opened view.
    #[serde(default, deserialize_with = "deserialize_syntax")]
    pub syntax: Option<String>,
}

impl OpenFileArgs {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            rev_parse_arg: None,
            syntax: None,
        }
    }

    pub fn with_rev_parse_arg(mut self, mode: QueryMode) -> Self {
        self.rev_parse_arg = Some(mode);
        self
    }

    pub fn with_syntax(mut self, syntax: impl Into<String>) -> Self {
        self.syntax = Some(syntax.into());
        self
    }

    /// Build from raw string arguments, validating the query mode.
    ///
    /// An empty `rev_parse_arg` is treated as absent.
    pub fn from_raw(
        file: impl Into<PathBuf>,
        rev_parse_arg: Option<&str>,
        syntax: Option<String>,
    ) -> Result<Self> {
        let rev_parse_arg = match rev_parse_arg {
            Some(arg) if !arg.is_empty() => Some(arg.parse()?),
            _ => None,
        };
        Ok(Self {
            file: file.into(),
            rev_parse_arg,
            syntax: syntax.filter(|s| !s.is_empty()),
        })
    }

    /// Parse a JSON argument object.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRevParseArg {
    Flag(bool),
    Text(String),
}

fn deserialize_rev_parse_arg<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<QueryMode>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawRevParseArg>::deserialize(deserializer)? {
        None | Some(RawRevParseArg::Flag(false)) => Ok(None),
        Some(RawRevParseArg::Flag(true)) => Err(serde::de::Error::custom(
            "rev_parse_arg must be a `git rev-parse` option or false",
        )),
        Some(RawRevParseArg::Text(arg)) if arg.is_empty() => Ok(None),
        Some(RawRevParseArg::Text(arg)) => arg
            .parse::<QueryMode>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

fn deserialize_syntax<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let syntax = Option::<String>::deserialize(deserializer)?;
    Ok(syntax.filter(|s| !s.is_empty()))
}
