//! `git rev-parse` query modes
//!
//! Only options that print exactly one path are accepted. Anything else is
//! rejected before a process is ever started.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// A `git rev-parse` option with a single path output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum QueryMode {
    /// `--git-dir` (may be relative to the working directory)
    GitDir,
    /// `--absolute-git-dir`
    AbsoluteGitDir,
    /// `--git-common-dir` (may be relative to the working directory)
    GitCommonDir,
    /// `--show-toplevel`
    #[default]
    ShowToplevel,
    /// `--show-superproject-working-tree` (empty outside a submodule)
    ShowSuperprojectWorkingTree,
    /// `--shared-index-path` (empty unless split index is enabled)
    SharedIndexPath,
}

impl QueryMode {
    /// Every accepted mode, in the order they are documented.
    pub const ALL: [QueryMode; 6] = [
        QueryMode::GitDir,
        QueryMode::AbsoluteGitDir,
        QueryMode::GitCommonDir,
        QueryMode::ShowToplevel,
        QueryMode::ShowSuperprojectWorkingTree,
        QueryMode::SharedIndexPath,
    ];

    /// The command-line flag passed to `git rev-parse`.
    pub fn as_arg(&self) -> &'static str {
        match self {
            QueryMode::GitDir => "--git-dir",
            QueryMode::AbsoluteGitDir => "--absolute-git-dir",
            QueryMode::GitCommonDir => "--git-common-dir",
            QueryMode::ShowToplevel => "--show-toplevel",
            QueryMode::ShowSuperprojectWorkingTree => "--show-superproject-working-tree",
            QueryMode::SharedIndexPath => "--shared-index-path",
        }
    }

    /// Comma separated list of accepted flags, for error messages.
    pub fn allowed_list() -> String {
        Self::ALL
            .iter()
            .map(|m| m.as_arg())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for QueryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_arg())
    }
}

impl FromStr for QueryMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_arg() == s)
            .ok_or_else(|| Error::InvalidQueryMode {
                arg: s.to_string(),
                allowed: Self::allowed_list(),
            })
    }
}

impl Serialize for QueryMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_arg())
    }
}

impl<'de> Deserialize<'de> for QueryMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_show_toplevel() {
        assert_eq!(QueryMode::default(), QueryMode::ShowToplevel);
        assert_eq!(QueryMode::default().as_arg(), "--show-toplevel");
    }

    #[test]
    fn test_parse_accepts_every_allowed_flag() {
        for mode in QueryMode::ALL {
            assert_eq!(mode.as_arg().parse::<QueryMode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_parse_rejects_other_rev_parse_options() {
        for arg in ["--verify", "HEAD", "--show-cdup", "show-toplevel", "", "--GIT-DIR"] {
            let err = arg.parse::<QueryMode>().unwrap_err();
            assert!(
                matches!(err, Error::InvalidQueryMode { arg: ref a, .. } if a == arg),
                "{arg:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_allowed_list_names_all_modes() {
        let list = QueryMode::allowed_list();
        assert_eq!(list.matches(", ").count(), 5);
        assert!(list.starts_with("--git-dir"));
        assert!(list.ends_with("--shared-index-path"));
    }

    #[test]
    fn test_serde_uses_flag_spelling() {
        let json = serde_json::to_string(&QueryMode::AbsoluteGitDir).unwrap();
        assert_eq!(json, "\"--absolute-git-dir\"");

        let mode: QueryMode = serde_json::from_str("\"--git-common-dir\"").unwrap();
        assert_eq!(mode, QueryMode::GitCommonDir);

        assert!(serde_json::from_str::<QueryMode>("\"--bogus\"").is_err());
    }
}
