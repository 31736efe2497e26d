//! Configuration file parsing for git-open-file
//!
//! Supports `<config_dir>/git-open-file/config.toml` (or a path given on the
//! command line) with `[editor]`, `[git]` and `[behavior]` sections.

pub mod settings;
pub mod types;

pub use settings::{
    default_config_path, detect_editor, detect_parent_ide, editor_config_for_ide,
    find_editor_config, init_settings, load_settings, EditorConfig, ResolvedEditor,
    KNOWN_EDITORS,
};
pub use types::*;
