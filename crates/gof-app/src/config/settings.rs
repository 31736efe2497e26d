//! Settings parser for config.toml and editor detection

use super::types::{EditorSettings, ParentIde, Settings};
use gof_core::prelude::*;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.toml";
const APP_DIR: &str = "git-open-file";

// ─────────────────────────────────────────────────────────────────────────────
// Editor Detection
// ─────────────────────────────────────────────────────────────────────────────

/// Known editor configuration with argument templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorConfig {
    pub command: &'static str,
    pub open_args: &'static [&'static str],
    pub transient_args: &'static [&'static str],
    pub syntax_args: &'static [&'static str],
    pub wait: bool,
    pub display_name: &'static str,
}

const FILE_ONLY: &[&str] = &["$FILE"];
const REUSE_WINDOW: &[&str] = &["--reuse-window"];
const NONE: &[&str] = &[];

/// List of known editors.
///
/// Only Sublime Text and a Neovim server can have a syntax assigned from the
/// command line.
pub const KNOWN_EDITORS: &[EditorConfig] = &[
    EditorConfig {
        command: "subl",
        open_args: FILE_ONLY,
        transient_args: NONE,
        syntax_args: &["--command", "set_file_type $SYNTAX_JSON"],
        wait: false,
        display_name: "Sublime Text",
    },
    EditorConfig {
        command: "code",
        open_args: FILE_ONLY,
        transient_args: REUSE_WINDOW,
        syntax_args: NONE,
        wait: false,
        display_name: "Visual Studio Code",
    },
    EditorConfig {
        command: "cursor",
        open_args: FILE_ONLY,
        transient_args: REUSE_WINDOW,
        syntax_args: NONE,
        wait: false,
        display_name: "Cursor",
    },
    EditorConfig {
        command: "zed",
        open_args: FILE_ONLY,
        transient_args: NONE,
        syntax_args: NONE,
        wait: false,
        display_name: "Zed",
    },
    EditorConfig {
        command: "nvim",
        open_args: FILE_ONLY,
        transient_args: NONE,
        syntax_args: NONE,
        wait: true,
        display_name: "Neovim",
    },
    EditorConfig {
        command: "vim",
        open_args: FILE_ONLY,
        transient_args: NONE,
        syntax_args: NONE,
        wait: true,
        display_name: "Vim",
    },
    EditorConfig {
        command: "emacs",
        open_args: FILE_ONLY,
        transient_args: NONE,
        syntax_args: NONE,
        wait: true,
        display_name: "Emacs",
    },
    EditorConfig {
        command: "idea",
        open_args: FILE_ONLY,
        transient_args: NONE,
        syntax_args: NONE,
        wait: false,
        display_name: "IntelliJ IDEA",
    },
];

/// Detect if running inside an IDE's integrated terminal.
///
/// Opening a file should land in the CURRENT IDE instance rather than a new
/// window.
pub fn detect_parent_ide() -> Option<ParentIde> {
    use std::env;

    // Check TERM_PROGRAM first (most reliable)
    if let Ok(term_program) = env::var("TERM_PROGRAM") {
        match term_program.as_str() {
            "vscode" => return Some(ParentIde::VSCode),
            "vscode-insiders" => return Some(ParentIde::VSCodeInsiders),
            "cursor" => return Some(ParentIde::Cursor),
            "Zed" => return Some(ParentIde::Zed),
            _ => {}
        }
    }

    if env::var("ZED_TERM").is_ok() {
        return Some(ParentIde::Zed);
    }

    // VS Code's IPC hook (backup detection)
    if env::var("VSCODE_IPC_HOOK_CLI").is_ok() {
        return Some(ParentIde::VSCode);
    }

    if let Ok(terminal_emulator) = env::var("TERMINAL_EMULATOR") {
        if terminal_emulator.starts_with("JetBrains") {
            if let Ok(idea_dir) = env::var("IDEA_INITIAL_DIRECTORY") {
                if idea_dir.contains("AndroidStudio") {
                    return Some(ParentIde::AndroidStudio);
                }
            }
            return Some(ParentIde::IntelliJ);
        }
    }

    // Neovim's socket (running inside :terminal)
    if env::var("NVIM").is_ok() {
        return Some(ParentIde::Neovim);
    }

    None
}

/// Get the editor config for a detected parent IDE.
pub fn editor_config_for_ide(ide: ParentIde) -> EditorConfig {
    match ide {
        ParentIde::VSCode => KNOWN_EDITORS[1],
        ParentIde::VSCodeInsiders => EditorConfig {
            command: "code-insiders",
            display_name: "VS Code Insiders",
            ..KNOWN_EDITORS[1]
        },
        ParentIde::Cursor => KNOWN_EDITORS[2],
        ParentIde::Zed => KNOWN_EDITORS[3],
        ParentIde::IntelliJ => KNOWN_EDITORS[7],
        ParentIde::AndroidStudio => EditorConfig {
            command: "studio",
            display_name: "Android Studio",
            ..KNOWN_EDITORS[7]
        },
        ParentIde::Neovim => EditorConfig {
            command: "nvim",
            open_args: &["--server", "$NVIM", "--remote", "$FILE"],
            transient_args: NONE,
            syntax_args: &[
                "--server",
                "$NVIM",
                "--remote-send",
                "<C-\\><C-N>:setlocal syntax=$SYNTAX<CR>",
            ],
            wait: false,
            display_name: "Neovim",
        },
    }
}

/// Detect the user's preferred editor.
///
/// Detection order:
/// 1. **Parent IDE** - If running in an IDE's terminal, use that IDE
/// 2. $VISUAL environment variable
/// 3. $EDITOR environment variable
/// 4. Check for known editors in PATH
pub fn detect_editor() -> Option<EditorConfig> {
    use std::env;

    if let Some(ide) = detect_parent_ide() {
        debug!("Detected parent IDE: {}", ide.display_name());
        return Some(editor_config_for_ide(ide));
    }

    for var in ["VISUAL", "EDITOR"] {
        if let Ok(editor) = env::var(var) {
            let cmd = Path::new(&editor)
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or(&editor);

            if let Some(config) = find_editor_config(cmd) {
                return Some(config);
            }
        }
    }

    KNOWN_EDITORS
        .iter()
        .find(|config| is_command_available(config.command))
        .copied()
}

/// Find editor config by command name.
///
/// Matches the executable name exactly, ignoring a `.exe` suffix.
pub fn find_editor_config(cmd: &str) -> Option<EditorConfig> {
    let name = Path::new(cmd)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(cmd);
    let name = name.strip_suffix(".exe").unwrap_or(name);

    KNOWN_EDITORS.iter().find(|e| e.command == name).copied()
}

/// Check if a command is available in PATH.
fn is_command_available(cmd: &str) -> bool {
    which::which(cmd).is_ok()
}

// ─────────────────────────────────────────────────────────────────────────────
// EditorSettings Implementation
// ─────────────────────────────────────────────────────────────────────────────

/// An editor ready to launch: command plus argument templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEditor {
    pub command: String,
    pub open_args: Vec<String>,
    pub transient_args: Vec<String>,
    pub syntax_args: Vec<String>,
    pub wait: bool,
    pub display_name: String,
}

impl From<EditorConfig> for ResolvedEditor {
    fn from(config: EditorConfig) -> Self {
        let owned =
            |args: &[&str]| -> Vec<String> { args.iter().map(|a| a.to_string()).collect() };
        Self {
            command: config.command.to_string(),
            open_args: owned(config.open_args),
            transient_args: owned(config.transient_args),
            syntax_args: owned(config.syntax_args),
            wait: config.wait,
            display_name: config.display_name.to_string(),
        }
    }
}

impl EditorSettings {
    /// Resolve the effective editor.
    ///
    /// Priority order:
    /// 1. Explicitly configured command (if set)
    /// 2. Parent IDE detection (if running in an IDE terminal)
    /// 3. $VISUAL / $EDITOR environment variables
    /// 4. Known editors in PATH
    ///
    /// Argument lists set in the settings replace the defaults of the
    /// resolved editor.
    pub fn resolve(&self) -> Option<ResolvedEditor> {
        let mut resolved = if self.command.is_empty() {
            ResolvedEditor::from(detect_editor()?)
        } else {
            match find_editor_config(&self.command) {
                Some(config) => ResolvedEditor {
                    command: self.command.clone(),
                    ..ResolvedEditor::from(config)
                },
                None => ResolvedEditor {
                    command: self.command.clone(),
                    open_args: vec!["$FILE".to_string()],
                    transient_args: Vec::new(),
                    syntax_args: Vec::new(),
                    wait: false,
                    display_name: self.command.clone(),
                },
            }
        };

        if let Some(args) = &self.open_args {
            resolved.open_args = args.clone();
        }
        if let Some(args) = &self.transient_args {
            resolved.transient_args = args.clone();
        }
        if let Some(args) = &self.syntax_args {
            resolved.syntax_args = args.clone();
        }
        if let Some(wait) = self.wait {
            resolved.wait = wait;
        }

        Some(resolved)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Settings Loading
// ─────────────────────────────────────────────────────────────────────────────

/// Default settings location: `<config_dir>/git-open-file/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILENAME))
}

/// Load settings from `config_path`
///
/// Returns default settings if the file doesn't exist or can't be parsed.
pub fn load_settings(config_path: &Path) -> Settings {
    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return Settings::default();
    }

    match std::fs::read_to_string(config_path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", config_path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", config_path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", config_path, e);
            Settings::default()
        }
    }
}

/// Write a commented default config file at `config_path`
///
/// An existing file is left untouched. Returns whether a file was written.
pub fn init_settings(config_path: &Path) -> Result<bool> {
    if config_path.exists() {
        debug!("Config file {:?} already exists", config_path);
        return Ok(false);
    }

    if let Some(dir) = config_path.parent() {
        std::fs::create_dir_all(dir)
            .map_err(|e| Error::config(format!("Failed to create {:?}: {}", dir, e)))?;
    }

    let default_content = r#"# git-open-file configuration

[editor]
# Editor command (leave empty for auto-detection)
# Auto-detected from: parent IDE, $VISUAL, $EDITOR, or known editors in PATH
command = ""
# Argument templates (omit to use the defaults for the editor)
# Placeholders: $FILE, $SYNTAX, $SYNTAX_JSON, $NVIM
# Examples:
#   Sublime Text: open_args = ["$FILE"]
#                 syntax_args = ["--command", "set_file_type $SYNTAX_JSON"]
#   VS Code:      transient_args = ["--reuse-window"]
# wait = false          # Wait for the editor to exit (terminal editors)

[git]
binary = "git"

[behavior]
transient = true              # Open files as transient (preview) views
warn_missing_target = true    # Log a warning when the file does not exist
"#;
    std::fs::write(config_path, default_content)
        .map_err(|e| Error::config(format!("Failed to write {:?}: {}", config_path, e)))?;

    info!("Wrote default settings to {:?}", config_path);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::tempdir;

    const IDE_VARS: &[&str] = &[
        "TERM_PROGRAM",
        "ZED_TERM",
        "VSCODE_IPC_HOOK_CLI",
        "TERMINAL_EMULATOR",
        "IDEA_INITIAL_DIRECTORY",
        "NVIM",
    ];

    /// Runs `f` with the IDE detection variables cleared and `vars` set.
    fn with_env(vars: &[(&str, &str)], f: impl FnOnce()) {
        let saved: Vec<_> = IDE_VARS
            .iter()
            .chain(["VISUAL", "EDITOR"].iter())
            .map(|k| (*k, std::env::var_os(k)))
            .collect();
        for (key, _) in &saved {
            std::env::remove_var(key);
        }
        for (key, value) in vars {
            std::env::set_var(key, value);
        }

        f();

        for (key, value) in saved {
            match value {
                Some(v) => std::env::set_var(key, v),
                None => std::env::remove_var(key),
            }
        }
    }

    #[test]
    fn test_load_settings_defaults() {
        let temp = tempdir().unwrap();
        let settings = load_settings(&temp.path().join("config.toml"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_settings_custom() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.toml");
        let config = r#"
[editor]
command = "subl"

[git]
binary = "/opt/git/bin/git"

[behavior]
transient = false
"#;
        std::fs::write(&path, config).unwrap();

        let settings = load_settings(&path);
        assert_eq!(settings.editor.command, "subl");
        assert_eq!(settings.git.binary, "/opt/git/bin/git");
        assert!(!settings.behavior.transient);
    }

    #[test]
    fn test_load_settings_invalid_toml() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "not valid toml {{{{").unwrap();

        let settings = load_settings(&path);
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_init_settings() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("nested").join("config.toml");

        assert!(init_settings(&path).unwrap());
        assert!(path.exists());

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: Settings =
            toml::from_str(&content).expect("Default config should be valid TOML");
        assert_eq!(parsed, Settings::default());
    }

    #[test]
    fn test_init_settings_idempotent() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.toml");
        init_settings(&path).unwrap();

        std::fs::write(&path, "[behavior]\ntransient = false\n").unwrap();
        assert!(!init_settings(&path).unwrap());

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("transient = false"));
    }

    #[test]
    fn test_default_config_path_shape() {
        if let Some(path) = default_config_path() {
            assert!(path.ends_with("git-open-file/config.toml"));
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Editor Detection Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_find_editor_config_exact() {
        let config = find_editor_config("subl").unwrap();
        assert_eq!(config.display_name, "Sublime Text");
        assert!(!config.syntax_args.is_empty());
    }

    #[test]
    fn test_find_editor_config_path_and_exe() {
        assert_eq!(
            find_editor_config("/usr/local/bin/nvim").unwrap().command,
            "nvim"
        );
        assert_eq!(find_editor_config("code.exe").unwrap().command, "code");
    }

    #[test]
    fn test_find_editor_config_unknown() {
        assert!(find_editor_config("notepad").is_none());
        // "vi" must not match "vim"
        assert!(find_editor_config("vi").is_none());
    }

    #[test]
    fn test_editor_config_for_ide_neovim_uses_server() {
        let config = editor_config_for_ide(ParentIde::Neovim);
        assert!(config.open_args.contains(&"$NVIM"));
        assert!(!config.wait);
        assert!(!config.syntax_args.is_empty());
    }

    #[test]
    fn test_editor_config_for_ide_variants() {
        assert_eq!(
            editor_config_for_ide(ParentIde::VSCodeInsiders).command,
            "code-insiders"
        );
        assert_eq!(
            editor_config_for_ide(ParentIde::AndroidStudio).command,
            "studio"
        );
        assert_eq!(
            editor_config_for_ide(ParentIde::Cursor).transient_args,
            &["--reuse-window"]
        );
    }

    #[test]
    #[serial]
    fn test_detect_parent_ide_none() {
        with_env(&[], || assert_eq!(detect_parent_ide(), None));
    }

    #[test]
    #[serial]
    fn test_detect_parent_ide_term_program() {
        with_env(&[("TERM_PROGRAM", "vscode")], || {
            assert_eq!(detect_parent_ide(), Some(ParentIde::VSCode))
        });
        with_env(&[("TERM_PROGRAM", "Zed")], || {
            assert_eq!(detect_parent_ide(), Some(ParentIde::Zed))
        });
    }

    #[test]
    #[serial]
    fn test_detect_parent_ide_jetbrains() {
        with_env(
            &[
                ("TERMINAL_EMULATOR", "JetBrains-JediTerm"),
                ("IDEA_INITIAL_DIRECTORY", "/Applications/AndroidStudio.app"),
            ],
            || assert_eq!(detect_parent_ide(), Some(ParentIde::AndroidStudio)),
        );
        with_env(&[("TERMINAL_EMULATOR", "JetBrains-JediTerm")], || {
            assert_eq!(detect_parent_ide(), Some(ParentIde::IntelliJ))
        });
    }

    #[test]
    #[serial]
    fn test_detect_parent_ide_nvim() {
        with_env(&[("NVIM", "/tmp/nvim.sock")], || {
            assert_eq!(detect_parent_ide(), Some(ParentIde::Neovim))
        });
    }

    #[test]
    #[serial]
    fn test_detect_editor_from_visual() {
        with_env(&[("VISUAL", "/usr/bin/subl"), ("EDITOR", "vim")], || {
            assert_eq!(detect_editor().unwrap().command, "subl")
        });
    }

    #[test]
    #[serial]
    fn test_resolve_explicit_known_command() {
        with_env(&[("TERM_PROGRAM", "vscode")], || {
            let settings = EditorSettings {
                command: "/opt/sublime_text/subl".to_string(),
                ..Default::default()
            };
            let resolved = settings.resolve().unwrap();
            // Explicit command wins over the parent IDE
            assert_eq!(resolved.command, "/opt/sublime_text/subl");
            assert_eq!(resolved.display_name, "Sublime Text");
            assert_eq!(resolved.open_args, vec!["$FILE"]);
        });
    }

    #[test]
    fn test_resolve_unknown_command_defaults() {
        let settings = EditorSettings {
            command: "my-editor".to_string(),
            ..Default::default()
        };
        let resolved = settings.resolve().unwrap();
        assert_eq!(resolved.open_args, vec!["$FILE"]);
        assert!(resolved.syntax_args.is_empty());
        assert!(!resolved.wait);
        assert_eq!(resolved.display_name, "my-editor");
    }

    #[test]
    fn test_resolve_overrides_args() {
        let settings = EditorSettings {
            command: "code".to_string(),
            open_args: Some(vec!["--goto".to_string(), "$FILE".to_string()]),
            transient_args: Some(vec![]),
            syntax_args: None,
            wait: Some(true),
        };
        let resolved = settings.resolve().unwrap();
        assert_eq!(resolved.open_args, vec!["--goto", "$FILE"]);
        assert!(resolved.transient_args.is_empty());
        assert!(resolved.wait);
    }
}
