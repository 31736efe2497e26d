//! Integration tests driving the real `git` executable
//!
//! Each test creates its own repository in a temporary directory. Tests that
//! need a directory outside any repository set `GIT_CEILING_DIRECTORIES`, so
//! they run serially.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use gof_app::config::BehaviorSettings;
use gof_app::{Applicability, GitOpenFileCommand, HostEditor, OpenFlags, StdoutEditor, ViewHandle};
use gof_core::{Error, OpenFileArgs, QueryMode, Result};
use gof_git::test_utils::{git, temp_dir, temp_repo, write_file};
use gof_git::RepoLocator;
use serial_test::serial;

/// Records every request instead of opening anything.
#[derive(Debug, Default)]
struct RecordingEditor {
    opened: Vec<(PathBuf, OpenFlags)>,
    syntaxes: Vec<(u64, String)>,
}

impl HostEditor for RecordingEditor {
    fn open_file(&mut self, path: &Path, flags: OpenFlags) -> Result<ViewHandle> {
        self.opened.push((path.to_path_buf(), flags));
        Ok(ViewHandle {
            id: self.opened.len() as u64,
            path: path.to_path_buf(),
            editor: "recording".to_string(),
        })
    }

    fn assign_syntax(&mut self, view: &ViewHandle, syntax: &str) -> Result<()> {
        self.syntaxes.push((view.id, syntax.to_string()));
        Ok(())
    }
}

/// Sets an environment variable and restores the previous value on drop,
/// including when the test panics.
struct EnvGuard {
    key: &'static str,
    previous: Option<OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, value: impl AsRef<std::ffi::OsStr>) -> Self {
        let previous = std::env::var_os(key);
        std::env::set_var(key, value);
        Self { key, previous }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.previous.take() {
            Some(value) => std::env::set_var(self.key, value),
            None => std::env::remove_var(self.key),
        }
    }
}

fn command() -> GitOpenFileCommand {
    GitOpenFileCommand::new(RepoLocator::default(), BehaviorSettings::default())
}

#[test]
fn test_opens_readme_from_nested_file_as_transient() {
    let (_temp, root) = temp_repo();
    let active = write_file(&root, "src/a.py", "print('hi')\n");
    write_file(&root, "README.md", "# Project\n");

    let cmd = command();
    let Applicability::Enabled(ctx) = cmd.check(Some(&active)).unwrap() else {
        panic!("expected the command to be enabled inside a repository");
    };
    assert_eq!(ctx.root, root);

    let mut editor = RecordingEditor::default();
    let outcome = cmd
        .run(&ctx, &OpenFileArgs::new("README.md"), &mut editor)
        .unwrap();

    assert_eq!(editor.opened, vec![(root.join("README.md"), OpenFlags::TRANSIENT)]);
    assert!(outcome.target_exists);
    assert!(editor.syntaxes.is_empty());
}

#[test]
fn test_opens_gitignore_in_absolute_git_dir() {
    let (_temp, root) = temp_repo();
    let active = write_file(&root, "src/a.py", "");
    let git_dir = PathBuf::from(git(&root, &["rev-parse", "--absolute-git-dir"]));

    let args = OpenFileArgs::from_json(
        r#"{"file": ".gitignore", "rev_parse_arg": "--absolute-git-dir"}"#,
    )
    .unwrap();
    let mut editor = RecordingEditor::default();
    let outcome = command()
        .invoke(Some(&active), &args, &mut editor)
        .unwrap()
        .expect("command should apply");

    assert_eq!(outcome.root, git_dir);
    assert_eq!(outcome.mode, QueryMode::AbsoluteGitDir);
    assert_eq!(editor.opened[0].0, git_dir.join(".gitignore"));
}

#[test]
fn test_assigns_syntax_to_opened_view() {
    let (_temp, root) = temp_repo();
    let active = write_file(&root, "src/a.py", "");
    let syntax = "Packages/Markdown/Markdown.sublime-syntax";

    let mut editor = RecordingEditor::default();
    let outcome = command()
        .invoke(
            Some(&active),
            &OpenFileArgs::new("README.md").with_syntax(syntax),
            &mut editor,
        )
        .unwrap()
        .expect("command should apply");

    assert_eq!(editor.syntaxes, vec![(outcome.view.id, syntax.to_string())]);
    assert!(outcome.syntax_assigned);
    assert!(!outcome.target_exists);
}

#[test]
fn test_rev_parse_arg_false_uses_toplevel() {
    let (_temp, root) = temp_repo();
    let active = write_file(&root, "src/deep/a.py", "");

    let args = OpenFileArgs::from_json(r#"{"file": "Cargo.toml", "rev_parse_arg": false}"#)
        .unwrap();
    let mut editor = RecordingEditor::default();
    let outcome = command()
        .invoke(Some(&active), &args, &mut editor)
        .unwrap()
        .expect("command should apply");

    assert_eq!(outcome.target, root.join("Cargo.toml"));
    assert_eq!(outcome.mode, QueryMode::ShowToplevel);
}

#[test]
fn test_toplevel_has_no_trailing_newline() {
    let (_temp, root) = temp_repo();
    let active = write_file(&root, "a.txt", "");

    let located = RepoLocator::default().toplevel(Some(&active)).unwrap();
    let located = located.expect("repository root");
    assert_eq!(located, root);
    assert!(!located.to_string_lossy().ends_with('\n'));
}

#[test]
fn test_relative_git_dir_is_resolved() {
    let (_temp, root) = temp_repo();
    let active = write_file(&root, "a.txt", "");

    // At the top level git prints the relative ".git"
    let located = RepoLocator::default()
        .locate(Some(&active), QueryMode::GitDir)
        .unwrap();
    assert_eq!(located, Some(root.join(".git")));
}

#[test]
fn test_superproject_outside_submodule_is_no_repository() {
    let (_temp, root) = temp_repo();
    let active = write_file(&root, "a.txt", "");
    let cmd = command();
    let Applicability::Enabled(ctx) = cmd.check(Some(&active)).unwrap() else {
        panic!("expected the command to be enabled inside a repository");
    };

    let args =
        OpenFileArgs::new("README.md").with_rev_parse_arg(QueryMode::ShowSuperprojectWorkingTree);
    let mut editor = RecordingEditor::default();
    let err = cmd.run(&ctx, &args, &mut editor).unwrap_err();

    assert!(matches!(err, Error::NoRepository { .. }));
    assert!(editor.opened.is_empty());
}

#[test]
fn test_invalid_mode_is_rejected() {
    let (_temp, root) = temp_repo();
    let active = write_file(&root, "a.txt", "");

    let err = RepoLocator::default()
        .locate_arg(Some(&active), "--show-prefix")
        .unwrap_err();
    assert!(matches!(err, Error::InvalidQueryMode { .. }));
}

#[test]
#[serial]
fn test_outside_repository_is_disabled() {
    let (_temp, dir) = temp_dir();
    let active = write_file(&dir, "loose.txt", "");

    let _ceiling = EnvGuard::set("GIT_CEILING_DIRECTORIES", dir.parent().unwrap_or(&dir));
    let cmd = command();
    let enabled = cmd.is_enabled(Some(&active));
    let mut editor = RecordingEditor::default();
    let outcome = cmd
        .invoke(Some(&active), &OpenFileArgs::new("README.md"), &mut editor)
        .unwrap();

    assert!(!enabled);
    assert!(outcome.is_none());
    assert!(editor.opened.is_empty());
}

#[test]
fn test_missing_active_file_with_parent_dir_is_enabled() {
    let (_temp, root) = temp_repo();
    write_file(&root, "src/a.py", "");

    let active = root.join("src").join("missing").join("..").join("new.py");
    let applicability = command().check(Some(&active)).unwrap();
    assert_eq!(applicability.context().map(|ctx| ctx.root.clone()), Some(root));
}

#[test]
fn test_empty_json_values_use_toplevel_without_syntax() {
    let (_temp, root) = temp_repo();
    let active = write_file(&root, "src/a.py", "");

    let args =
        OpenFileArgs::from_json(r#"{"file": "README.md", "rev_parse_arg": "", "syntax": ""}"#)
            .unwrap();
    let mut editor = RecordingEditor::default();
    let outcome = command()
        .invoke(Some(&active), &args, &mut editor)
        .unwrap()
        .expect("command should apply");

    assert_eq!(outcome.target, root.join("README.md"));
    assert!(editor.syntaxes.is_empty());
    assert!(!outcome.syntax_assigned);
}

#[test]
fn test_without_active_file_is_disabled() {
    assert!(!command().is_enabled(None));
}

#[cfg(unix)]
#[test]
fn test_symlinked_active_file_uses_link_target_repository() {
    let (_repo_temp, root) = temp_repo();
    let real = write_file(&root, "src/a.py", "");
    let (_link_temp, elsewhere) = temp_dir();
    let link = elsewhere.join("a.py");
    std::os::unix::fs::symlink(&real, &link).unwrap();

    let applicability = command().check(Some(&link)).unwrap();
    assert_eq!(applicability.context().map(|ctx| ctx.root.clone()), Some(root));
}

#[test]
fn test_print_editor_writes_target_path() {
    let (_temp, root) = temp_repo();
    let active = write_file(&root, "src/a.py", "");

    let mut editor = StdoutEditor::new(Vec::new());
    command()
        .invoke(Some(&active), &OpenFileArgs::new("README.md"), &mut editor)
        .unwrap()
        .expect("command should apply");

    let printed = String::from_utf8(editor.into_inner()).unwrap();
    assert_eq!(printed.trim_end(), root.join("README.md").display().to_string());
}
