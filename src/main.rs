//! git-open-file - Open a file relative to the enclosing Git repository
//!
//! This is the binary entry point. All logic lives in the workspace crates.

use std::io;
use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{eyre, Result};
use gof_app::config::{default_config_path, init_settings, load_settings};
use gof_app::{
    Applicability, CommandEditor, GitOpenFileCommand, HostEditor, Settings, StdoutEditor,
};
use gof_core::OpenFileArgs;
use gof_git::{GitAvailability, RepoLocator};

/// Open a file relative to the Git repository of the active file
#[derive(Parser, Debug)]
#[command(name = "git-open-file")]
#[command(about = "Open a file relative to the enclosing Git repository root", long_about = None)]
struct Args {
    /// Path relative to the repository root
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Active file (default: current directory)
    #[arg(short, long, value_name = "PATH")]
    from: Option<PathBuf>,

    /// Query the root with this `git rev-parse` option instead of --show-toplevel
    #[arg(short, long, value_name = "MODE", allow_hyphen_values = true)]
    rev_parse_arg: Option<String>,

    /// Syntax profile to assign to the opened file
    #[arg(short, long, value_name = "ID")]
    syntax: Option<String>,

    /// Arguments as a JSON object: {"file", "rev_parse_arg", "syntax"}
    #[arg(long, value_name = "JSON", conflicts_with_all = ["file", "rev_parse_arg", "syntax"])]
    args: Option<String>,

    /// Only report whether the active file is in a repository (exit 0/1)
    #[arg(long)]
    check: bool,

    /// Print the target path instead of opening it
    #[arg(long, conflicts_with = "json")]
    print: bool,

    /// Print the outcome as JSON instead of opening the file
    #[arg(long)]
    json: bool,

    /// Open as a regular view rather than a transient one
    #[arg(long)]
    no_transient: bool,

    /// Settings file (default: <config_dir>/git-open-file/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write a commented default settings file and exit
    #[arg(long)]
    init_config: bool,
}

impl Args {
    /// Invocation arguments from `--args` or from `FILE` and its options.
    fn open_file_args(&self) -> Result<OpenFileArgs> {
        if let Some(json) = &self.args {
            return Ok(OpenFileArgs::from_json(json)?);
        }

        let file = self
            .file
            .clone()
            .ok_or_else(|| eyre!("FILE is required unless --check or --args is given"))?;
        Ok(OpenFileArgs::from_raw(
            file,
            self.rev_parse_arg.as_deref(),
            self.syntax.clone(),
        )?)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    color_eyre::install()?;
    gof_core::logging::init()?;

    let config_path = args.config.clone().or_else(default_config_path);

    if args.init_config {
        let path = config_path.ok_or_else(|| eyre!("No config directory on this platform"))?;
        if init_settings(&path)? {
            eprintln!("Wrote {}", path.display());
        } else {
            eprintln!("{} already exists", path.display());
        }
        return Ok(());
    }

    let mut settings = config_path
        .as_deref()
        .map(load_settings)
        .unwrap_or_else(Settings::default);
    if args.no_transient {
        settings.behavior.transient = false;
    }

    settings.validate()?;

    let availability = GitAvailability::check(&settings.git.binary);
    if let Err(e) = availability.require(&settings.git.binary) {
        eprintln!("{}", e);
        if let Some(hint) = availability.unavailable_message() {
            eprintln!("{}", hint);
        }
        std::process::exit(1);
    }

    let active = match &args.from {
        Some(path) => path.clone(),
        None => std::env::current_dir()?,
    };

    let command = GitOpenFileCommand::new(
        RepoLocator::system(settings.git.binary.clone()),
        settings.behavior.clone(),
    );

    let ctx = match command.check(Some(&active))? {
        Applicability::Enabled(ctx) => ctx,
        Applicability::Disabled => {
            eprintln!("Not inside a Git repository: {}", active.display());
            std::process::exit(1);
        }
    };

    if args.check {
        println!("{}", ctx.root.display());
        return Ok(());
    }

    let open_args = args.open_file_args()?;
    tracing::info!("Opening {:?} from {}", open_args, active.display());

    let mut editor: Box<dyn HostEditor> = if args.json {
        Box::new(StdoutEditor::new(io::sink()))
    } else if args.print {
        Box::new(StdoutEditor::stdout())
    } else {
        Box::new(CommandEditor::from_settings(&settings.editor)?)
    };

    let outcome = match command.run(&ctx, &open_args, editor.as_mut()) {
        Ok(outcome) => outcome,
        Err(e) => {
            if let Ok(log) = gof_core::logging::get_current_log_file() {
                eprintln!("Details in {}", log.display());
            }
            return Err(e.into());
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    }

    Ok(())
}
