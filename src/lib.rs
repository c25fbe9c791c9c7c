//! notegit - notes in YAML and Markdown files, dated by git blame
//!
//! Notes are extracted from multi-note YAML files (a `notes` sequence) and
//! from Markdown files with front matter. Each note gets the line range it
//! occupies and, when the notes live in a git repository, the time any of
//! those lines last changed.

pub mod cli;
pub mod domain;
pub mod infra;
pub mod provenance;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{
    Cli, Command,
    config::Config,
    handlers::{handle_completions, handle_info, handle_list, handle_show},
};

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Command::Completions(args) = &cli.command {
        return handle_completions(args);
    }

    let config = Config::load()?;
    let root = config.notes_root(cli.root.as_ref());
    tracing::debug!(root = %root.display(), "notes root");

    match &cli.command {
        Command::List(args) => handle_list(args, &root, config.table),
        Command::Show(args) => handle_show(args, &root),
        Command::Info(args) => handle_info(args, &root),
        Command::Completions(args) => handle_completions(args),
    }
}

/// Logs to stderr. `RUST_LOG` wins over the `-v` count.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
