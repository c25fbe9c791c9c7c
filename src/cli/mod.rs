//! CLI command definitions and handlers

pub mod config;
pub mod date_filter;
pub mod handlers;
pub mod output;

use clap::{ArgAction, Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use output::OutputFormat;

/// notegit - notes in YAML and Markdown, dated by git history
#[derive(Parser, Debug)]
#[command(name = "notegit", version, about, long_about = None)]
pub struct Cli {
    /// Notes root directory (overrides config file)
    #[arg(short, long, global = true)]
    pub root: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List notes, optionally filtered by id, title, tags and date
    #[command(name = "ls")]
    List(ListArgs),

    /// Print a note's source
    Show(ShowArgs),

    /// Count notes and tags
    Info(InfoArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Note selection shared by `ls` and `info`
#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Files or directories under the root to read (default: the whole root)
    pub paths: Vec<PathBuf>,

    /// Keep notes whose id matches this regex
    #[arg(long)]
    pub xid: Option<String>,

    /// Keep notes whose title matches this regex
    #[arg(long)]
    pub xtitle: Option<String>,

    /// Require all of these tags (repeatable or comma-separated)
    #[arg(short, long = "tag", action = ArgAction::Append)]
    pub tags: Vec<String>,

    /// Require at least one of these tags (repeatable or comma-separated)
    #[arg(long = "tor", action = ArgAction::Append)]
    pub any_tags: Vec<String>,

    /// Exclude notes with any of these tags (repeatable or comma-separated)
    #[arg(long = "tn", action = ArgAction::Append)]
    pub none_tags: Vec<String>,
}

/// Arguments for the `ls` (list) command
#[derive(Parser, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Keep notes last updated on or after (RFC 3339, YYYY-MM-DD or "7d")
    #[arg(long)]
    pub since: Option<String>,

    /// Keep notes last updated on or before (RFC 3339, YYYY-MM-DD or "7d")
    #[arg(long)]
    pub until: Option<String>,

    /// Show each note's links
    #[arg(long)]
    pub links: bool,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,

    /// Width of the ID column
    #[arg(long)]
    pub id_width: Option<usize>,

    /// Width of the title column
    #[arg(long)]
    pub title_width: Option<usize>,

    /// Width of the tags column
    #[arg(long)]
    pub tags_width: Option<usize>,
}

/// Arguments for the `show` command
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Note ID
    pub id: String,
}

/// Arguments for the `info` command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `completions` command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for (bash, zsh, fish)
    #[arg(value_enum)]
    pub shell: Shell,
}
