//! Clap argument definitions for the `lantern` CLI.

use clap::{ArgAction, Args, Parser, Subcommand};

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "lantern")]
#[command(about = "Lantern - typo-tolerant search for static sites")]
pub struct Cli {
    /// Log verbosity (-v for info, -vv for debug); LANTERN_LOG overrides
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Where to load the document map from.
#[derive(Args, Debug, Clone, Default)]
pub struct IndexArgs {
    /// Document map URL or path [default: from [site] settings]
    #[arg(long, value_name = "URL|PATH")]
    pub index: Option<String>,
}

/// Arguments for `lantern search`.
#[derive(Args, Debug, Clone)]
pub struct SearchCommand {
    /// Search queries, each run separately
    #[arg(required = true)]
    pub queries: Vec<String>,

    /// Maximum results to print per query
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    /// Document map location.
    pub index: IndexArgs,
}

/// Arguments for `lantern repl`.
#[derive(Args, Debug, Clone)]
pub struct ReplCommand {
    #[command(flatten)]
    /// Document map location.
    pub index: IndexArgs,
}

/// Arguments for `lantern init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.lantern.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Supported `lantern` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Run queries against the document map and print the matches
    Search(SearchCommand),

    /// Drive the interactive search session from the terminal
    Repl(ReplCommand),

    /// Validate configuration and show the resolved index location
    Check,

    /// Initialize lantern configuration in current directory
    Init(InitCommand),
}
