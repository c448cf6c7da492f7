//! Command-line interface for the `lantern` site search tool.

mod cli;

use std::process::ExitCode;

use clap::Parser;

use crate::cli::{
    args::{Cli, Commands},
    commands,
    context::CommandContext,
    logging,
};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    // `init` must work even when an existing config file is broken.
    let ctx = match &cli.command {
        Commands::Init(_) => CommandContext::load_cwd_only(),
        _ => CommandContext::load(),
    };
    let ctx = match ctx {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    commands::run(cli.command, &ctx)
}
