//! Implementation of `lantern init`.

use std::{fs, path::PathBuf, process::ExitCode};

use lantern_config::{
    CONFIG_FILENAME, global_template, local_template, require_global_config_path,
};

use crate::cli::{
    args::InitCommand,
    context::CommandContext,
    output::{dim, subheader},
};

/// Writes a commented `.lantern.toml` to the working directory or home.
pub fn run(ctx: &CommandContext, cmd: &InitCommand) -> ExitCode {
    let (path, template) = match target(ctx, cmd.global) {
        Ok(target) => target,
        Err(code) => return code,
    };

    if path.exists() && !cmd.force {
        eprintln!("error: {} already exists", path.display());
        eprintln!("use --force to overwrite");
        return ExitCode::FAILURE;
    }

    if let Err(e) = fs::write(&path, &template) {
        eprintln!("error: failed to write {}: {e}", path.display());
        return ExitCode::FAILURE;
    }

    println!("Created {}", path.display());
    println!("{}", dim("Every setting is commented out; uncomment what you need."));
    println!();
    println!("{}", subheader("Configuration written:"));
    for line in template.lines() {
        println!("  {line}");
    }

    ExitCode::SUCCESS
}

/// Picks the file to write and its template.
///
/// Running in the home directory writes the global file even without `--global`.
fn target(ctx: &CommandContext, global: bool) -> Result<(PathBuf, String), ExitCode> {
    let global_path = require_global_config_path();
    let in_home = global_path
        .as_ref()
        .is_ok_and(|p| p.parent() == Some(ctx.cwd.as_path()));

    if !global && !in_home {
        return Ok((ctx.cwd.join(CONFIG_FILENAME), local_template()));
    }

    global_path
        .map(|path| (path, global_template()))
        .map_err(|e| {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        })
}
