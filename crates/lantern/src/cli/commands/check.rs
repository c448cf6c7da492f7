//! Implementation of `lantern check`.

use std::process::ExitCode;

use lantern_config::{ConfigWarning, discover_config_files};
use lantern_index::IndexSource;

use crate::cli::{
    context::CommandContext,
    output::{dim, header, subheader, warning},
};

/// Exit codes for `lantern check`.
mod exit_codes {
    use std::process::ExitCode;

    /// Configuration is valid with no warnings.
    pub const OK: ExitCode = ExitCode::SUCCESS;
    /// Configuration has warnings or an unusable index location.
    pub const WARNINGS: ExitCode = ExitCode::FAILURE;
}

/// Prints the effective configuration, the resolved index location and any warnings.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let config = &ctx.config;
    let config_files = discover_config_files(&ctx.cwd);

    println!("{}", header("Configuration"));
    println!();

    if config_files.is_empty() {
        println!("{}", dim("No configuration files found; using defaults."));
        println!("Run 'lantern init' to create a configuration file.");
    } else {
        println!("{}", subheader("Config files (highest precedence first):"));
        for path in &config_files {
            println!("  {}", path.display());
        }
    }
    println!();

    println!("{}", subheader("Effective settings:"));
    for line in config.settings_to_toml().lines() {
        println!("  {line}");
    }
    println!();

    println!("{}", subheader("Document map:"));
    let location = config.index_location();
    let source_ok = match IndexSource::parse(&location) {
        Ok(IndexSource::Remote(url)) => {
            println!("  {url} {}", dim("(remote)"));
            true
        }
        Ok(IndexSource::Local(path)) => {
            let status = if path.is_file() { "ok" } else { "missing" };
            println!("  {} {}", path.display(), dim(&format!("(local, {status})")));
            true
        }
        Err(e) => {
            println!("  {}", warning(&e.to_string()));
            false
        }
    };
    println!();

    let warnings = config.validate();
    if warnings.is_empty() && source_ok {
        println!("No issues found.");
        return exit_codes::OK;
    }

    if !warnings.is_empty() {
        println!("{}", subheader(&format!("Warnings ({}):", warnings.len())));
        for w in &warnings {
            println!("  - {}", warning(&w.to_string()));
        }
        println!();
        print_hints(&warnings);
    }

    exit_codes::WARNINGS
}

/// Prints hints for resolving common warnings.
fn print_hints(warnings: &[ConfigWarning]) {
    let mut hints: Vec<&str> = warnings
        .iter()
        .map(|w| match w {
            ConfigWarning::SearchDisabled => {
                "Set site.search_enabled = true to start the search subsystem."
            }
            ConfigWarning::MissingIndexFile => {
                "Set site.index_file to the document map your site generator writes."
            }
            ConfigWarning::FuzzyFallbackDisabled => {
                "Raise search.max_fuzzy_term_length to allow typo-tolerant matching."
            }
            ConfigWarning::EmptyPreview => "Raise render.preview_chars to show page content.",
            ConfigWarning::EmptyEllipsis => "Set render.ellipsis to mark truncated previews.",
        })
        .collect();

    hints.sort_unstable();
    hints.dedup();

    println!("Hints:");
    for hint in hints {
        println!("  - {hint}");
    }
}
