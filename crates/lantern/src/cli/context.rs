//! Shared context for running CLI commands.

use std::{
    env,
    path::{Path, PathBuf},
    process::ExitCode,
};

use lantern_config::Config;
use lantern_index::{DocumentIndex, IndexSource};
use tokio::runtime::{Builder, Runtime};

use crate::cli::args::IndexArgs;

/// Command execution context built once per CLI invocation.
pub struct CommandContext {
    /// Current working directory.
    pub cwd: PathBuf,
    /// Loaded configuration (may be default if no config files found).
    pub config: Config,
}

impl CommandContext {
    /// Loads the current directory and configuration.
    pub fn load() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        let config = load_config_or_failure(&cwd)?;
        Ok(Self { cwd, config })
    }

    /// Loads only the current directory, skipping configuration parsing.
    ///
    /// Used for `init`, which should work even when an existing config file
    /// is invalid.
    pub fn load_cwd_only() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        Ok(Self {
            cwd,
            config: Config::default(),
        })
    }

    /// Resolves the document map location from `--index` or the site settings.
    pub fn index_source(&self, args: &IndexArgs) -> Result<IndexSource, ExitCode> {
        let resolved = match &args.index {
            Some(location) => IndexSource::parse(location),
            None => IndexSource::resolve(&self.config.site),
        };
        resolved.map_err(|e| {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        })
    }

    /// Fails when the configuration switches search off.
    pub fn require_search_enabled(&self) -> Result<(), ExitCode> {
        if self.config.site.search_enabled {
            return Ok(());
        }
        eprintln!("error: search is disabled (site.search_enabled = false)");
        Err(ExitCode::FAILURE)
    }

    /// Loads the document map and builds the index with the configured search settings.
    pub fn load_index(
        &self,
        runtime: &Runtime,
        source: &IndexSource,
    ) -> Result<DocumentIndex, ExitCode> {
        match runtime.block_on(DocumentIndex::load(source)) {
            Ok(index) => Ok(index.with_settings(&self.config.search)),
            Err(e) => {
                eprintln!("error: failed to load search index from {source}: {e}");
                Err(ExitCode::FAILURE)
            }
        }
    }
}

/// Builds the single-threaded runtime the search subsystem runs on.
pub fn runtime() -> Result<Runtime, ExitCode> {
    Builder::new_current_thread().enable_all().build().map_err(|e| {
        eprintln!("error: failed to start runtime: {e}");
        ExitCode::FAILURE
    })
}

/// Returns the current working directory or exits with a consistent error.
fn current_dir_or_failure() -> Result<PathBuf, ExitCode> {
    env::current_dir().map_err(|e| {
        eprintln!("error: could not determine current directory: {e}");
        ExitCode::FAILURE
    })
}

/// Loads configuration from the provided directory or exits with an error.
fn load_config_or_failure(cwd: &Path) -> Result<Config, ExitCode> {
    Config::load(cwd).map_err(|e| {
        eprintln!("error: failed to load configuration: {e}");
        ExitCode::FAILURE
    })
}
