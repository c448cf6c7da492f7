//! Error types for lantern configuration.

use std::io;
use std::path::PathBuf;

use thiserror::Error;
use toml::de;

/// Errors that can occur when loading or processing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to parse TOML configuration.
    #[error("failed to parse config file {path}: {source}")]
    ParseToml {
        /// Path to the file that could not be parsed.
        path: PathBuf,
        /// Underlying TOML parse error.
        source: de::Error,
    },

    /// A keyboard shortcut string could not be parsed.
    #[error("invalid shortcut '{shortcut}': {reason}")]
    InvalidShortcut {
        /// The shortcut as written.
        shortcut: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A setting holds a value the search subsystem cannot run with.
    #[error("invalid value for {key} in {path}: {reason}")]
    InvalidValue {
        /// Dotted setting name, e.g. `render.batch_size`.
        key: &'static str,
        /// Config file that supplied the value.
        path: PathBuf,
        /// Why it was rejected.
        reason: String,
    },

    /// Failed to determine home directory.
    #[error("could not determine home directory")]
    NoHomeDirectory,
}
