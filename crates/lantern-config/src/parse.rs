//! Configuration file parsing.
//!
//! Parses individual `.lantern.toml` files into intermediate `RawConfig` structures
//! that preserve the optional nature of all fields before merging.

use std::{fs, path::Path};

use serde::Deserialize;
#[cfg(test)]
use toml::de::Error as TomlError;

use crate::ConfigError;

/// Raw configuration as parsed directly from a TOML file.
///
/// All fields are optional to support partial configs that will be merged.
/// This mirrors the TOML schema exactly.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// When true, stop discovery here - ignore parent and global configs.
    pub root: Option<bool>,
    /// Published site settings.
    pub site: Option<RawSiteSettings>,
    /// Query pipeline settings.
    pub search: Option<RawSearchSettings>,
    /// Result rendering settings.
    pub render: Option<RawRenderSettings>,
    /// Input binding settings.
    pub input: Option<RawInputSettings>,
}

/// Raw site settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSiteSettings {
    /// Site domain or full base URL.
    pub url: Option<String>,
    /// Folder the site is published under.
    pub folder: Option<String>,
    /// Name of the document map file.
    pub index_file: Option<String>,
    /// Whether the search subsystem starts at all.
    pub search_enabled: Option<bool>,
}

/// Raw search settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSearchSettings {
    /// Minimum trimmed query length before a query runs.
    pub min_query_length: Option<usize>,
    /// Weight applied to exact-term matches.
    pub exact_boost: Option<f32>,
    /// Tokens longer than this are excluded from fuzzy matching.
    pub max_fuzzy_term_length: Option<usize>,
}

/// Raw render settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawRenderSettings {
    /// Results materialized per batch.
    pub batch_size: Option<usize>,
    /// Delay between batches, in milliseconds.
    pub batch_delay_ms: Option<u64>,
    /// Delay between activating a result and navigating, in milliseconds.
    pub navigation_delay_ms: Option<u64>,
    /// Characters of content shown in each preview.
    pub preview_chars: Option<usize>,
    /// Marker appended to every preview.
    pub ellipsis: Option<String>,
    /// Placeholder text when nothing matches.
    pub no_results_text: Option<String>,
}

/// Raw input settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawInputSettings {
    /// Global shortcut that opens search, e.g. `"/"` or `"ctrl+k"`.
    pub shortcut: Option<String>,
}

/// Parses a configuration file from disk.
///
/// Returns a `RawConfig` with all fields as optionals, ready for merging.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string.
///
/// The `path` parameter is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses configuration from a TOML string without path context.
///
/// Useful for validating template content (tests only).
#[cfg(test)]
pub fn parse_config(contents: &str) -> Result<RawConfig, TomlError> {
    toml::from_str(contents)
}

/// Checks if a config file has `root = true` set.
///
/// This is used during discovery to stop traversal at root configs.
/// Returns false if the file cannot be read or parsed.
pub fn is_root_config(path: &Path) -> bool {
    let Ok(contents) = fs::read_to_string(path) else {
        return false;
    };
    let Ok(config) = toml::from_str::<RawConfig>(&contents) else {
        return false;
    };
    config.root == Some(true)
}
