//! Configuration system for lantern.
//!
//! lantern uses TOML configuration files named `.lantern.toml`. Configuration is resolved by
//! walking up the directory tree from the current working directory, collecting any
//! `.lantern.toml` files found, then loading `~/.lantern.toml` as the global config with lowest
//! precedence.

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod shortcut;
mod templates;
#[cfg(test)]
mod test_support;
mod validate;

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

pub use discovery::{
    CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config,
    require_global_config_path,
};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{
    RawConfig, RawInputSettings, RawRenderSettings, RawSearchSettings, RawSiteSettings,
    parse_config_file, parse_config_str,
};
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};
pub use shortcut::{Modifiers, Shortcut};
pub use templates::{global_template, local_template};
pub use validate::ConfigWarning;
use validate::validate_config;

/// File name of the document map a site generator publishes.
pub const DEFAULT_INDEX_FILE: &str = "search.json";

/// Top-level merged configuration for lantern.
///
/// This represents the fully resolved configuration after merging all discovered
/// `.lantern.toml` files according to precedence rules.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Published site settings.
    pub site: SiteSettings,
    /// Query pipeline settings.
    pub search: SearchSettings,
    /// Result rendering settings.
    pub render: RenderSettings,
    /// Input binding settings.
    pub input: InputSettings,
    /// Directory containing the most specific config file.
    pub config_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.lantern.toml` files.
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        if files.is_empty() {
            return Ok(Self::default());
        }

        let parsed: Vec<ParsedConfig> = files
            .iter()
            .map(|path| {
                let config = parse_config_file(path)?;
                Ok(ParsedConfig {
                    path: path.clone(),
                    config,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        merge_configs(&parsed)
    }

    /// Validates the configuration and returns any non-fatal warnings.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Returns the location of the document map published by the site.
    ///
    /// A bare domain is served over https, matching how the site generator
    /// builds its base URL: `https://{url}/{folder}/{index_file}`.
    pub fn index_location(&self) -> String {
        self.site.index_location()
    }

    /// Serializes the effective settings to TOML format.
    pub fn settings_to_toml(&self) -> String {
        let serializable = SerializableSettings {
            site: &self.site,
            search: &self.search,
            render: &self.render,
            input: &self.input,
        };
        toml::to_string_pretty(&serializable).unwrap_or_else(|e| format!("# {e}\n"))
    }
}

/// Settings describing where the site is published.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteSettings {
    /// Site domain (`example.org`) or a full base URL (`http://localhost:8000`).
    pub url: String,
    /// Folder the site is published under (empty for the domain root).
    pub folder: String,
    /// File name of the document map.
    pub index_file: String,
    /// Whether the search subsystem starts at all.
    pub search_enabled: bool,
}

impl SiteSettings {
    /// Builds the document map location from the site settings.
    pub fn index_location(&self) -> String {
        let base = self.url.trim_end_matches('/');
        let mut location = if base.contains("://") {
            base.to_string()
        } else {
            format!("https://{base}")
        };

        let folder = self.folder.trim_matches('/');
        if !folder.is_empty() {
            location.push('/');
            location.push_str(folder);
        }

        location.push('/');
        location.push_str(self.index_file.trim_start_matches('/'));
        location
    }
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            url: String::from("localhost"),
            folder: String::new(),
            index_file: String::from(DEFAULT_INDEX_FILE),
            search_enabled: true,
        }
    }
}

/// Settings for the exact/fuzzy query pipeline.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Minimum trimmed query length (in characters) before a query runs.
    pub min_query_length: usize,
    /// Weight applied to exact-term matches over prefix matches.
    pub exact_boost: f32,
    /// Tokens longer than this many characters are excluded from fuzzy matching.
    pub max_fuzzy_term_length: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            min_query_length: 2,
            exact_boost: 10.0,
            max_fuzzy_term_length: 20,
        }
    }
}

/// Settings for incremental result rendering.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Results materialized per batch.
    pub batch_size: usize,
    /// Delay between batches, in milliseconds.
    pub batch_delay_ms: u64,
    /// Delay between activating a result and navigating, in milliseconds.
    pub navigation_delay_ms: u64,
    /// Characters of content shown in each preview.
    pub preview_chars: usize,
    /// Marker appended to every preview.
    pub ellipsis: String,
    /// Placeholder text when nothing matches.
    pub no_results_text: String,
}

impl RenderSettings {
    /// Delay between batches.
    pub fn batch_delay(&self) -> Duration {
        Duration::from_millis(self.batch_delay_ms)
    }

    /// Delay between activation and navigation.
    pub fn navigation_delay(&self) -> Duration {
        Duration::from_millis(self.navigation_delay_ms)
    }
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            batch_size: 10,
            batch_delay_ms: 100,
            navigation_delay_ms: 10,
            preview_chars: 100,
            ellipsis: String::from("..."),
            no_results_text: String::from("No results found"),
        }
    }
}

/// Settings for device input bindings.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct InputSettings {
    /// Global shortcut that opens the result surface and focuses the input.
    #[serde_as(as = "DisplayFromStr")]
    pub shortcut: Shortcut,
}

/// Internal struct for TOML serialization of settings.
#[derive(Serialize)]
struct SerializableSettings<'a> {
    /// Site settings.
    site: &'a SiteSettings,
    /// Search settings.
    search: &'a SearchSettings,
    /// Render settings.
    render: &'a RenderSettings,
    /// Input settings.
    input: &'a InputSettings,
}
