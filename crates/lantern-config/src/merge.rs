//! Configuration merging.
//!
//! Merges multiple `RawConfig` files into a single resolved `Config`,
//! applying precedence rules and rejecting values the subsystem cannot run with.

use std::path::{Path, PathBuf};

use crate::{
    Config, ConfigError, InputSettings, RenderSettings, SearchSettings, Shortcut, SiteSettings,
    parse::{RawConfig, RawInputSettings, RawRenderSettings, RawSearchSettings, RawSiteSettings},
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

/// Merges multiple configuration files into a single resolved `Config`.
///
/// Configs should be provided in precedence order: highest precedence first (closest to CWD),
/// lowest precedence last (global config). Each scalar takes the first defined value.
pub fn merge_configs(configs: &[ParsedConfig]) -> Result<Config, ConfigError> {
    if configs.is_empty() {
        return Ok(Config::default());
    }

    let mut config = Config {
        config_root: configs
            .first()
            .and_then(|c| c.path.parent())
            .map(Path::to_path_buf),
        ..Config::default()
    };

    // Lowest precedence first so higher precedence overwrites
    for parsed in configs.iter().rev() {
        let raw = &parsed.config;
        if let Some(ref site) = raw.site {
            apply_raw_site(&mut config.site, site);
        }
        if let Some(ref search) = raw.search {
            apply_raw_search(&mut config.search, search, &parsed.path)?;
        }
        if let Some(ref render) = raw.render {
            apply_raw_render(&mut config.render, render, &parsed.path)?;
        }
        if let Some(ref input) = raw.input {
            apply_raw_input(&mut config.input, input)?;
        }
    }

    Ok(config)
}

/// Applies raw site settings to result, overwriting any present values.
fn apply_raw_site(result: &mut SiteSettings, raw: &RawSiteSettings) {
    if let Some(ref v) = raw.url {
        result.url = v.clone();
    }
    if let Some(ref v) = raw.folder {
        result.folder = v.clone();
    }
    if let Some(ref v) = raw.index_file {
        result.index_file = v.clone();
    }
    if let Some(v) = raw.search_enabled {
        result.search_enabled = v;
    }
}

/// Applies raw search settings to result.
fn apply_raw_search(
    result: &mut SearchSettings,
    raw: &RawSearchSettings,
    path: &Path,
) -> Result<(), ConfigError> {
    if let Some(v) = raw.min_query_length {
        if v == 0 {
            return Err(invalid("search.min_query_length", path, "must be at least 1"));
        }
        result.min_query_length = v;
    }
    if let Some(v) = raw.exact_boost {
        if !v.is_finite() || v <= 0.0 {
            return Err(invalid("search.exact_boost", path, "must be a positive number"));
        }
        result.exact_boost = v;
    }
    if let Some(v) = raw.max_fuzzy_term_length {
        result.max_fuzzy_term_length = v;
    }
    Ok(())
}

/// Applies raw render settings to result.
fn apply_raw_render(
    result: &mut RenderSettings,
    raw: &RawRenderSettings,
    path: &Path,
) -> Result<(), ConfigError> {
    if let Some(v) = raw.batch_size {
        if v == 0 {
            return Err(invalid("render.batch_size", path, "must be at least 1"));
        }
        result.batch_size = v;
    }
    if let Some(v) = raw.batch_delay_ms {
        result.batch_delay_ms = v;
    }
    if let Some(v) = raw.navigation_delay_ms {
        result.navigation_delay_ms = v;
    }
    if let Some(v) = raw.preview_chars {
        result.preview_chars = v;
    }
    if let Some(ref v) = raw.ellipsis {
        result.ellipsis = v.clone();
    }
    if let Some(ref v) = raw.no_results_text {
        result.no_results_text = v.clone();
    }
    Ok(())
}

/// Applies raw input settings to result.
fn apply_raw_input(result: &mut InputSettings, raw: &RawInputSettings) -> Result<(), ConfigError> {
    if let Some(ref v) = raw.shortcut {
        result.shortcut = v.parse::<Shortcut>()?;
    }
    Ok(())
}

/// Builds an `InvalidValue` error.
fn invalid(key: &'static str, path: &Path, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key,
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}
