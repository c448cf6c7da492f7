//! Configuration validation.
//!
//! Reports non-fatal warnings for settings that load but probably do not do
//! what the site author intended.

use std::fmt;

use crate::Config;

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// `site.search_enabled` is false, so the subsystem will not start.
    SearchDisabled,
    /// `site.index_file` is empty.
    MissingIndexFile,
    /// `search.max_fuzzy_term_length` is zero, so the fuzzy fallback never matches.
    FuzzyFallbackDisabled,
    /// `render.preview_chars` is zero, so previews carry only the ellipsis.
    EmptyPreview,
    /// `render.ellipsis` is empty, so truncated previews are not marked.
    EmptyEllipsis,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SearchDisabled => write!(f, "search is disabled (site.search_enabled = false)"),
            Self::MissingIndexFile => write!(f, "site.index_file is empty"),
            Self::FuzzyFallbackDisabled => {
                write!(
                    f,
                    "search.max_fuzzy_term_length is 0; typo-tolerant fallback will never match"
                )
            }
            Self::EmptyPreview => write!(f, "render.preview_chars is 0; previews will be empty"),
            Self::EmptyEllipsis => write!(f, "render.ellipsis is empty; previews are unmarked"),
        }
    }
}

/// Validates the configuration and returns any warnings.
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();

    if !config.site.search_enabled {
        warnings.push(ConfigWarning::SearchDisabled);
    }
    if config.site.index_file.trim().is_empty() {
        warnings.push(ConfigWarning::MissingIndexFile);
    }
    if config.search.max_fuzzy_term_length == 0 {
        warnings.push(ConfigWarning::FuzzyFallbackDisabled);
    }
    if config.render.preview_chars == 0 {
        warnings.push(ConfigWarning::EmptyPreview);
    }
    if config.render.ellipsis.is_empty() {
        warnings.push(ConfigWarning::EmptyEllipsis);
    }

    warnings
}
