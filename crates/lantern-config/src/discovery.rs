//! Configuration file discovery.
//!
//! Walks up the directory tree from a starting point collecting `.lantern.toml`
//! files until a site boundary, then appends the global `~/.lantern.toml` if
//! present.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::{ConfigError, DEFAULT_INDEX_FILE, parse::is_root_config};

/// The configuration filename.
pub const CONFIG_FILENAME: &str = ".lantern.toml";

/// Discovers all configuration files relevant to the given directory.
///
/// Returns paths in precedence order: closest to `cwd` first, global last.
///
/// The walk up from `cwd` ends at the first file declaring `root = true`, which
/// also excludes the global file. A directory holding a published document map
/// (`search.json`) is the top of a site: its config is still read, but nothing
/// above it is.
pub fn discover_config_files(cwd: &Path) -> Vec<PathBuf> {
    let mut configs = Vec::new();

    for dir in cwd.ancestors() {
        let candidate = dir.join(CONFIG_FILENAME);
        if candidate.is_file() {
            let is_root = is_root_config(&candidate);
            configs.push(candidate);
            if is_root {
                return configs;
            }
        }
        if dir.join(DEFAULT_INDEX_FILE).is_file() {
            break;
        }
    }

    if let Some(global) = global_config_path().filter(|p| p.is_file() && !configs.contains(p)) {
        configs.push(global);
    }
    configs
}

/// Returns the path to the global configuration file (`~/.lantern.toml`).
///
/// Returns `None` if the home directory cannot be determined.
pub fn global_config_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(CONFIG_FILENAME))
}

/// Like [`global_config_path`], but reports a missing home directory as an error.
pub fn require_global_config_path() -> Result<PathBuf, ConfigError> {
    global_config_path().ok_or(ConfigError::NoHomeDirectory)
}

/// Checks if a path is the global configuration file.
pub fn is_global_config(path: &Path) -> bool {
    global_config_path().is_some_and(|global| path == global)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::test_support::SiteTree;

    /// Drops the user's real global config from discovery results.
    fn local_only(configs: &[PathBuf]) -> Vec<&PathBuf> {
        configs.iter().filter(|p| !is_global_config(p)).collect()
    }

    #[test]
    fn no_configs_found() {
        let tree = SiteTree::new();

        let configs = discover_config_files(&tree.dir("a/b/c"));

        assert!(local_only(&configs).is_empty());
    }

    #[test]
    fn closest_config_comes_first() {
        let tree = SiteTree::new();
        let root_config = tree.config("", "# site\n");
        let content_config = tree.config("site/content", "# content\n");

        let configs = discover_config_files(&tree.dir("site/content/posts"));

        assert_eq!(local_only(&configs), vec![&content_config, &root_config]);
    }

    #[test]
    fn directory_named_like_config_is_skipped() {
        let tree = SiteTree::new();
        fs::create_dir_all(tree.root().join(CONFIG_FILENAME)).unwrap();

        let configs = discover_config_files(&tree.dir("subdir"));

        assert!(local_only(&configs).is_empty());
    }

    #[test]
    fn root_config_stops_discovery() {
        let tree = SiteTree::new();
        tree.config("", "# above the site\n");
        let site = tree.config("site", "root = true\n");
        let theme = tree.config("site/theme", "[render]\nbatch_size = 5\n");

        let configs = discover_config_files(&tree.dir("site/theme/assets"));

        assert_eq!(configs, vec![theme, site]);
    }

    #[test]
    fn published_site_directory_stops_discovery() {
        let tree = SiteTree::new();
        tree.config("", "# another site\n");
        let site = tree.config("public", "[site]\nurl = \"example.org\"\n");
        fs::write(tree.root().join("public").join(DEFAULT_INDEX_FILE), "{}").unwrap();

        let configs = discover_config_files(&tree.dir("public/posts"));

        assert_eq!(local_only(&configs), vec![&site]);
    }

    #[test]
    fn document_map_without_config_still_bounds_the_walk() {
        let tree = SiteTree::new();
        tree.config("", "# above\n");
        tree.dir("public");
        fs::write(tree.root().join("public").join(DEFAULT_INDEX_FILE), "{}").unwrap();

        let configs = discover_config_files(&tree.dir("public/posts"));

        assert!(local_only(&configs).is_empty());
    }

    #[test]
    fn global_path_ends_with_filename() {
        let path = require_global_config_path().unwrap();
        assert!(path.ends_with(CONFIG_FILENAME));
        assert!(is_global_config(&path));
        assert!(!is_global_config(Path::new("/elsewhere/.lantern.toml")));
    }
}
