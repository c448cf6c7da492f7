//! Integration tests for lantern-config.
//!
//! Tests the full configuration loading pipeline: discovery -> parse -> merge.

#![allow(clippy::tests_outside_test_module)]

use std::{
    fs,
    path::{Path, PathBuf},
};

use lantern_config::{Config, ConfigError, ConfigWarning, Shortcut, local_template};

/// Temporary directory tree for a single test.
struct TestEnv {
    root: tempfile::TempDir,
}

impl TestEnv {
    fn new() -> Self {
        Self {
            root: tempfile::tempdir().unwrap(),
        }
    }

    fn path(&self) -> &Path {
        self.root.path()
    }

    fn create_dir(&self, rel_path: &str) -> PathBuf {
        let path = self.root.path().join(rel_path);
        fs::create_dir_all(&path).unwrap();
        path
    }

    fn create_file(&self, rel_path: &str, content: &str) -> PathBuf {
        let path = self.root.path().join(rel_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }
}

#[test]
fn test_load_root_config() {
    let env = TestEnv::new();
    env.create_file(
        ".lantern.toml",
        r#"
root = true

[site]
url = "docs.example.org"
folder = "guide"

[render]
batch_size = 25
"#,
    );

    let config = Config::load(env.path()).unwrap();

    assert_eq!(config.render.batch_size, 25);
    assert_eq!(config.render.preview_chars, 100);
    assert_eq!(
        config.index_location(),
        "https://docs.example.org/guide/search.json"
    );
    assert_eq!(config.config_root.as_deref(), Some(env.path()));
}

#[test]
fn test_nested_config_overrides_parent() {
    let env = TestEnv::new();
    env.create_file(
        ".lantern.toml",
        "root = true\n[render]\nbatch_size = 25\nellipsis = \"…\"\n[input]\nshortcut = \"ctrl+k\"\n",
    );
    env.create_file("site/.lantern.toml", "[render]\nbatch_size = 3\n");
    let nested = env.create_dir("site/content/posts");

    let config = Config::load(&nested).unwrap();

    assert_eq!(config.render.batch_size, 3);
    assert_eq!(config.render.ellipsis, "…");
    assert_eq!(config.input.shortcut, "ctrl+k".parse::<Shortcut>().unwrap());
    assert_eq!(config.config_root, Some(env.path().join("site")));
}

#[test]
fn test_root_config_stops_discovery() {
    let env = TestEnv::new();
    env.create_file(".lantern.toml", "[render]\nbatch_size = 99\n");
    env.create_file("site/.lantern.toml", "root = true\n");
    let site = env.path().join("site");

    let config = Config::load(&site).unwrap();

    assert_eq!(config.render.batch_size, 10);
}

#[test]
fn test_load_from_files_reports_parse_errors() {
    let env = TestEnv::new();
    let path = env.create_file(".lantern.toml", "[render\nbatch_size = 3\n");

    let err = Config::load_from_files(&[path.clone()]).unwrap_err();

    match err {
        ConfigError::ParseToml { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("expected ParseToml, got {other:?}"),
    }
}

#[test]
fn test_load_from_files_reports_missing_file() {
    let env = TestEnv::new();
    let missing = env.path().join("nope.toml");

    let err = Config::load_from_files(&[missing]).unwrap_err();

    assert!(matches!(err, ConfigError::ReadFile { .. }));
}

#[test]
fn test_invalid_value_names_file() {
    let env = TestEnv::new();
    let path = env.create_file(".lantern.toml", "root = true\n[search]\nmin_query_length = 0\n");

    let err = Config::load(env.path()).unwrap_err();

    let message = err.to_string();
    assert!(message.contains("search.min_query_length"));
    assert!(message.contains(&path.display().to_string()));
}

#[test]
fn test_disabled_search_warns() {
    let env = TestEnv::new();
    env.create_file(".lantern.toml", "root = true\n[site]\nsearch_enabled = false\n");

    let config = Config::load(env.path()).unwrap();

    assert!(!config.site.search_enabled);
    assert_eq!(config.validate(), vec![ConfigWarning::SearchDisabled]);
}

#[test]
fn test_written_template_loads_as_defaults() {
    let env = TestEnv::new();
    let mut contents = String::from("root = true\n");
    contents.push_str(&local_template());
    env.create_file(".lantern.toml", &contents);

    let config = Config::load(env.path()).unwrap();

    assert_eq!(config.site.url, "localhost");
    assert_eq!(config.render.batch_size, 10);
    assert!(config.validate().is_empty());
}
