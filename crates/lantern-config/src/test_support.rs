//! Filesystem fixture for discovery tests.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::TempDir;

use crate::discovery::CONFIG_FILENAME;

/// A throwaway site checkout that config files are dropped into.
pub struct SiteTree {
    /// Removed on drop.
    root: TempDir,
}

impl SiteTree {
    /// An empty tree.
    pub fn new() -> Self {
        Self {
            root: tempfile::tempdir().unwrap(),
        }
    }

    /// The tree's root directory.
    pub fn root(&self) -> &Path {
        self.root.path()
    }

    /// Ensures `rel` exists as a directory; `""` is the root.
    pub fn dir(&self, rel: &str) -> PathBuf {
        let path = self.root.path().join(rel);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Writes `.lantern.toml` into `rel` with `body`.
    pub fn config(&self, rel: &str, body: &str) -> PathBuf {
        let path = self.dir(rel).join(CONFIG_FILENAME);
        fs::write(&path, body).unwrap();
        path
    }
}
