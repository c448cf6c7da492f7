//! Where the document map is loaded from.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use lantern_config::SiteSettings;
use tokio::fs;
use tracing::debug;
use url::Url;

use crate::IndexError;

/// Location of a published document map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexSource {
    /// Fetched over `http` or `https`.
    Remote(Url),
    /// Read from the local filesystem.
    Local(PathBuf),
}

impl IndexSource {
    /// Interprets a URL or filesystem path.
    ///
    /// `http(s)://` URLs are fetched, `file://` URLs and anything that does not
    /// parse as a URL are treated as paths.
    pub fn parse(location: &str) -> Result<Self, IndexError> {
        match Url::parse(location) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(Self::Remote(url)),
            Ok(url) if url.scheme() == "file" => url
                .to_file_path()
                .map(Self::Local)
                .map_err(|()| IndexError::fetch(location, "not a valid file URL")),
            Ok(url) if url.scheme().len() > 1 => Err(IndexError::fetch(
                location,
                format!("unsupported scheme `{}`", url.scheme()),
            )),
            // Relative paths, and Windows drive letters that parse as a scheme.
            _ => Ok(Self::Local(PathBuf::from(location))),
        }
    }

    /// Builds the source from the site's published location.
    pub fn resolve(site: &SiteSettings) -> Result<Self, IndexError> {
        Self::parse(&site.index_location())
    }

    /// Retrieves the raw document map.
    pub async fn fetch(&self) -> Result<String, IndexError> {
        debug!(source = %self, "fetching document map");
        match self {
            Self::Remote(url) => fetch_remote(url).await,
            Self::Local(path) => read_local(path).await,
        }
    }
}

impl fmt::Display for IndexSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote(url) => write!(f, "{url}"),
            Self::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Downloads the document map, treating any non-success status as a failure.
///
/// The request has no deadline; a slow server delays startup instead of
/// disabling search.
async fn fetch_remote(url: &Url) -> Result<String, IndexError> {
    let response = reqwest::Client::new()
        .get(url.clone())
        .send()
        .await
        .map_err(|e| IndexError::fetch(url.as_str(), e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(IndexError::fetch(url.as_str(), format!("HTTP status {status}")));
    }

    response
        .text()
        .await
        .map_err(|e| IndexError::fetch(url.as_str(), e))
}

/// Reads the document map from disk.
async fn read_local(path: &Path) -> Result<String, IndexError> {
    fs::read_to_string(path)
        .await
        .map_err(|e| IndexError::fetch(path.display().to_string(), e))
}
