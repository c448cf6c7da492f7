//! Error types for the lantern-index crate.

use thiserror::Error;

/// Errors that can occur when loading or querying the document index.
#[derive(Debug, Error)]
pub enum IndexError {
    /// The document map could not be retrieved.
    #[error("failed to fetch document map from {location}: {message}")]
    Fetch {
        /// URL or path the document map was requested from.
        location: String,
        /// Error message.
        message: String,
    },

    /// The document map was retrieved but is not a valid map of documents.
    #[error("failed to parse document map: {0}")]
    Parse(#[from] serde_json::Error),

    /// The search index could not be built from the documents.
    #[error("failed to build search index: {0}")]
    Build(String),

    /// A query failed to execute against a built index.
    #[error("query failed: {0}")]
    Query(String),
}

impl IndexError {
    /// Creates a `Fetch` error from a location and any displayable cause.
    pub(crate) fn fetch(location: impl Into<String>, cause: impl ToString) -> Self {
        Self::Fetch {
            location: location.into(),
            message: cause.to_string(),
        }
    }

    /// Creates a `Build` error from a Tantivy error.
    pub(crate) fn build(source: &tantivy::TantivyError) -> Self {
        Self::Build(source.to_string())
    }

    /// Creates a `Query` error from a Tantivy error.
    pub(crate) fn query(source: &tantivy::TantivyError) -> Self {
        Self::Query(source.to_string())
    }
}
