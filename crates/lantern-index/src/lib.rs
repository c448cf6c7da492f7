//! In-memory document index for lantern site search.
//!
//! This crate loads the document map a static site publishes and answers
//! queries against it without further network access. It handles:
//! - Fetching the document map from a URL or a local file
//! - Building a Tantivy index in RAM, once, from the frozen document set
//! - Exact-with-prefix queries, and a typo-tolerant fuzzy fallback
//! - Locating matched terms in titles and content
//!
//! # Example
//!
//! ```
//! use lantern_index::{Document, DocumentIndex};
//!
//! let index = DocumentIndex::from_documents([
//!     Document::new("A", "Greeting", "hello world", "/a/"),
//!     Document::new("B", "Farewell", "goodbye", "/b/"),
//! ])
//! .unwrap();
//!
//! let results = index.search("helo").unwrap();
//! assert_eq!(results[0].document_id, "A");
//! ```

#![warn(missing_docs)]

mod analyzer;
mod document;
mod error;
mod fuzzy;
mod index;
mod query;
mod result;
mod schema;
mod source;

pub use document::{Document, DocumentSet};
pub use error::IndexError;
pub use fuzzy::{
    EditDistancePolicy, FixedDistance, MAX_SUPPORTED_DISTANCE, SqrtHalfLength, clamp_distance,
};
pub use index::DocumentIndex;
pub use query::QueryMode;
pub use result::{MatchField, MatchPosition, MatchResult};
pub use source::IndexSource;
