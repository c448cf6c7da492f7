//! Scored query results.

use std::ops::Range;

use serde::Serialize;

/// Field a matched term was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchField {
    /// The page title.
    Title,
    /// The page content.
    Content,
}

/// Byte range of a matched term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchPosition {
    /// Field the range indexes into.
    pub field: MatchField,
    /// Byte range within that field's text.
    pub range: Range<usize>,
}

/// A scored reference to a document.
///
/// Results are ordered by descending score; equal scores keep document
/// insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    /// Id of the matched document.
    pub document_id: String,
    /// Relevance score.
    pub score: f32,
    /// Where the query's terms occur in the title and content.
    pub positions: Vec<MatchPosition>,
}

impl MatchResult {
    /// Ranges of matched terms in the given field.
    pub fn ranges_in(&self, field: MatchField) -> impl Iterator<Item = &Range<usize>> {
        self.positions
            .iter()
            .filter(move |p| p.field == field)
            .map(|p| &p.range)
    }
}
