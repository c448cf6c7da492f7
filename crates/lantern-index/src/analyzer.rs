//! Text analysis pipeline for the lantern document index.
//!
//! Implements a three-stage pipeline shared by indexing and querying:
//! 1. `SimpleTokenizer` - splits on whitespace and punctuation
//! 2. `LowerCaser` - converts tokens to lowercase
//! 3. `RemoveLongFilter` - removes tokens longer than 40 bytes
//!
//! No stemming is applied, so prefix and edit-distance matching operate on
//! the words as the reader typed them.

use std::ops::Range;

use tantivy::tokenizer::{LowerCaser, RemoveLongFilter, SimpleTokenizer, TextAnalyzer, TokenStream};

/// Name of the custom tokenizer registered with Tantivy.
pub const LANTERN_TOKENIZER: &str = "lantern_text";

/// Maximum token length in bytes before filtering.
const MAX_TOKEN_LENGTH: usize = 40;

/// Builds the lantern text analyzer.
pub fn build_analyzer() -> TextAnalyzer {
    TextAnalyzer::builder(SimpleTokenizer::default())
        .filter(LowerCaser)
        .filter(RemoveLongFilter::limit(MAX_TOKEN_LENGTH))
        .build()
}

/// Runs the analyzer over `text` and returns the normalized tokens.
pub fn tokenize(analyzer: &TextAnalyzer, text: &str) -> Vec<String> {
    let mut analyzer = analyzer.clone();
    let mut stream = analyzer.token_stream(text);
    let mut tokens = Vec::new();
    while let Some(token) = stream.next() {
        tokens.push(token.text.clone());
    }
    tokens
}

/// Returns the byte ranges of the tokens in `text` accepted by `matches`.
///
/// Offsets refer to the original text. Ranges are sorted and merged where they
/// overlap or touch.
pub fn match_ranges(
    analyzer: &TextAnalyzer,
    text: &str,
    mut matches: impl FnMut(&str) -> bool,
) -> Vec<Range<usize>> {
    if text.is_empty() {
        return Vec::new();
    }

    let mut analyzer = analyzer.clone();
    let mut stream = analyzer.token_stream(text);
    let mut ranges: Vec<Range<usize>> = Vec::new();
    while let Some(token) = stream.next() {
        if matches(&token.text) {
            ranges.push(token.offset_from..token.offset_to);
        }
    }

    merge_ranges(ranges)
}

/// Merges overlapping or adjacent byte ranges.
///
/// The result is sorted by start position with no overlaps.
fn merge_ranges(mut ranges: Vec<Range<usize>>) -> Vec<Range<usize>> {
    ranges.sort_by_key(|r| r.start);

    let mut merged: Vec<Range<usize>> = Vec::with_capacity(ranges.len());
    for range in ranges {
        match merged.last_mut() {
            Some(current) if range.start <= current.end => {
                current.end = current.end.max(range.end);
            }
            _ => merged.push(range),
        }
    }
    merged
}
