//! Query construction for the two matching strategies.
//!
//! - [`QueryMode::ExactBoosted`]: for each token, the better of a boosted
//!   exact-term match and a prefix match, over title and content. Tokens are
//!   OR-combined.
//! - [`QueryMode::Fuzzy`]: for each token, an edit-distance match over title
//!   and content. Tokens longer than the configured limit are skipped.

use tantivy::{
    Term,
    query::{BooleanQuery, BoostQuery, DisjunctionMaxQuery, FuzzyTermQuery, Occur, Query, TermQuery},
    schema::{Field, IndexRecordOption},
};

use crate::{fuzzy::clamp_distance, schema::IndexSchema};

/// Matching strategy for a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryMode {
    /// Precision first: exact terms weighted over prefix matches.
    ExactBoosted,
    /// Typo tolerant: terms within `distance` edits.
    Fuzzy {
        /// Requested edit distance, clamped to what the index supports.
        distance: u8,
    },
}

/// Parameters shared by both strategies.
#[derive(Debug, Clone, Copy)]
pub struct QueryParams {
    /// Weight applied to exact-term clauses.
    pub exact_boost: f32,
    /// Tokens longer than this many characters are excluded from fuzzy queries.
    pub max_fuzzy_term_length: usize,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            exact_boost: 10.0,
            max_fuzzy_term_length: 20,
        }
    }
}

impl From<&lantern_config::SearchSettings> for QueryParams {
    fn from(settings: &lantern_config::SearchSettings) -> Self {
        Self {
            exact_boost: settings.exact_boost,
            max_fuzzy_term_length: settings.max_fuzzy_term_length,
        }
    }
}

/// Returns the tokens a query in `mode` actually searches for.
pub fn effective_tokens<'a>(
    tokens: &'a [String],
    mode: QueryMode,
    params: &QueryParams,
) -> Vec<&'a String> {
    match mode {
        QueryMode::ExactBoosted => tokens.iter().collect(),
        QueryMode::Fuzzy { .. } => tokens
            .iter()
            .filter(|token| token.chars().count() <= params.max_fuzzy_term_length)
            .collect(),
    }
}

/// Builds the query for `tokens` in `mode`.
///
/// Returns `None` when no token survives filtering.
pub fn build_query(
    schema: &IndexSchema,
    tokens: &[String],
    mode: QueryMode,
    params: &QueryParams,
) -> Option<Box<dyn Query>> {
    let clauses: Vec<(Occur, Box<dyn Query>)> = effective_tokens(tokens, mode, params)
        .into_iter()
        .map(|token| {
            let query = match mode {
                QueryMode::ExactBoosted => exact_boosted_token(schema, token, params.exact_boost),
                QueryMode::Fuzzy { distance } => {
                    fuzzy_token(schema, token, clamp_distance(distance))
                }
            };
            (Occur::Should, query)
        })
        .collect();

    if clauses.is_empty() {
        return None;
    }

    Some(Box::new(BooleanQuery::new(clauses)))
}

/// Per-token query: max of boosted exact match and prefix match, across fields.
fn exact_boosted_token(schema: &IndexSchema, token: &str, boost: f32) -> Box<dyn Query> {
    let mut disjuncts: Vec<Box<dyn Query>> = Vec::new();
    for field in schema.text_fields() {
        let term = Term::from_field_text(field, token);
        let exact = TermQuery::new(term.clone(), IndexRecordOption::WithFreqs);
        disjuncts.push(Box::new(BoostQuery::new(Box::new(exact), boost)));
        disjuncts.push(Box::new(FuzzyTermQuery::new_prefix(term, 0, true)));
    }
    Box::new(DisjunctionMaxQuery::new(disjuncts))
}

/// Per-token query: edit-distance match across fields.
fn fuzzy_token(schema: &IndexSchema, token: &str, distance: u8) -> Box<dyn Query> {
    let disjuncts: Vec<Box<dyn Query>> = schema
        .text_fields()
        .into_iter()
        .map(|field: Field| {
            let term = Term::from_field_text(field, token);
            Box::new(FuzzyTermQuery::new(term, distance, true)) as Box<dyn Query>
        })
        .collect();
    Box::new(DisjunctionMaxQuery::new(disjuncts))
}
