//! The in-memory document index.
//!
//! [`DocumentIndex`] owns the frozen [`DocumentSet`] and a Tantivy index built
//! from it exactly once. It answers queries synchronously.

use std::{fmt, sync::Arc, time::Instant};

use lantern_config::SearchSettings;
use tantivy::{
    Index, IndexReader, IndexWriter, ReloadPolicy, TantivyDocument,
    collector::TopDocs,
    tokenizer::TextAnalyzer,
};
use tracing::{debug, info};

use crate::{
    IndexError,
    analyzer::{LANTERN_TOKENIZER, build_analyzer, match_ranges, tokenize},
    document::{Document, DocumentSet},
    fuzzy::{EditDistancePolicy, FuzzyMatcher, SqrtHalfLength, clamp_distance},
    query::{QueryMode, QueryParams, build_query, effective_tokens},
    result::{MatchField, MatchPosition, MatchResult},
    schema::{IndexSchema, ORD_FIELD},
    source::IndexSource,
};

/// Memory budget for the single indexing thread (50 MB).
const WRITER_HEAP_SIZE: usize = 50_000_000;

/// Searchable index over a frozen set of documents.
pub struct DocumentIndex {
    /// The documents, in insertion order.
    documents: Arc<DocumentSet>,
    /// Field handles.
    schema: IndexSchema,
    /// Analyzer used for both indexing and queries.
    analyzer: TextAnalyzer,
    /// Reader over the committed index.
    reader: IndexReader,
    /// Query construction parameters.
    params: QueryParams,
    /// Inputs at or below this many characters never fall back to fuzzy matching.
    min_query_length: usize,
    /// Edit distance for the fuzzy fallback.
    policy: Box<dyn EditDistancePolicy>,
}

impl fmt::Debug for DocumentIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentIndex")
            .field("documents", &self.documents.len())
            .field("params", &self.params)
            .field("min_query_length", &self.min_query_length)
            .finish_non_exhaustive()
    }
}

impl DocumentIndex {
    /// Fetches the document map from `source` and builds the index.
    pub async fn load(source: &IndexSource) -> Result<Self, IndexError> {
        let started = Instant::now();
        let body = source.fetch().await?;
        let documents = DocumentSet::from_json(&body)?;
        let index = Self::build(documents)?;
        info!(
            source = %source,
            documents = index.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "document index loaded"
        );
        Ok(index)
    }

    /// Builds the index from documents already in memory.
    pub fn build(documents: DocumentSet) -> Result<Self, IndexError> {
        let schema = IndexSchema::new();
        let index = Index::create_in_ram(schema.schema().clone());
        let analyzer = build_analyzer();
        index
            .tokenizers()
            .register(LANTERN_TOKENIZER, analyzer.clone());

        let mut writer: IndexWriter = index
            .writer_with_num_threads(1, WRITER_HEAP_SIZE)
            .map_err(|e| IndexError::build(&e))?;
        for (ord, doc) in documents.iter().enumerate() {
            let mut tantivy_doc = TantivyDocument::new();
            tantivy_doc.add_text(schema.id, &doc.id);
            tantivy_doc.add_text(schema.title, &doc.title);
            tantivy_doc.add_text(schema.content, &doc.content);
            tantivy_doc.add_u64(schema.ord, ord as u64);
            writer
                .add_document(tantivy_doc)
                .map_err(|e| IndexError::build(&e))?;
        }
        writer.commit().map_err(|e| IndexError::build(&e))?;

        let reader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()
            .map_err(|e| IndexError::build(&e))?;

        let settings = SearchSettings::default();
        Ok(Self {
            documents: Arc::new(documents),
            schema,
            analyzer,
            reader,
            params: QueryParams::from(&settings),
            min_query_length: settings.min_query_length,
            policy: Box::new(SqrtHalfLength),
        })
    }

    /// Builds the index from a list of documents.
    pub fn from_documents(documents: impl IntoIterator<Item = Document>) -> Result<Self, IndexError> {
        Self::build(DocumentSet::from_documents(documents))
    }

    /// Applies query settings from configuration.
    pub fn with_settings(mut self, settings: &SearchSettings) -> Self {
        self.params = QueryParams::from(settings);
        self.min_query_length = settings.min_query_length;
        self
    }

    /// Replaces the fuzzy fallback's edit-distance policy.
    pub fn with_distance_policy(mut self, policy: impl EditDistancePolicy + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    /// Splits text into the normalized tokens the index was built with.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        tokenize(&self.analyzer, text)
    }

    /// Runs one matching strategy over analyzed tokens.
    ///
    /// Results are ordered by descending score, ties by insertion order, and
    /// each document appears at most once.
    pub fn query(&self, tokens: &[String], mode: QueryMode) -> Result<Vec<MatchResult>, IndexError> {
        let Some(query) = build_query(&self.schema, tokens, mode, &self.params) else {
            return Ok(Vec::new());
        };

        let searcher = self.reader.searcher();
        let limit = usize::try_from(searcher.num_docs()).unwrap_or(usize::MAX);
        if limit == 0 {
            return Ok(Vec::new());
        }

        let hits = searcher
            .search(&*query, &TopDocs::with_limit(limit))
            .map_err(|e| IndexError::query(&e))?;

        let ords = searcher
            .segment_readers()
            .iter()
            .map(|segment| segment.fast_fields().u64(ORD_FIELD))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| IndexError::query(&e))?;

        let mut scored: Vec<(f32, usize)> = Vec::with_capacity(hits.len());
        for (score, address) in hits {
            let ord = usize::try_from(address.segment_ord)
                .ok()
                .and_then(|segment| ords.get(segment))
                .and_then(|column| column.first(address.doc_id))
                .and_then(|ord| usize::try_from(ord).ok());
            if let Some(ord) = ord {
                scored.push((score, ord));
            }
        }
        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then(a.1.cmp(&b.1)));

        let matcher = TermMatcher::new(tokens, mode, &self.params);
        Ok(scored
            .into_iter()
            .filter_map(|(score, ord)| {
                let doc = self.documents.at(ord)?;
                Some(MatchResult {
                    document_id: doc.id.clone(),
                    score,
                    positions: self.positions(doc, &matcher),
                })
            })
            .collect())
    }

    /// Two-tier search over raw input: exact first, fuzzy if that finds nothing.
    ///
    /// The fuzzy fallback only runs when the trimmed input is longer than the
    /// minimum query length.
    pub fn search(&self, input: &str) -> Result<Vec<MatchResult>, IndexError> {
        let trimmed = input.trim();
        let tokens = self.tokenize(trimmed);

        let exact = self.query(&tokens, QueryMode::ExactBoosted)?;
        let len = trimmed.chars().count();
        if !exact.is_empty() || len <= self.min_query_length {
            return Ok(exact);
        }

        let distance = self.policy.distance(len);
        debug!(
            query = trimmed,
            distance,
            clamped = clamp_distance(distance),
            "no exact matches, falling back to fuzzy"
        );
        self.query(&tokens, QueryMode::Fuzzy { distance })
    }

    /// Looks up a document by id.
    pub fn document(&self, id: &str) -> Option<&Document> {
        self.documents.get(id)
    }

    /// Shared handle to the document set.
    pub fn documents(&self) -> Arc<DocumentSet> {
        Arc::clone(&self.documents)
    }

    /// Number of indexed documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// True when no documents were indexed.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Locates matched terms in a document's title and content.
    fn positions(&self, doc: &Document, matcher: &TermMatcher<'_>) -> Vec<MatchPosition> {
        let title = match_ranges(&self.analyzer, &doc.title, |t| matcher.matches(t))
            .into_iter()
            .map(|range| MatchPosition {
                field: MatchField::Title,
                range,
            });
        let content = match_ranges(&self.analyzer, &doc.content, |t| matcher.matches(t))
            .into_iter()
            .map(|range| MatchPosition {
                field: MatchField::Content,
                range,
            });
        title.chain(content).collect()
    }
}

/// Decides which analyzed tokens of a hit count as matched terms.
enum TermMatcher<'a> {
    /// Exact or prefix match against any query token.
    Prefix(Vec<&'a String>),
    /// Within edit distance of any query token.
    Fuzzy(FuzzyMatcher),
}

impl<'a> TermMatcher<'a> {
    /// Builds the matcher mirroring the query built for `mode`.
    fn new(tokens: &'a [String], mode: QueryMode, params: &QueryParams) -> Self {
        let kept = effective_tokens(tokens, mode, params);
        match mode {
            QueryMode::ExactBoosted => Self::Prefix(kept),
            QueryMode::Fuzzy { distance } => {
                let kept: Vec<String> = kept.into_iter().cloned().collect();
                Self::Fuzzy(FuzzyMatcher::new(&kept, clamp_distance(distance)))
            }
        }
    }

    /// True when `candidate` was matched by the query.
    fn matches(&self, candidate: &str) -> bool {
        match self {
            Self::Prefix(tokens) => tokens.iter().any(|t| candidate.starts_with(t.as_str())),
            Self::Fuzzy(matcher) => matcher.matches(candidate),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::fuzzy::FixedDistance;

    fn hello_goodbye() -> DocumentIndex {
        DocumentIndex::from_documents([
            Document::new("A", "Greeting", "hello world", "/a/"),
            Document::new("B", "Farewell", "goodbye", "/b/"),
        ])
        .unwrap()
    }

    fn ids(results: &[MatchResult]) -> Vec<&str> {
        results.iter().map(|r| r.document_id.as_str()).collect()
    }

    #[test]
    fn exact_match_without_fallback() {
        let index = hello_goodbye();
        let tokens = index.tokenize("hello");

        let exact = index.query(&tokens, QueryMode::ExactBoosted).unwrap();
        assert_eq!(ids(&exact), vec!["A"]);

        assert_eq!(ids(&index.search("hello").unwrap()), vec!["A"]);
    }

    #[test]
    fn typo_falls_back_to_fuzzy() {
        let index = hello_goodbye();
        let tokens = index.tokenize("helo");

        assert!(index.query(&tokens, QueryMode::ExactBoosted).unwrap().is_empty());
        let fuzzy = index.query(&tokens, QueryMode::Fuzzy { distance: 1 }).unwrap();
        assert_eq!(ids(&fuzzy), vec!["A"]);

        assert_eq!(ids(&index.search("helo").unwrap()), vec!["A"]);
    }

    #[test]
    fn prefix_matches() {
        let index = hello_goodbye();
        assert_eq!(ids(&index.search("good").unwrap()), vec!["B"]);
    }

    #[test]
    fn exact_outranks_prefix() {
        let index = DocumentIndex::from_documents([
            Document::new("long", "Notes", "helloworldly thoughts", "/1/"),
            Document::new("exact", "Notes", "hello there", "/2/"),
        ])
        .unwrap();

        let results = index.search("hello").unwrap();

        assert_eq!(ids(&results), vec!["exact", "long"]);
        assert!(results[0].score > results[1].score);
    }

    #[test]
    fn ties_keep_insertion_order() {
        let index = DocumentIndex::from_documents([
            Document::new("z", "Same", "identical text", "/z/"),
            Document::new("a", "Same", "identical text", "/a/"),
            Document::new("m", "Same", "identical text", "/m/"),
        ])
        .unwrap();

        assert_eq!(ids(&index.search("identical").unwrap()), vec!["z", "a", "m"]);
    }

    #[test]
    fn tokens_are_or_combined_and_deduplicated() {
        let index = hello_goodbye();

        let results = index.search("hello goodbye world").unwrap();

        let mut found = ids(&results);
        found.sort_unstable();
        assert_eq!(found, vec!["A", "B"]);
    }

    #[test]
    fn title_is_searched() {
        let index = hello_goodbye();
        assert_eq!(ids(&index.search("farewell").unwrap()), vec!["B"]);
    }

    #[test]
    fn short_input_never_falls_back() {
        let index = hello_goodbye();
        assert!(index.search("hx").unwrap().is_empty());
    }

    #[test]
    fn empty_document_set() {
        let index = DocumentIndex::build(DocumentSet::default()).unwrap();

        assert!(index.is_empty());
        assert!(index.search("anything").unwrap().is_empty());
    }

    #[test]
    fn empty_input_has_no_results() {
        let index = hello_goodbye();
        assert!(index.search("   ").unwrap().is_empty());
    }

    #[test]
    fn long_tokens_are_excluded_from_fuzzy() {
        let long = "a".repeat(21);
        let index = DocumentIndex::from_documents([Document::new("A", "T", long.clone(), "/a/")])
            .unwrap();
        let mut typo = long.clone();
        typo.push('b');
        let tokens = vec![typo];

        let fuzzy = index.query(&tokens, QueryMode::Fuzzy { distance: 2 }).unwrap();

        assert!(fuzzy.is_empty());
    }

    #[test]
    fn result_count_bounded_by_documents() {
        let index = hello_goodbye();
        let results = index.search("hello goodbye greeting farewell").unwrap();
        assert!(results.len() <= index.len());
    }

    #[test]
    fn positions_point_at_matched_terms() {
        let index = hello_goodbye();

        let results = index.search("hel").unwrap();

        let content: Vec<_> = results[0].ranges_in(MatchField::Content).cloned().collect();
        assert_eq!(content, vec![0..5]);
        assert_eq!(results[0].ranges_in(MatchField::Title).count(), 0);
    }

    #[test]
    fn fuzzy_positions_use_edit_distance() {
        let index = hello_goodbye();

        let results = index.search("helo").unwrap();

        let content: Vec<_> = results[0].ranges_in(MatchField::Content).cloned().collect();
        assert_eq!(content, vec![0..5]);
    }

    #[test]
    fn distance_policy_is_injectable() {
        let index = hello_goodbye().with_distance_policy(FixedDistance(0));
        assert!(index.search("helo").unwrap().is_empty());
    }

    #[test]
    fn settings_raise_minimum_length() {
        let settings = SearchSettings {
            min_query_length: 4,
            ..SearchSettings::default()
        };
        let index = hello_goodbye().with_settings(&settings);
        assert!(index.search("helo").unwrap().is_empty());
    }

    #[test]
    fn documents_are_shared() {
        let index = hello_goodbye();
        let docs = index.documents();
        assert_eq!(docs.len(), 2);
        assert_eq!(index.document("B").unwrap().url, "/b/");
        assert!(index.document("C").is_none());
    }
}
