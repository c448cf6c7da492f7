//! Edit-distance policy and Levenshtein automata for the fuzzy fallback.

use levenshtein_automata::{DFA, Distance, LevenshteinAutomatonBuilder};

/// Largest edit distance the index's fuzzy term query accepts.
pub const MAX_SUPPORTED_DISTANCE: u8 = 2;

/// Chooses the edit distance used by the fuzzy fallback for a query.
pub trait EditDistancePolicy: Send + Sync {
    /// Returns the edit distance for a query of `len` characters.
    fn distance(&self, len: usize) -> u8;
}

/// Distance grows with the square root of half the query length:
/// `round(sqrt(len / 2 - 1))`, with a negative radicand treated as zero.
///
/// | len    | distance |
/// |--------|----------|
/// | 0..=2  | 0        |
/// | 3..=6  | 1        |
/// | 7..=14 | 2        |
/// | 15..   | 3 or more |
#[derive(Debug, Clone, Copy, Default)]
pub struct SqrtHalfLength;

impl EditDistancePolicy for SqrtHalfLength {
    fn distance(&self, len: usize) -> u8 {
        let radicand = len as f64 / 2.0 - 1.0;
        if radicand <= 0.0 {
            return 0;
        }
        let distance = radicand.sqrt().round();
        if distance >= f64::from(u8::MAX) {
            u8::MAX
        } else {
            distance as u8
        }
    }
}

/// A fixed distance regardless of query length.
#[derive(Debug, Clone, Copy)]
pub struct FixedDistance(pub u8);

impl EditDistancePolicy for FixedDistance {
    fn distance(&self, _len: usize) -> u8 {
        self.0
    }
}

/// Clamps a policy distance to what the index can execute.
pub fn clamp_distance(distance: u8) -> u8 {
    distance.min(MAX_SUPPORTED_DISTANCE)
}

/// Matches analyzed tokens within an edit distance of a set of query tokens.
pub struct FuzzyMatcher {
    /// One automaton per query token.
    dfas: Vec<DFA>,
}

impl FuzzyMatcher {
    /// Builds automata for each query token at the given distance.
    ///
    /// Transpositions count as a single edit, matching the index's fuzzy query.
    pub fn new(tokens: &[String], distance: u8) -> Self {
        let builder = LevenshteinAutomatonBuilder::new(distance, true);
        let dfas = tokens.iter().map(|token| builder.build_dfa(token)).collect();
        Self { dfas }
    }

    /// True when `candidate` is within distance of any query token.
    pub fn matches(&self, candidate: &str) -> bool {
        self.dfas
            .iter()
            .any(|dfa| matches!(dfa.eval(candidate), Distance::Exact(_)))
    }
}
