//! Decides what a change to the search input means.

use lantern_config::SearchSettings;

/// Outcome of planning one input value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// The trimmed input is empty.
    None,
    /// Too short to query; show nothing.
    Pending,
    /// Same text as the last committed query; nothing to do.
    Idempotent,
    /// New text long enough to query.
    Commit(String),
}

/// Gates queries on minimum length and on change since the last commit.
#[derive(Debug, Clone, Copy)]
pub struct QueryPlanner {
    /// Minimum trimmed length, in characters.
    min_len: usize,
}

impl QueryPlanner {
    /// Creates a planner that commits inputs of at least `min_len` characters.
    pub fn new(min_len: usize) -> Self {
        Self { min_len }
    }

    /// Minimum trimmed length before a query runs.
    pub fn min_len(&self) -> usize {
        self.min_len
    }

    /// Plans `raw` against the previously committed text.
    ///
    /// Length is counted in characters after trimming surrounding whitespace.
    pub fn plan(&self, raw: &str, prev: Option<&str>) -> Decision {
        let text = raw.trim();
        let len = text.chars().count();
        if len == 0 {
            Decision::None
        } else if len < self.min_len {
            Decision::Pending
        } else if prev == Some(text) {
            Decision::Idempotent
        } else {
            Decision::Commit(text.to_string())
        }
    }
}

impl Default for QueryPlanner {
    fn default() -> Self {
        Self::new(SearchSettings::default().min_query_length)
    }
}

impl From<&SearchSettings> for QueryPlanner {
    fn from(settings: &SearchSettings) -> Self {
        Self::new(settings.min_query_length)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn empty_and_whitespace_are_none() {
        let planner = QueryPlanner::default();
        assert_eq!(planner.plan("", None), Decision::None);
        assert_eq!(planner.plan("   \t", Some("rust")), Decision::None);
    }

    #[test]
    fn short_input_is_pending() {
        let planner = QueryPlanner::default();
        assert_eq!(planner.plan(" r ", None), Decision::Pending);
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let planner = QueryPlanner::default();
        assert_eq!(planner.plan("é", None), Decision::Pending);
        assert_eq!(planner.plan("日本", None), Decision::Commit("日本".into()));
    }

    #[test]
    fn new_text_commits_trimmed() {
        let planner = QueryPlanner::default();
        assert_eq!(
            planner.plan("  rust async ", Some("rust")),
            Decision::Commit("rust async".into())
        );
    }

    #[test]
    fn unchanged_text_is_idempotent() {
        let planner = QueryPlanner::default();
        assert_eq!(planner.plan("rust ", Some("rust")), Decision::Idempotent);
    }

    #[test]
    fn minimum_comes_from_settings() {
        let settings = SearchSettings {
            min_query_length: 4,
            ..SearchSettings::default()
        };
        let planner = QueryPlanner::from(&settings);
        assert_eq!(planner.min_len(), 4);
        assert_eq!(planner.plan("abc", None), Decision::Pending);
        assert_eq!(planner.plan("abcd", None), Decision::Commit("abcd".into()));
    }
}
