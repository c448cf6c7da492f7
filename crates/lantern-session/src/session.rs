//! The per-keystroke search state machine.
//!
//! ```text
//!            len 0                       len < MIN
//!   any ──────────────► Idle     any ─────────────► Pending
//!
//!            len ≥ MIN, changed
//!   any ─────────────────────────► Searching ──► Displaying(Results | Empty)
//! ```
//!
//! Every commit takes a new [`Generation`]. Asynchronous render work carries
//! the generation it was started for and is dropped once that generation is no
//! longer live.

use std::{fmt, sync::Arc};

use lantern_index::{DocumentIndex, IndexError, MatchResult};
use tracing::{debug, warn};

use crate::planner::{Decision, QueryPlanner};

/// Identifies one committed search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    /// Wraps a counter value.
    pub(crate) const fn new(value: u64) -> Self {
        Self(value)
    }

    /// The raw counter value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a displaying session is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Displayed {
    /// At least one result.
    Results,
    /// The "no results" placeholder.
    Empty,
}

/// Session states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No input; nothing shown.
    Idle,
    /// Input too short to query.
    Pending,
    /// A committed query is executing.
    Searching,
    /// Results for the committed query are being shown.
    Displaying(Displayed),
}

/// Something that can answer a committed query.
pub trait QueryBackend {
    /// Runs the two-tier search for `text`.
    fn search(&self, text: &str) -> Result<Vec<MatchResult>, IndexError>;
}

impl QueryBackend for DocumentIndex {
    fn search(&self, text: &str) -> Result<Vec<MatchResult>, IndexError> {
        Self::search(self, text)
    }
}

impl<T: QueryBackend + ?Sized> QueryBackend for Arc<T> {
    fn search(&self, text: &str) -> Result<Vec<MatchResult>, IndexError> {
        (**self).search(text)
    }
}

impl<T: QueryBackend + ?Sized> QueryBackend for &T {
    fn search(&self, text: &str) -> Result<Vec<MatchResult>, IndexError> {
        (**self).search(text)
    }
}

/// Result of feeding one input value to the session.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// Entered Idle.
    Cleared,
    /// Entered Pending.
    Pending,
    /// Same committed text; nothing changed.
    Unchanged,
    /// A new query ran.
    Committed {
        /// Generation of the new search.
        generation: Generation,
        /// Ordered results, shared with render work.
        results: Arc<[MatchResult]>,
    },
}

/// Owns the current input, the committed query and the generation counter.
#[derive(Debug)]
pub struct SearchSession {
    /// Length and idempotence gate.
    planner: QueryPlanner,
    /// Current state.
    state: SessionState,
    /// Text of the last committed query, while it is still shown.
    committed: Option<String>,
    /// Last generation handed out.
    counter: u64,
    /// Generation whose render work may still touch the surface.
    live: Option<Generation>,
}

impl SearchSession {
    /// Creates an idle session.
    pub fn new(planner: QueryPlanner) -> Self {
        Self {
            planner,
            state: SessionState::Idle,
            committed: None,
            counter: 0,
            live: None,
        }
    }

    /// Current state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Text of the committed query being displayed, if any.
    pub fn committed(&self) -> Option<&str> {
        self.committed.as_deref()
    }

    /// Generation whose render work is still wanted.
    pub fn live_generation(&self) -> Option<Generation> {
        self.live
    }

    /// True when work tagged with `generation` should proceed.
    pub fn is_current(&self, generation: Generation) -> bool {
        self.live == Some(generation)
    }

    /// Feeds the current raw input value through the planner.
    ///
    /// A commit runs the query synchronously on `backend`. A failed query is
    /// logged and treated as zero results.
    pub fn handle_input(&mut self, raw: &str, backend: &(impl QueryBackend + ?Sized)) -> Transition {
        match self.planner.plan(raw, self.committed.as_deref()) {
            Decision::None => {
                self.reset();
                Transition::Cleared
            }
            Decision::Pending => {
                self.state = SessionState::Pending;
                self.committed = None;
                self.live = None;
                Transition::Pending
            }
            Decision::Idempotent => Transition::Unchanged,
            Decision::Commit(text) => self.commit(text, backend),
        }
    }

    /// Forces the session to Idle, abandoning any render work in flight.
    ///
    /// Returns false if it was already idle.
    pub fn reset(&mut self) -> bool {
        let was_idle = self.state == SessionState::Idle;
        self.state = SessionState::Idle;
        self.committed = None;
        self.live = None;
        !was_idle
    }

    /// Starts a new generation and runs the query.
    fn commit(&mut self, text: String, backend: &(impl QueryBackend + ?Sized)) -> Transition {
        self.counter += 1;
        let generation = Generation::new(self.counter);
        self.live = Some(generation);
        self.state = SessionState::Searching;
        debug!(%generation, query = %text, "committing query");

        let results = match backend.search(&text) {
            Ok(results) => results,
            Err(err) => {
                warn!(%generation, query = %text, error = %err, "query failed; showing no results");
                Vec::new()
            }
        };

        self.state = SessionState::Displaying(if results.is_empty() {
            Displayed::Empty
        } else {
            Displayed::Results
        });
        self.committed = Some(text);

        Transition::Committed {
            generation,
            results: results.into(),
        }
    }
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new(QueryPlanner::default())
    }
}
