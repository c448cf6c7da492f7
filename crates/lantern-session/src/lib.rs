//! Search session, batched rendering and input handling for lantern.
//!
//! This crate turns keystrokes into queries against a
//! [`lantern_index::DocumentIndex`] and results into items on a host-provided
//! surface:
//! - [`QueryPlanner`] gates queries on length and on change
//! - [`SearchSession`] is the state machine and owns the generation counter
//! - [`ResultRenderer`] materializes results in batches, dropping stale work
//! - [`InputController`] maps typing, shortcuts, focus and visibility to the session
//! - [`runtime::run`] loads the index and runs the event loop
//!
//! Hosts plug in through the traits in [`host`] and defer work through a
//! [`Scheduler`].

#![warn(missing_docs)]

mod controller;
pub mod host;
mod planner;
mod render;
pub mod runtime;
mod schedule;
mod session;

pub use controller::{InputController, InputEvent, Key, KeyPress};
pub use host::{ActiveFlag, FocusTarget, Host, Navigator, ResultSurface, TextInput, Visibility};
pub use planner::{Decision, QueryPlanner};
pub use render::{Activation, BatchOutcome, RenderBatch, ResultItem, ResultRenderer, preview};
pub use schedule::{ManualScheduler, Scheduler, TokioScheduler, Wakeup};
pub use session::{
    Displayed, Generation, QueryBackend, SearchSession, SessionState, Transition,
};
