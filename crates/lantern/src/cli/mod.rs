//! CLI support for the `lantern` binary.

pub mod args;
pub mod commands;
pub mod context;
pub mod logging;
pub mod output;
