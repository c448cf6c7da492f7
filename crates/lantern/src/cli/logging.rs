//! Diagnostic log setup.

use std::io;

use tracing_subscriber::EnvFilter;

/// Environment variable holding a log filter directive.
pub const LOG_ENV: &str = "LANTERN_LOG";

/// Installs a stderr log subscriber.
///
/// `LANTERN_LOG` takes precedence; otherwise `verbosity` picks the level.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    // A subscriber installed earlier (in tests) stays in place.
    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init()
        .is_err()
    {
        tracing::debug!("log subscriber already installed");
    }
}

/// Filter directive for a `-v` count.
fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
