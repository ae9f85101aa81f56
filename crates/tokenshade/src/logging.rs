//! Structured log setup for the binary.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (e.g. `tokenshade=debug`).
pub const LOG_ENV: &str = "TOKENSHADE_LOG";

const DEFAULT_FILTER: &str = "warn";

#[must_use]
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install a stderr fmt subscriber. A second call is a no-op.
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
