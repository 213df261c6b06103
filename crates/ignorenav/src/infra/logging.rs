//! Logging initialization.

use tracing_subscriber::EnvFilter;

/// Environment variable controlling log verbosity.
pub const LOG_ENV: &str = "IGNORENAV_LOG";

/// Install the global tracing subscriber.
///
/// Logs go to stderr so they never mix with resolution output on stdout.
/// Repeated calls are harmless; only the first installation wins.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
