//! Logging setup for the CLI.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (e.g. `VIZE_LOG=debug`).
pub const LOG_ENV: &str = "VIZE_LOG";

/// Install a stderr subscriber filtered by [`LOG_ENV`], warnings only by default.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_env_filter(filter)
        .try_init();
}
