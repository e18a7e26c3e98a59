use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `GIT_CURSOR_LOG=debug`
pub const LOG_ENV: &str = "GIT_CURSOR_LOG";

/// Install the global `tracing` subscriber.
///
/// Diagnostics go to stderr so stdout carries only the cursor log. The filter is
/// read from `GIT_CURSOR_LOG`, then `RUST_LOG`, and defaults to `warn`.
pub fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    // try_init so a second initialization is a no-op
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
