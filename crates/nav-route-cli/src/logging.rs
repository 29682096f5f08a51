/*!
Logging setup for the command line tool.

Logs go to stderr so JSON and GPX output on stdout stays machine readable. `RUST_LOG`
takes precedence; otherwise the `--log-level` filter applies.
*/

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Build the filter from RUST_LOG, falling back to `default_filter`
fn env_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::try_new(default_filter).unwrap_or_else(|err| {
            eprintln!("Invalid log filter {:?} ({}), using \"info\"", default_filter, err);
            EnvFilter::new("info")
        })
    })
}

/// Initialize logging with sensible defaults
pub fn setup_logging(default_filter: &str) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(env_filter(default_filter));
    let registry = tracing_subscriber::registry().with(fmt_layer);

    if registry.try_init().is_err() {
        tracing::warn!("Logging was already initialized");
        return;
    }

    #[cfg(feature = "profiling")]
    tracing::info!("Logging initialized (profiling spans enabled)");
    #[cfg(not(feature = "profiling"))]
    tracing::debug!("Logging initialized");
}
