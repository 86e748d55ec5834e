//! Logging initialization

use tracing_subscriber::EnvFilter;

/// Environment variable holding the tracing filter directive.
pub const LOG_ENV: &str = "HOLE_LOG";

/// Filter used when `HOLE_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "warn";

/// Installs a stderr subscriber filtered by `HOLE_LOG`.
///
/// Stdout stays reserved for command output. Calling this twice is
/// harmless; the first subscriber stays installed.
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
