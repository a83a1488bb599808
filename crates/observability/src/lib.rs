//! Tracing and logging (shared setup).

/// Initialize process-wide observability (tracing/logging) from the environment.
///
/// This is safe to call multiple times; subsequent calls become no-ops. An
/// invalid `DEPOT_LOG_FORMAT` falls back to the default format.
pub fn init() {
    tracing::init();
}

/// Tracing configuration (filters, output format).
pub mod tracing;

pub use self::tracing::{init_with, ConfigError, LogFormat, TracingConfig};
