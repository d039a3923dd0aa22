//! Logging initialization.
//!
//! Sets up tracing with a level from `RUST_LOG` or the configured default,
//! writing human-readable lines to stderr, or JSON lines when requested.

use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the tracing subscriber.
///
/// `level` is the default when `RUST_LOG` is unset. `json` switches the
/// output format to one JSON object per line. Safe to call once; later
/// calls are ignored.
pub fn init_logging(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    if json {
        let _ = fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    } else {
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }
}
