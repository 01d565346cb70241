//! Tracing subscriber setup for the soapdrill binary.
//!
//! Events go to stderr so that command output on stdout stays clean. The
//! level is read from `RUST_LOG`, falling back to [`DEFAULT_FILTER`].

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "warn,soapdrill=info";

/// Builds the filter from `RUST_LOG` or [`DEFAULT_FILTER`].
#[must_use]
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber.
///
/// Calling this more than once leaves the first subscriber in place.
pub fn init() {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .compact();

    let installed = tracing_subscriber::registry()
        .with(env_filter())
        .with(stderr_layer)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!("tracing initialised");
    }
}
