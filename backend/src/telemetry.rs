//! Tracing subscriber initialisation.

use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global tracing subscriber, filtered by `RUST_LOG`.
///
/// Safe to call more than once: a second initialisation is reported as a
/// warning through the already-installed subscriber instead of failing.
pub fn init_tracing() {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }
}
