//! Diagnostic logging setup

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Install the global tracing subscriber
///
/// Honors `RUST_LOG`; defaults to `reporteria=info`. Output goes to stderr so
/// it never mixes with command output. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("reporteria=info"));

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}
