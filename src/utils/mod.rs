use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Installs the global `fmt` subscriber. `RUST_LOG` wins over `directive`.
pub fn init_tracing(directive: &str) {
    TRACING_INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));
        // Another subscriber may already be installed by the host process.
        let _ = fmt().with_env_filter(filter).try_init();
    });
}
