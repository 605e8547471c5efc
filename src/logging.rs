//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Install the global subscriber. Safe to call more than once.
///
/// The filter comes from `RUST_LOG`; without it, `INFO` and above are shown.
/// Output goes to stderr so it never mixes with printed results.
pub fn init() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::default().add_directive(tracing::Level::INFO.into()));

        let result = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_target(true)
            .compact()
            .with_writer(std::io::stderr)
            .try_init();

        if let Err(e) = result {
            eprintln!("Failed to initialize tracing: {e}");
        }
    });
}
