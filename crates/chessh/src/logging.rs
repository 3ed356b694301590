//! Logging initialization.

use tracing_subscriber::EnvFilter;

/// Installs a `tracing` subscriber that writes to stderr.
///
/// `RUST_LOG` wins when set; otherwise `default_directive` is used
/// (e.g. `"info"` or `"chessh=debug,reqwest=warn"`). Calling this more
/// than once is harmless: later calls are ignored.
pub fn init(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(version = env!("CARGO_PKG_VERSION"), "logging initialized");
    }
}
