//! Logging setup for hosts that embed the scene.

use pandu_core::config::GeneralConfig;
use tracing_subscriber::EnvFilter;

/// Install a global `fmt` subscriber at `level` (e.g. `"info"`), letting
/// `RUST_LOG` override it. Returns `false` if a subscriber was already set.
pub fn init_tracing(level: &str) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init()
        .is_ok()
}

/// Install the subscriber at the configured `general.log_level`.
pub fn init_tracing_from(config: &GeneralConfig) -> bool {
    init_tracing(&config.log_level)
}
