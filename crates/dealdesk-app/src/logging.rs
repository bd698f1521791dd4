//! # Logging Setup
//!
//! Tracing subscriber initialization for the session layer.

use tracing::info;
use tracing_subscriber::EnvFilter;

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// Default level is `info`; override per module with `RUST_LOG`, e.g.
/// `RUST_LOG=dealdesk_client=debug,info`.
///
/// Safe to call more than once: later calls are no-ops, which keeps tests
/// that each set up logging from stepping on one another.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let initialized = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok();

    if initialized {
        info!("Logging initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init();
        init(); // second call must not panic
    }
}
