//! Tracing subscriber setup.
//!
//! The engine only emits `tracing` events; binaries and tests decide where
//! they go.

use tracing_subscriber::{fmt, EnvFilter};

/// Installs a global fmt subscriber.
///
/// The filter is read from `RUST_LOG` (e.g. `RUST_LOG=u_dyeline=debug`)
/// and defaults to `info`.
///
/// # Panics
/// Panics if a global subscriber is already installed.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .init();
}

/// Installs a `debug` subscriber writing through the test harness.
///
/// Safe to call from every test; later calls are ignored.
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
