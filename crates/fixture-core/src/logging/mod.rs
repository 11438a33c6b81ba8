//! Structured logging with `tracing`.
//!
//! The binary calls [`init_subscriber`] once at startup. `RUST_LOG` takes
//! precedence over the configured level so a single run can be made noisier
//! without touching the settings file.
//!
//! Tests use [`capture_logs`] to assert on emitted events.

pub mod test_utils;

pub use test_utils::{CapturedEvent, CapturedLogs, capture_logs};

/// Initialize the global tracing subscriber with compact stderr output.
///
/// Subsequent calls are no-ops.
///
/// # Arguments
///
/// * `level` - Filter directive used when `RUST_LOG` is unset (e.g. `"info"`).
pub fn init_subscriber(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .compact();

    let _ = subscriber.try_init();
}
