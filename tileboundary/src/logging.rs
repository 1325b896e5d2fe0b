//! Logging setup for binaries.
//!
//! The library only emits `tracing` events and never installs a subscriber;
//! a binary calls [`init_logging`] once at startup. Verbosity comes from
//! `RUST_LOG` (default `info`). Output goes to stderr so command output on
//! stdout stays machine-readable.

use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber.
///
/// Calling this twice panics (the subscriber can only be set once per
/// process), so it belongs in `main`, never in library code.
pub fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
