//! # Observability & Tracing
//!
//! Structured logging for the dispatcher, the model controller and everything
//! built on top of them.
//!
//! ```bash
//! RUST_LOG=info cargo run      # one line per executed operation
//! RUST_LOG=debug cargo run     # full operation payloads
//! ```
//!
//! `RUST_LOG` always wins. When it is unset, [`setup_tracing_with_filter`] falls
//! back to the filter it is given (usually from configuration), and
//! [`setup_tracing`] falls back to `info`.

use tracing_subscriber::EnvFilter;

pub fn setup_tracing() {
    setup_tracing_with_filter("info");
}

/// Installs the global subscriber. Calling it twice is a no-op.
pub fn setup_tracing_with_filter(fallback: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false) // Operation and address fields already say where we are
        .compact()
        .try_init();
}
