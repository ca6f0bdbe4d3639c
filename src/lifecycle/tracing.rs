//! # Observability & Tracing
//!
//! Every coordinator call runs in a span named after the call, with the template
//! or address it works on as a field. Mutations log one `info` line once the
//! server accepted them; payloads and change sets are logged at `debug`.
//!
//! ```bash
//! # One line per mutation and per executed operation
//! RUST_LOG=info cargo run
//!
//! # Change sets, composite steps and view pushes
//! RUST_LOG=debug cargo run
//!
//! # Only the console core
//! RUST_LOG=mgmt_console=debug cargo run
//! ```
//!
//! With `RUST_LOG=info` the thread pool demo prints:
//!
//! ```text
//! INFO Model controller started size=3
//! INFO Composite executed steps=2
//! INFO Executed operation=/subsystem=jca/workmanager=wm1/short-running-threads=srt-b:add
//! INFO submit: Thread pool added address=/subsystem=jca/workmanager=wm1/short-running-threads=srt-b variant=Short Running
//! INFO Notification level=Success text="Thread Pool srt-b successfully added."
//! ```

use crate::config::ConsoleConfig;

/// Installs the global subscriber. `RUST_LOG` wins over `logging.filter`.
pub fn init_tracing(config: &ConsoleConfig) {
    mgmt_framework::tracing::setup_tracing_with_filter(&config.logging.filter);
}
