//! Runtime orchestration.
//!
//! - [`ConsoleSystem`] starts the model controller, wires the coordinator, the
//!   guard and the JCA presenter around one dispatcher, and shuts it all down.
//! - [`init_tracing`] installs the subscriber with the configured filter.

pub mod console_system;
pub mod tracing;

pub use console_system::*;
pub use tracing::*;
