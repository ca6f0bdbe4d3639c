//! The JCA subsystem: work managers, their thread pools, and the tracer.

pub mod metadata;
pub mod presenter;
pub mod templates;

pub use metadata::jca_registry;
pub use presenter::JcaPresenter;
