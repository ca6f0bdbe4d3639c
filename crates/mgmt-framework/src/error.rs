//! # Framework Errors
//!
//! This module defines the common error types used by the dispatcher, the model
//! controller and the address resolution layer. Console code maps these into its
//! own error type, so every remote failure reaches the user through one channel.

/// Errors raised while resolving an [`AddressTemplate`](crate::AddressTemplate).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
    #[error("Malformed address segment: {0}")]
    MalformedSegment(String),
    #[error("Missing value for wildcard in {template} (segment {index})")]
    MissingName { template: String, index: usize },
    #[error("Unresolved placeholder {{{0}}}")]
    UnresolvedTuple(String),
}

/// Errors that can occur while dispatching operations to the management model.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    #[error("Dispatcher closed")]
    Closed,
    #[error("Model controller dropped response channel")]
    Dropped,
    /// The server rejected the operation. The description is kept verbatim.
    #[error("{0}")]
    Failed(String),
    #[error(transparent)]
    Address(#[from] AddressError),
}
