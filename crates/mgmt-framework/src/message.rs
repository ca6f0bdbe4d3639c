//! # Dispatch Messages
//!
//! This module defines the request type sent from a [`Dispatcher`](crate::Dispatcher)
//! to whatever serves the management model: the in-memory
//! [`ModelController`](crate::ModelController), a mock, or a transport bridge.

use crate::error::DispatchError;
use crate::operation::{Composite, CompositeResult, Operation};
use serde_json::Value;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by the serving side.
pub type Response<T> = oneshot::Sender<Result<T, DispatchError>>;

/// A request travelling to the management model.
///
/// There are exactly two shapes: one operation, or one composite. Every request
/// carries its own responder, so a reply can never be confused with another
/// in-flight request.
#[derive(Debug)]
pub enum DispatchRequest {
    Execute {
        operation: Operation,
        respond_to: Response<Value>,
    },
    ExecuteComposite {
        composite: Composite,
        respond_to: Response<CompositeResult>,
    },
}
