//! # Dispatcher
//!
//! The client half of the management channel.

use crate::error::DispatchError;
use crate::message::DispatchRequest;
use crate::operation::{Composite, CompositeResult, Operation};
use serde_json::Value;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

/// Sends operations to the management model and awaits their one-shot replies.
///
/// * **Cloneable** – holds only a sender, so cloning is inexpensive and every
///   coordinator or presenter can own its copy.
/// * **Async API** – each call suspends only until its own reply arrives; there
///   is no queueing, retry or cancellation at this layer.
#[derive(Clone, Debug)]
pub struct Dispatcher {
    sender: mpsc::Sender<DispatchRequest>,
}

impl Dispatcher {
    pub fn new(sender: mpsc::Sender<DispatchRequest>) -> Self {
        Self { sender }
    }

    pub async fn execute(&self, operation: Operation) -> Result<Value, DispatchError> {
        debug!(%operation, "Dispatching");
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(DispatchRequest::Execute {
                operation,
                respond_to,
            })
            .await
            .map_err(|_| DispatchError::Closed)?;
        let result = response.await.map_err(|_| DispatchError::Dropped)?;
        if let Err(e) = &result {
            warn!(error = %e, "Operation failed");
        }
        result
    }

    pub async fn execute_composite(
        &self,
        composite: Composite,
    ) -> Result<CompositeResult, DispatchError> {
        debug!(steps = composite.len(), "Dispatching composite");
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(DispatchRequest::ExecuteComposite {
                composite,
                respond_to,
            })
            .await
            .map_err(|_| DispatchError::Closed)?;
        let result = response.await.map_err(|_| DispatchError::Dropped)?;
        if let Err(e) = &result {
            warn!(error = %e, "Composite failed");
        }
        result
    }
}
