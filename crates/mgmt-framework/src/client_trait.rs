//! # ModelClient Trait
//!
//! Provides a common interface for console-side coordinators, adding default read
//! operations built on top of a shared [`Dispatcher`].
use crate::{Composite, CompositeResult, DispatchError, Dispatcher, Operation, ResourceAddress};
use async_trait::async_trait;
use serde_json::Value;

/// Trait for coordinators that talk to the management model.
///
/// Implementors supply the dispatcher and an error mapping; the reads every
/// coordinator needs come for free.
///
/// # Example
///
/// ```rust
/// use mgmt_framework::{DispatchError, Dispatcher, ModelClient};
///
/// #[derive(Debug)]
/// struct ConsoleError(String);
///
/// struct Console {
///     dispatcher: Dispatcher,
/// }
///
/// impl ModelClient for Console {
///     type Error = ConsoleError;
///
///     fn dispatcher(&self) -> &Dispatcher {
///         &self.dispatcher
///     }
///
///     fn map_error(e: DispatchError) -> Self::Error {
///         ConsoleError(e.to_string())
///     }
/// }
/// ```
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// The coordinator-specific error type.
    type Error: Send;

    /// Access the shared dispatcher.
    fn dispatcher(&self) -> &Dispatcher;

    /// Map dispatch errors to the coordinator's error type.
    fn map_error(e: DispatchError) -> Self::Error;

    /// Read a resource including children down to `depth` levels.
    #[tracing::instrument(skip(self, address), fields(address = %address))]
    async fn read_resource(
        &self,
        address: ResourceAddress,
        depth: u32,
    ) -> Result<Value, Self::Error> {
        tracing::debug!("Sending request");
        self.dispatcher()
            .execute(Operation::read_resource(address, depth))
            .await
            .map_err(Self::map_error)
    }

    /// Execute a batch of operations as one request.
    async fn execute_composite(&self, composite: Composite) -> Result<CompositeResult, Self::Error> {
        self.dispatcher()
            .execute_composite(composite)
            .await
            .map_err(Self::map_error)
    }
}
