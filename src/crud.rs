//! # CRUD Coordinator
//!
//! Turns add / save / reset / remove intents into address-scoped operations.
//!
//! Every operation follows the same contract: mutate the remote model, and only
//! if that succeeded run the caller's `on_complete` continuation (normally a
//! reload of whatever view shows the resource). On failure the error is returned
//! as-is and the continuation never runs. The mutation is always awaited before
//! the continuation starts, so a refresh can never race the change it follows.
//!
//! The coordinator holds no state of its own; it can be shared freely and used
//! concurrently. Two calls against the same address are not coalesced: each
//! refresh re-reads the full authoritative state, so whichever reply lands last
//! simply wins on screen.
//!
//! ```rust,ignore
//! crud.save(&template, "default", &changed, "Work manager saved", || presenter.reload())
//!     .await?;
//! ```

use crate::error::ConsoleError;
use crate::form::Form;
use crate::notify::{messages, Message, Notifier};
use mgmt_framework::{
    AddressTemplate, Composite, DispatchError, Dispatcher, Metadata, ModelClient, Operation,
    ResetTarget, ResourceAddress, StatementContext,
};
use serde_json::{Map, Value};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// A change set on its way to the server. Lives for one call.
#[derive(Debug)]
pub struct PendingMutation<'a> {
    pub address: ResourceAddress,
    pub changed: &'a Map<String, Value>,
}

impl PendingMutation<'_> {
    /// One `write-attribute` per changed attribute; `null` means undefine.
    pub fn operations(&self) -> Vec<Operation> {
        self.changed
            .iter()
            .map(|(name, value)| {
                if value.is_null() {
                    Operation::undefine_attribute(self.address.clone(), name)
                } else {
                    Operation::write_attribute(self.address.clone(), name, value.clone())
                }
            })
            .collect()
    }
}

/// Operations that drive the attributes of `form` back to what `metadata` declares.
pub fn reset_operations(address: &ResourceAddress, form: &Form, metadata: &Metadata) -> Vec<Operation> {
    form.attribute_names()
        .filter_map(|name| {
            let target = metadata.attribute(name)?.reset_target();
            match target {
                ResetTarget::Default(value) => {
                    Some(Operation::write_attribute(address.clone(), name, value))
                }
                ResetTarget::Undefine => Some(Operation::undefine_attribute(address.clone(), name)),
                ResetTarget::Keep => None,
            }
        })
        .collect()
}

/// Generic add / save / reset / remove orchestration.
#[derive(Clone)]
pub struct CrudCoordinator {
    dispatcher: Dispatcher,
    context: Arc<dyn StatementContext>,
    notifier: Arc<dyn Notifier>,
}

impl ModelClient for CrudCoordinator {
    type Error = ConsoleError;

    fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    fn map_error(e: DispatchError) -> Self::Error {
        e.into()
    }
}

impl CrudCoordinator {
    pub fn new(
        dispatcher: Dispatcher,
        context: Arc<dyn StatementContext>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            dispatcher,
            context,
            notifier,
        }
    }

    /// Resolves `template`, filling wildcards with `names`.
    pub fn resolve(
        &self,
        template: &AddressTemplate,
        names: &[&str],
    ) -> Result<ResourceAddress, ConsoleError> {
        Ok(template.resolve(self.context.as_ref(), names)?)
    }

    /// Sends `operations` as one request: nothing, a single operation, or a composite.
    async fn execute_all(&self, mut operations: Vec<Operation>) -> Result<(), ConsoleError> {
        match operations.len() {
            0 => Ok(()),
            1 => {
                let operation = operations.remove(0);
                self.dispatcher.execute(operation).await?;
                Ok(())
            }
            _ => {
                self.dispatcher
                    .execute_composite(Composite::new(operations))
                    .await?;
                Ok(())
            }
        }
    }

    // ------------------------------------------------------ read

    #[instrument(skip(self, template), fields(template = %template))]
    pub async fn read(&self, template: &AddressTemplate, depth: u32) -> Result<Value, ConsoleError> {
        let address = self.resolve(template, &[])?;
        self.read_resource(address, depth).await
    }

    // ------------------------------------------------------ add

    /// Adds `name` below the collection `template` (ending in `=*`).
    #[instrument(skip(self, template, payload, on_complete), fields(template = %template))]
    pub async fn add<F, Fut, T>(
        &self,
        type_label: &str,
        name: &str,
        template: &AddressTemplate,
        payload: Value,
        on_complete: F,
    ) -> Result<T, ConsoleError>
    where
        F: FnOnce(ResourceAddress) -> Fut,
        Fut: Future<Output = Result<T, ConsoleError>>,
    {
        let address = self.resolve(template, &[name])?;
        debug!(%address, ?payload, "add called");
        self.dispatcher
            .execute(Operation::add(address.clone(), payload))
            .await?;
        info!(%address, "Added");
        self.notifier
            .notify(Message::success(messages::add_resource_success(type_label, name)));
        on_complete(address).await
    }

    #[instrument(skip(self, template, payload, on_complete), fields(template = %template))]
    pub async fn add_singleton<F, Fut, T>(
        &self,
        type_label: &str,
        template: &AddressTemplate,
        payload: Value,
        on_complete: F,
    ) -> Result<T, ConsoleError>
    where
        F: FnOnce(ResourceAddress) -> Fut,
        Fut: Future<Output = Result<T, ConsoleError>>,
    {
        let address = self.resolve(template, &[])?;
        self.dispatcher
            .execute(Operation::add(address.clone(), payload))
            .await?;
        info!(%address, "Added");
        self.notifier
            .notify(Message::success(messages::add_singleton_success(type_label)));
        on_complete(address).await
    }

    // ------------------------------------------------------ save

    /// Writes only `changed` on resource `name`. An empty change set sends nothing
    /// and still completes.
    #[instrument(skip(self, template, changed, success_message, on_complete), fields(template = %template))]
    pub async fn save<F, Fut, T>(
        &self,
        template: &AddressTemplate,
        name: &str,
        changed: &Map<String, Value>,
        success_message: impl Into<String>,
        on_complete: F,
    ) -> Result<T, ConsoleError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ConsoleError>>,
    {
        let address = self.resolve(template, &[name])?;
        self.save_at(address, changed, success_message, on_complete)
            .await
    }

    #[instrument(skip(self, template, changed, success_message, on_complete), fields(template = %template))]
    pub async fn save_singleton<F, Fut, T>(
        &self,
        template: &AddressTemplate,
        changed: &Map<String, Value>,
        success_message: impl Into<String>,
        on_complete: F,
    ) -> Result<T, ConsoleError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ConsoleError>>,
    {
        let address = self.resolve(template, &[])?;
        self.save_at(address, changed, success_message, on_complete)
            .await
    }

    /// Like [`save`](Self::save) for an address the caller already resolved.
    pub async fn save_at<F, Fut, T>(
        &self,
        address: ResourceAddress,
        changed: &Map<String, Value>,
        success_message: impl Into<String>,
        on_complete: F,
    ) -> Result<T, ConsoleError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ConsoleError>>,
    {
        let mutation = PendingMutation { address, changed };
        debug!(?mutation, "save called");
        let operations = mutation.operations();
        if operations.is_empty() {
            self.notifier.notify(Message::info(messages::no_changes()));
        } else {
            let count = operations.len();
            self.execute_all(operations).await?;
            info!(address = %mutation.address, count, "Saved");
            self.notifier.notify(Message::success(success_message));
        }
        on_complete().await
    }

    // ------------------------------------------------------ reset

    /// Resets every attribute of `form` on resource `name` to its declared default.
    #[instrument(skip(self, template, form, metadata, on_complete), fields(template = %template))]
    pub async fn reset<F, Fut, T>(
        &self,
        type_label: &str,
        name: &str,
        template: &AddressTemplate,
        form: &Form,
        metadata: &Metadata,
        on_complete: F,
    ) -> Result<T, ConsoleError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ConsoleError>>,
    {
        let address = self.resolve(template, &[name])?;
        self.reset_at(
            address,
            form,
            metadata,
            messages::reset_resource_success(type_label, name),
            on_complete,
        )
        .await
    }

    #[instrument(skip(self, template, form, metadata, on_complete), fields(template = %template))]
    pub async fn reset_singleton<F, Fut, T>(
        &self,
        type_label: &str,
        template: &AddressTemplate,
        form: &Form,
        metadata: &Metadata,
        on_complete: F,
    ) -> Result<T, ConsoleError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ConsoleError>>,
    {
        let address = self.resolve(template, &[])?;
        let message = format!("{type_label} successfully reset.");
        self.reset_at(address, form, metadata, message, on_complete)
            .await
    }

    pub async fn reset_at<F, Fut, T>(
        &self,
        address: ResourceAddress,
        form: &Form,
        metadata: &Metadata,
        success_message: impl Into<String>,
        on_complete: F,
    ) -> Result<T, ConsoleError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ConsoleError>>,
    {
        let operations = reset_operations(&address, form, metadata);
        if operations.is_empty() {
            self.notifier.notify(Message::info(messages::no_reset()));
        } else {
            let count = operations.len();
            self.execute_all(operations).await?;
            info!(%address, count, "Reset");
            self.notifier.notify(Message::success(success_message));
        }
        on_complete().await
    }

    // ------------------------------------------------------ remove

    #[instrument(skip(self, template, on_complete), fields(template = %template))]
    pub async fn remove<F, Fut, T>(
        &self,
        type_label: &str,
        name: &str,
        template: &AddressTemplate,
        on_complete: F,
    ) -> Result<T, ConsoleError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ConsoleError>>,
    {
        let address = self.resolve(template, &[name])?;
        self.remove_at(
            address,
            messages::remove_resource_success(type_label, name),
            on_complete,
        )
        .await
    }

    #[instrument(skip(self, template, on_complete), fields(template = %template))]
    pub async fn remove_singleton<F, Fut, T>(
        &self,
        type_label: &str,
        template: &AddressTemplate,
        on_complete: F,
    ) -> Result<T, ConsoleError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ConsoleError>>,
    {
        let address = self.resolve(template, &[])?;
        self.remove_at(
            address,
            messages::remove_singleton_success(type_label),
            on_complete,
        )
        .await
    }

    pub async fn remove_at<F, Fut, T>(
        &self,
        address: ResourceAddress,
        success_message: impl Into<String>,
        on_complete: F,
    ) -> Result<T, ConsoleError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ConsoleError>>,
    {
        self.dispatcher
            .execute(Operation::remove(address.clone()))
            .await?;
        info!(%address, "Removed");
        self.notifier.notify(Message::success(success_message));
        on_complete().await
    }
}
