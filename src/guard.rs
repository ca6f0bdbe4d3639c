//! # Cardinality Guard
//!
//! A work manager may own at most one long running and one short running thread
//! pool. The server will happily accept a second one, so before the add dialog is
//! offered the guard reads both pool collections in one composite and decides
//! what the user may still create:
//!
//! | Pools present | [`SlotState`] | Type field |
//! |---------------|---------------|------------|
//! | none | `Open` | required single select, both variants, no default |
//! | one | `PartiallyFilled` | disabled text, preset to the missing variant |
//! | both | `Closed` | no dialog; error notification |
//!
//! The check is a snapshot. Nothing stops a concurrent session from creating a
//! pool between [`CardinalityGuard::launch_add`] and
//! [`CardinalityGuard::submit`].

use crate::crud::CrudCoordinator;
use crate::error::ConsoleError;
use crate::form::{Form, FormItem, NAME, TYPE};
use crate::jca::templates::WORKMANAGER_LRT_TEMPLATE;
use crate::model::{ThreadPoolVariant, THREAD_POOL};
use crate::notify::{messages, Message, Notifier};
use crate::query::{ChildCollections, CompositeQuery};
use mgmt_framework::{AddressTemplate, MetadataRegistry, ModelClient, Operation, ResourceAddress};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Form id of the add dialog.
pub const ADD_THREAD_POOL_FORM: &str = "jca-thread-pool-add";

/// Attributes offered when adding a pool, in this order.
pub const THREAD_POOL_ATTRIBUTES: [&str; 3] = ["max-threads", "queue-length", "thread-factory"];

/// How many pool slots of a work manager are still free.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    Open,
    PartiallyFilled { missing: ThreadPoolVariant },
    Closed,
}

impl SlotState {
    pub fn evaluate(pools: &ChildCollections<ThreadPoolVariant>) -> Self {
        let present: Vec<ThreadPoolVariant> = ThreadPoolVariant::ALL
            .into_iter()
            .filter(|v| pools.is_present(*v))
            .collect();
        match present.as_slice() {
            [] => SlotState::Open,
            [only] => SlotState::PartiallyFilled {
                missing: only.other(),
            },
            _ => SlotState::Closed,
        }
    }
}

/// The dialog state handed to the UI after a successful [`CardinalityGuard::launch_add`].
#[derive(Debug, Clone, PartialEq)]
pub struct AddThreadPoolDialog {
    pub title: String,
    pub workmanager_template: AddressTemplate,
    pub workmanager: String,
    pub slot: SlotState,
    pub form: Form,
}

impl AddThreadPoolDialog {
    /// The variant fixed by the form, if the user has no choice.
    pub fn fixed_variant(&self) -> Option<ThreadPoolVariant> {
        match self.slot {
            SlotState::PartiallyFilled { missing } => Some(missing),
            SlotState::Open | SlotState::Closed => None,
        }
    }
}

/// What the user entered into the add dialog.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ThreadPoolSubmission {
    /// Choice of the type field; ignored when the field is fixed.
    pub variant: Option<ThreadPoolVariant>,
    pub name: String,
    pub attributes: Map<String, Value>,
}

/// Builds the thread pool add dialog and submits it.
#[derive(Clone)]
pub struct CardinalityGuard {
    crud: CrudCoordinator,
    registry: Arc<dyn MetadataRegistry>,
    notifier: Arc<dyn Notifier>,
}

impl CardinalityGuard {
    pub fn new(
        crud: CrudCoordinator,
        registry: Arc<dyn MetadataRegistry>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            crud,
            registry,
            notifier,
        }
    }

    /// The composite reading both pool collections of `workmanager`.
    pub fn pools_query(
        &self,
        workmanager_template: &AddressTemplate,
        workmanager: &str,
    ) -> Result<CompositeQuery<ThreadPoolVariant>, ConsoleError> {
        let parent = self.crud.resolve(workmanager_template, &[workmanager])?;
        Ok(CompositeQuery::read_children(
            &parent,
            &ThreadPoolVariant::ALL,
            |variant| variant.child_type().to_string(),
        ))
    }

    /// Reads both pool collections of `workmanager`.
    pub async fn read_pools(
        &self,
        workmanager_template: &AddressTemplate,
        workmanager: &str,
    ) -> Result<ChildCollections<ThreadPoolVariant>, ConsoleError> {
        let query = self.pools_query(workmanager_template, workmanager)?;
        let result = self.crud.execute_composite(query.composite().clone()).await?;
        query.interpret(&result)
    }

    /// Checks the free slots of `workmanager` and builds the add dialog.
    ///
    /// Fails with [`ConsoleError::ConstraintViolation`] when both pools exist.
    #[instrument(skip(self, workmanager_template), fields(template = %workmanager_template))]
    pub async fn launch_add(
        &self,
        workmanager_template: &AddressTemplate,
        workmanager: &str,
    ) -> Result<AddThreadPoolDialog, ConsoleError> {
        let pools = self.read_pools(workmanager_template, workmanager).await?;
        let slot = SlotState::evaluate(&pools);
        debug!(?slot, "Evaluated thread pool slots");

        let type_item = match slot {
            SlotState::Closed => {
                let text = messages::all_thread_pools_exist();
                warn!(workmanager, "Both thread pools present");
                self.notifier.notify(Message::error(text.clone()));
                return Err(ConsoleError::ConstraintViolation(text));
            }
            SlotState::Open => FormItem::single_select(
                TYPE,
                "Type",
                ThreadPoolVariant::ALL
                    .iter()
                    .map(|v| v.label().to_string())
                    .collect(),
            )
            .required(true),
            SlotState::PartiallyFilled { missing } => FormItem::text(TYPE, "Type")
                .with_value(Value::String(missing.label().to_string()))
                .enabled(false),
        };

        // Long and short running pools share their attribute descriptions.
        let metadata_template = AddressTemplate::of(WORKMANAGER_LRT_TEMPLATE);
        let metadata = self
            .registry
            .lookup(&metadata_template)
            .ok_or_else(|| ConsoleError::Metadata(metadata_template.to_string()))?;
        let form = Form::from_metadata(ADD_THREAD_POOL_FORM, &metadata, &THREAD_POOL_ATTRIBUTES)
            .unbound_item(type_item, 0)
            .unbound_item(FormItem::text(NAME, "Name").required(true), 1);

        Ok(AddThreadPoolDialog {
            title: format!("Add {THREAD_POOL}"),
            workmanager_template: workmanager_template.clone(),
            workmanager: workmanager.to_string(),
            slot,
            form,
        })
    }

    /// Creates the pool described by `submission` and returns its address.
    ///
    /// The caller refreshes the pool lists afterwards.
    #[instrument(skip(self, dialog, submission), fields(workmanager = %dialog.workmanager, name = %submission.name))]
    pub async fn submit(
        &self,
        dialog: &AddThreadPoolDialog,
        submission: ThreadPoolSubmission,
    ) -> Result<ResourceAddress, ConsoleError> {
        let variant = match dialog.slot {
            SlotState::Closed => {
                return Err(ConsoleError::ConstraintViolation(
                    messages::all_thread_pools_exist(),
                ))
            }
            SlotState::PartiallyFilled { missing } => missing,
            SlotState::Open => submission.variant.ok_or(ConsoleError::MissingVariant)?,
        };

        let workmanager = self
            .crud
            .resolve(&dialog.workmanager_template, &[dialog.workmanager.as_str()])?;
        let address = variant.address(&workmanager, &submission.name);

        let mut payload = submission.attributes;
        payload.insert(NAME.to_string(), Value::String(submission.name.clone()));
        self.crud
            .dispatcher()
            .execute(Operation::add(address.clone(), Value::Object(payload)))
            .await?;

        info!(%address, %variant, "Thread pool added");
        self.notifier.notify(Message::success(messages::add_resource_success(
            THREAD_POOL,
            &submission.name,
        )));
        Ok(address)
    }
}
