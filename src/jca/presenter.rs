//! # JCA Presenter
//!
//! Wires the coordinator, the cardinality guard and the view for the JCA
//! subsystem. Every mutation goes through [`CrudCoordinator`] (or the guard for
//! new thread pools) and, once it succeeded, re-reads what the affected part of
//! the view shows:
//!
//! - simple resources (work managers, bootstrap contexts, tracer): a
//!   `read-resource` of the subsystem with depth 1, pushed via [`JcaView::update`];
//! - thread pools: the two-step composite of the work manager's pool collections,
//!   pushed via [`JcaView::update_thread_pools`].

use super::templates::{thread_pool_template, JCA_TEMPLATE, TRACER_TEMPLATE};
use crate::crud::CrudCoordinator;
use crate::error::ConsoleError;
use crate::form::Form;
use crate::guard::{AddThreadPoolDialog, CardinalityGuard, ThreadPoolSubmission};
use crate::model::{ThreadPool, ThreadPoolVariant, THREAD_POOL};
use crate::notify::messages;
use crate::refresh::JcaView;
use mgmt_framework::{AddressTemplate, Metadata, MetadataRegistry, ResourceAddress};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct JcaPresenter {
    crud: CrudCoordinator,
    guard: CardinalityGuard,
    registry: Arc<dyn MetadataRegistry>,
    view: Arc<dyn JcaView>,
}

impl JcaPresenter {
    pub fn new(
        crud: CrudCoordinator,
        guard: CardinalityGuard,
        registry: Arc<dyn MetadataRegistry>,
        view: Arc<dyn JcaView>,
    ) -> Self {
        Self {
            crud,
            guard,
            registry,
            view,
        }
    }

    pub fn resource_address(&self) -> Result<ResourceAddress, ConsoleError> {
        self.crud.resolve(&AddressTemplate::of(JCA_TEMPLATE), &[])
    }

    #[instrument(skip(self))]
    pub async fn reload(&self) -> Result<(), ConsoleError> {
        let payload = self.crud.read(&AddressTemplate::of(JCA_TEMPLATE), 1).await?;
        self.view.update(payload);
        Ok(())
    }

    // ------------------------------------------------------ generic crud

    pub async fn add(
        &self,
        type_label: &str,
        name: &str,
        template: &AddressTemplate,
        payload: Value,
    ) -> Result<(), ConsoleError> {
        self.crud
            .add(type_label, name, template, payload, |_| self.reload())
            .await
    }

    pub async fn save_resource(
        &self,
        template: &AddressTemplate,
        name: &str,
        changed: &Map<String, Value>,
        success_message: impl Into<String>,
    ) -> Result<(), ConsoleError> {
        self.crud
            .save(template, name, changed, success_message, || self.reload())
            .await
    }

    pub async fn save_singleton(
        &self,
        template: &AddressTemplate,
        changed: &Map<String, Value>,
        success_message: impl Into<String>,
    ) -> Result<(), ConsoleError> {
        self.crud
            .save_singleton(template, changed, success_message, || self.reload())
            .await
    }

    pub async fn reset_resource(
        &self,
        template: &AddressTemplate,
        type_label: &str,
        name: &str,
        form: &Form,
        metadata: &Metadata,
    ) -> Result<(), ConsoleError> {
        self.crud
            .reset(type_label, name, template, form, metadata, || self.reload())
            .await
    }

    pub async fn reset_singleton(
        &self,
        type_label: &str,
        template: &AddressTemplate,
        form: &Form,
        metadata: &Metadata,
    ) -> Result<(), ConsoleError> {
        self.crud
            .reset_singleton(type_label, template, form, metadata, || self.reload())
            .await
    }

    pub async fn remove_resource(
        &self,
        type_label: &str,
        name: &str,
        template: &AddressTemplate,
    ) -> Result<(), ConsoleError> {
        self.crud
            .remove(type_label, name, template, || self.reload())
            .await
    }

    pub async fn remove_singleton(
        &self,
        type_label: &str,
        template: &AddressTemplate,
    ) -> Result<(), ConsoleError> {
        self.crud
            .remove_singleton(type_label, template, || self.reload())
            .await
    }

    // ------------------------------------------------------ tracer

    pub async fn add_tracer(&self) -> Result<(), ConsoleError> {
        let template = AddressTemplate::of(TRACER_TEMPLATE);
        let label = capitalize(template.last_name());
        self.crud
            .add_singleton(&label, &template, Value::Object(Map::new()), |_| {
                self.reload()
            })
            .await
    }

    // ------------------------------------------------------ thread pools

    /// Brings up the add dialog for a (distributed) work manager, or fails when
    /// both pools already exist.
    pub async fn launch_add_thread_pool(
        &self,
        workmanager_template: &AddressTemplate,
        workmanager: &str,
    ) -> Result<AddThreadPoolDialog, ConsoleError> {
        self.guard.launch_add(workmanager_template, workmanager).await
    }

    /// Submits the add dialog and refreshes the pool lists.
    pub async fn add_thread_pool(
        &self,
        dialog: &AddThreadPoolDialog,
        submission: ThreadPoolSubmission,
    ) -> Result<ResourceAddress, ConsoleError> {
        let address = self.guard.submit(dialog, submission).await?;
        self.load_thread_pools(&dialog.workmanager_template, &dialog.workmanager)
            .await?;
        Ok(address)
    }

    #[instrument(skip(self, workmanager_template), fields(template = %workmanager_template))]
    pub async fn load_thread_pools(
        &self,
        workmanager_template: &AddressTemplate,
        workmanager: &str,
    ) -> Result<(), ConsoleError> {
        let mut pools = self.guard.read_pools(workmanager_template, workmanager).await?;
        let lrt = pools.take(ThreadPoolVariant::LongRunning);
        let srt = pools.take(ThreadPoolVariant::ShortRunning);
        debug!(lrt = lrt.len(), srt = srt.len(), "Loaded thread pools");
        self.view
            .update_thread_pools(workmanager_template, workmanager, lrt, srt);
        Ok(())
    }

    pub async fn save_thread_pool(
        &self,
        workmanager_template: &AddressTemplate,
        workmanager: &str,
        thread_pool: &ThreadPool,
        changed: &Map<String, Value>,
    ) -> Result<(), ConsoleError> {
        let address = self.thread_pool_address(workmanager_template, workmanager, thread_pool)?;
        self.crud
            .save_at(
                address,
                changed,
                messages::modify_resource_success(THREAD_POOL, &thread_pool.name),
                || self.load_thread_pools(workmanager_template, workmanager),
            )
            .await
    }

    pub async fn reset_thread_pool(
        &self,
        workmanager_template: &AddressTemplate,
        workmanager: &str,
        thread_pool: &ThreadPool,
        form: &Form,
    ) -> Result<(), ConsoleError> {
        let metadata_template = thread_pool_template(thread_pool.variant);
        let metadata = self
            .registry
            .lookup(&metadata_template)
            .ok_or_else(|| ConsoleError::Metadata(metadata_template.to_string()))?;
        let address = self.thread_pool_address(workmanager_template, workmanager, thread_pool)?;
        self.crud
            .reset_at(
                address,
                form,
                &metadata,
                messages::reset_resource_success(THREAD_POOL, &thread_pool.name),
                || self.load_thread_pools(workmanager_template, workmanager),
            )
            .await
    }

    pub async fn remove_thread_pool(
        &self,
        workmanager_template: &AddressTemplate,
        workmanager: &str,
        thread_pool: &ThreadPool,
    ) -> Result<(), ConsoleError> {
        let address = self.thread_pool_address(workmanager_template, workmanager, thread_pool)?;
        self.crud
            .remove_at(
                address,
                messages::remove_resource_success(THREAD_POOL, &thread_pool.name),
                || self.load_thread_pools(workmanager_template, workmanager),
            )
            .await
    }

    fn thread_pool_address(
        &self,
        workmanager_template: &AddressTemplate,
        workmanager: &str,
        thread_pool: &ThreadPool,
    ) -> Result<ResourceAddress, ConsoleError> {
        let workmanager = self.crud.resolve(workmanager_template, &[workmanager])?;
        Ok(thread_pool.variant.address(&workmanager, &thread_pool.name))
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
