use crate::config::ConsoleConfig;
use crate::crud::CrudCoordinator;
use crate::error::{ConfigError, ConsoleError};
use crate::guard::CardinalityGuard;
use crate::jca::JcaPresenter;
use crate::notify::Notifier;
use crate::refresh::JcaView;
use mgmt_framework::{Dispatcher, MetadataRegistry, ModelController, ResourceAddress};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{error, info};

/// Collaborators a console is wired with.
pub struct ConsoleParts {
    pub registry: Arc<dyn MetadataRegistry>,
    pub notifier: Arc<dyn Notifier>,
    pub view: Arc<dyn JcaView>,
}

/// The running console: an in-memory model controller and the presenter talking
/// to it.
///
/// # Example
///
/// ```ignore
/// let system = ConsoleSystem::start(&config, seed, parts)?;
///
/// let dialog = system.presenter.launch_add_thread_pool(&wm, "wm1").await?;
/// system.presenter.add_thread_pool(&dialog, submission).await?;
///
/// system.shutdown().await?;
/// ```
pub struct ConsoleSystem {
    pub presenter: JcaPresenter,
    pub crud: CrudCoordinator,
    pub guard: CardinalityGuard,
    dispatcher: Dispatcher,
    handle: tokio::task::JoinHandle<()>,
}

impl ConsoleSystem {
    /// Spawns a model controller holding `seed` (parents first) and wires the
    /// console around it. Must be called inside a Tokio runtime.
    ///
    /// Fails if `config` does not pass [`ConsoleConfig::validate`].
    pub fn start(
        config: &ConsoleConfig,
        seed: Vec<(ResourceAddress, Map<String, Value>)>,
        parts: ConsoleParts,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let (controller, dispatcher) =
            ModelController::with_tree(config.dispatcher.buffer_size, seed);
        let handle = tokio::spawn(controller.run());

        let crud = CrudCoordinator::new(
            dispatcher.clone(),
            Arc::new(config.statement_context()),
            parts.notifier.clone(),
        );
        let guard = CardinalityGuard::new(crud.clone(), parts.registry.clone(), parts.notifier);
        let presenter = JcaPresenter::new(crud.clone(), guard.clone(), parts.registry, parts.view);
        info!(buffer_size = config.dispatcher.buffer_size, "Console started");

        Ok(Self {
            presenter,
            crud,
            guard,
            dispatcher,
            handle,
        })
    }

    /// A dispatcher on the same model, for callers working below the presenter.
    ///
    /// Drop every clone before [`shutdown`](Self::shutdown), or it will wait for them.
    pub fn dispatcher(&self) -> Dispatcher {
        self.dispatcher.clone()
    }

    /// Closes the request channel and waits for the model controller to stop.
    pub async fn shutdown(self) -> Result<(), ConsoleError> {
        info!("Shutting down console...");

        // The controller exits once the last dispatcher is gone.
        drop(self.presenter);
        drop(self.guard);
        drop(self.crud);
        drop(self.dispatcher);

        if let Err(e) = self.handle.await {
            error!(error = %e, "Model controller task failed");
            return Err(ConsoleError::Communication(format!(
                "Model controller task failed: {e}"
            )));
        }

        info!("Console shutdown complete.");
        Ok(())
    }
}
