//! # Management Console Core
//!
//! > **The orchestration layer of a management console for a hierarchical server model.**
//!
//! The server exposes a tree of resources (`subsystem=jca/workmanager=default/...`)
//! with attributes and typed children. This crate turns what a user does in the
//! console into operations against that tree, and keeps the views in step with
//! what the server holds.
//!
//! ## 🏗️ Design Philosophy
//!
//! - **The server is the source of truth.** Nothing here caches resource state.
//!   After every successful mutation the affected view is re-read and replaced.
//! - **Mutate, then continue.** Every CRUD call takes an `on_complete`
//!   continuation that runs only after the server accepted the change.
//! - **Positional replies, typed keys.** Composite reads are interpreted through a
//!   key → step mapping instead of literal step indices.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine
//! - [`crud`]: [`CrudCoordinator`], generic add / save / reset / remove.
//! - [`query`]: [`CompositeQuery`], batched reads of sibling collections.
//! - [`guard`]: [`CardinalityGuard`], "at most one of each thread pool variant".
//! - [`selection`]: [`AssignContentDialog`], assigning content to server groups.
//! - [`refresh`]: the [`JcaView`] contract the presenter pushes full state to.
//!
//! ### 2. The Subsystem ([`jca`])
//! [`JcaPresenter`] wires the engine for work managers, thread pools and the tracer.
//!
//! ### 3. The Orchestrator ([`lifecycle`])
//! [`ConsoleSystem`] starts an in-memory model controller and wires everything
//! around one dispatcher. [`config`] loads [`ConsoleConfig`] from TOML.
//!
//! ## 🚀 Quick Start
//!
//! ```rust,no_run
//! use mgmt_console::{
//!     jca_registry, ConsoleConfig, ConsoleParts, ConsoleSystem, InMemoryJcaView,
//!     ThreadPoolSubmission, TracingNotifier,
//! };
//! use mgmt_framework::{AddressTemplate, ResourceAddress};
//! use serde_json::Map;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let jca = ResourceAddress::root().child("subsystem", "jca");
//!     let wm1 = jca.child("workmanager", "wm1");
//!     let system = ConsoleSystem::start(
//!         &ConsoleConfig::default(),
//!         vec![(jca, Map::new()), (wm1, Map::new())],
//!         ConsoleParts {
//!             registry: Arc::new(jca_registry()),
//!             notifier: Arc::new(TracingNotifier),
//!             view: Arc::new(InMemoryJcaView::default()),
//!         },
//!     )?;
//!
//!     let wm = AddressTemplate::of("subsystem=jca/workmanager=*");
//!     let dialog = system.presenter.launch_add_thread_pool(&wm, "wm1").await?;
//!     let submission = ThreadPoolSubmission {
//!         variant: dialog.fixed_variant(),
//!         name: "lrt-a".into(),
//!         ..Default::default()
//!     };
//!     system.presenter.add_thread_pool(&dialog, submission).await.ok();
//!
//!     system.shutdown().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Testing
//!
//! Coordinator logic is tested against `mgmt_framework::mock::MockDispatcher`;
//! the end-to-end flows under `tests/` run against a real `ModelController`.

pub mod config;
pub mod crud;
pub mod error;
pub mod form;
pub mod guard;
pub mod jca;
pub mod lifecycle;
pub mod model;
pub mod notify;
pub mod query;
pub mod refresh;
pub mod selection;

pub use config::ConsoleConfig;
pub use crud::{CrudCoordinator, PendingMutation};
pub use error::{ConfigError, ConsoleError};
pub use form::{Form, FormItem, FormItemKind};
pub use guard::{AddThreadPoolDialog, CardinalityGuard, SlotState, ThreadPoolSubmission};
pub use jca::{jca_registry, JcaPresenter};
pub use lifecycle::{init_tracing, ConsoleParts, ConsoleSystem};
pub use model::{Content, ThreadPool, ThreadPoolVariant, THREAD_POOL};
pub use notify::{Level, Message, Notifier, RecordingNotifier, TracingNotifier};
pub use query::{ChildCollections, CompositeQuery};
pub use refresh::{InMemoryJcaView, JcaView, ThreadPoolsSnapshot};
pub use selection::{AssignContentDialog, AssignMode, SelectableRow};
