//! # Management Framework
//!
//! This crate provides the building blocks for talking to a hierarchical management
//! model: a tree of resources, each identified by a `type=name` address, carrying
//! attributes and typed children. Everything the console does (reading a
//! subsystem, adding a thread pool, writing three changed attributes) is expressed
//! as an [`Operation`] or a [`Composite`] of operations and sent through a
//! [`Dispatcher`].
//!
//! ## Architecture Overview
//!
//! The framework separates concerns into three layers:
//!
//! 1. **Addressing** ([`AddressTemplate`], [`ResourceAddress`], [`StatementContext`]) -
//!    symbolic paths resolved per operation.
//! 2. **Transport** ([`Dispatcher`], [`DispatchRequest`]) - an mpsc request channel
//!    with a oneshot reply per request.
//! 3. **Serving side** ([`ModelController`]) - an in-memory tree processing requests
//!    sequentially in its own task; [`mock::MockDispatcher`] replaces it in tests.
//!
//! ## Quick Start
//!
//! ```rust
//! use mgmt_framework::{AddressTemplate, MapStatementContext, ModelController, Operation};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() {
//!     let (controller, dispatcher) = ModelController::new(10);
//!     tokio::spawn(controller.run());
//!
//!     let context = MapStatementContext::default();
//!     let jca = AddressTemplate::of("subsystem=jca").resolve(&context, &[]).unwrap();
//!     let wm = AddressTemplate::of("subsystem=jca/workmanager=*")
//!         .resolve(&context, &["default"])
//!         .unwrap();
//!
//!     dispatcher.execute(Operation::add(jca.clone(), json!({}))).await.unwrap();
//!     dispatcher.execute(Operation::add(wm, json!({"name": "default"}))).await.unwrap();
//!
//!     let node = dispatcher.execute(Operation::read_resource(jca, 1)).await.unwrap();
//!     assert_eq!(node["workmanager"]["default"]["name"], "default");
//! }
//! ```
//!
//! ## Concurrency Model
//!
//! - The model controller runs in its own Tokio task and owns the tree outright.
//! - Requests are processed **sequentially**; a composite is atomic.
//! - Dispatchers are cheap clones of one sender; each call waits only for its own reply.
//!
//! ## Testing
//!
//! See the [`mock`] module for scripted replies and raw channel helpers.

pub mod address;
pub mod client_trait;
pub mod controller;
pub mod dispatcher;
pub mod error;
pub mod message;
pub mod metadata;
pub mod mock;
pub mod node;
pub mod operation;
pub mod tracing;

// Re-export core types for convenience
pub use address::{AddressTemplate, MapStatementContext, ResourceAddress, Segment, StatementContext};
pub use client_trait::ModelClient;
pub use controller::ModelController;
pub use dispatcher::Dispatcher;
pub use error::{AddressError, DispatchError};
pub use message::{DispatchRequest, Response};
pub use metadata::{AttributeDescription, Metadata, MetadataRegistry, ResetTarget, StaticMetadataRegistry};
pub use node::{as_property_list, Property};
pub use operation::{Composite, CompositeResult, Operation, OperationKind};
