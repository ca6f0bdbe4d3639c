//! # Mock Dispatcher & Testing Guide
//!
//! The `MockDispatcher` hands out a real [`Dispatcher`] whose requests are answered
//! from a queue of expectations instead of a model controller. It lets you test
//! coordinator logic deterministically, inject server failures, and inspect exactly
//! which operations were sent.
//!
//! ## When to use Mocks vs the Model Controller
//!
//! | Feature | MockDispatcher | ModelController |
//! |---------|----------------|-----------------|
//! | **State** | None (scripted replies) | Real in-memory tree |
//! | **Error Injection** | Easy (`return_err`) | Requires a conflicting tree |
//! | **Inspection** | Every request is recorded | Read the tree back |
//! | **Use Case** | Coordinator unit tests | End-to-end flows |
//!
//! ## Scripted replies
//!
//! ```rust
//! use mgmt_framework::mock::MockDispatcher;
//! use mgmt_framework::{DispatchError, Operation, ResourceAddress};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockDispatcher::new();
//!     mock.expect_execute().return_ok(json!({"name": "default"}));
//!     mock.expect_execute().return_err(DispatchError::Failed("boom".into()));
//!
//!     let dispatcher = mock.dispatcher();
//!     let address = ResourceAddress::root().child("subsystem", "jca");
//!     let node = dispatcher
//!         .execute(Operation::read_resource(address.clone(), 0))
//!         .await
//!         .unwrap();
//!     assert_eq!(node["name"], "default");
//!
//!     let err = dispatcher.execute(Operation::remove(address)).await.unwrap_err();
//!     assert_eq!(err, DispatchError::Failed("boom".into()));
//!
//!     assert_eq!(mock.executed().len(), 2);
//!     mock.verify();
//! }
//! ```
//!
//! ## Raw channel helpers
//!
//! Use [`create_mock_dispatcher`] to get a dispatcher plus the receiving end, then
//! [`expect_execute`] / [`expect_composite`] to pull requests and answer them by
//! hand. This is the right tool when a test needs to control *when* a reply
//! arrives.

use crate::dispatcher::Dispatcher;
use crate::error::DispatchError;
use crate::message::DispatchRequest;
use crate::operation::{Composite, CompositeResult, Operation};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

enum Expectation {
    Execute {
        response: Result<Value, DispatchError>,
    },
    Composite {
        response: Result<CompositeResult, DispatchError>,
    },
}

/// A request the mock received, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum Recorded {
    Execute(Operation),
    Composite(Composite),
}

/// A mock dispatcher with expectation tracking for fluent testing.
pub struct MockDispatcher {
    dispatcher: Dispatcher,
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
    recorded: Arc<Mutex<Vec<Recorded>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl Default for MockDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDispatcher {
    /// Creates a new mock with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<DispatchRequest>(100);
        let expectations = Arc::new(Mutex::new(VecDeque::new()));
        let recorded = Arc::new(Mutex::new(Vec::new()));
        let expectations_clone = expectations.clone();
        let recorded_clone = recorded.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = expectations_clone.lock().unwrap().pop_front();

                match (request, expectation) {
                    (
                        DispatchRequest::Execute {
                            operation,
                            respond_to,
                        },
                        Some(Expectation::Execute { response }),
                    ) => {
                        recorded_clone
                            .lock()
                            .unwrap()
                            .push(Recorded::Execute(operation));
                        let _ = respond_to.send(response);
                    }
                    (
                        DispatchRequest::ExecuteComposite {
                            composite,
                            respond_to,
                        },
                        Some(Expectation::Composite { response }),
                    ) => {
                        recorded_clone
                            .lock()
                            .unwrap()
                            .push(Recorded::Composite(composite));
                        let _ = respond_to.send(response);
                    }
                    (request, _) => {
                        panic!("Unexpected request or expectation mismatch: {request:?}");
                    }
                }
            }
        });

        Self {
            dispatcher: Dispatcher::new(sender),
            expectations,
            recorded,
            _handle: handle,
        }
    }

    /// Returns a dispatcher wired to this mock.
    pub fn dispatcher(&self) -> Dispatcher {
        self.dispatcher.clone()
    }

    /// Expects a single-operation request.
    pub fn expect_execute(&mut self) -> ExecuteExpectationBuilder {
        ExecuteExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a composite request.
    pub fn expect_composite(&mut self) -> CompositeExpectationBuilder {
        CompositeExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Every request received so far.
    pub fn recorded(&self) -> Vec<Recorded> {
        self.recorded.lock().unwrap().clone()
    }

    /// Single operations received so far.
    pub fn executed(&self) -> Vec<Operation> {
        self.recorded()
            .into_iter()
            .filter_map(|r| match r {
                Recorded::Execute(op) => Some(op),
                Recorded::Composite(_) => None,
            })
            .collect()
    }

    /// Composites received so far.
    pub fn composites(&self) -> Vec<Composite> {
        self.recorded()
            .into_iter()
            .filter_map(|r| match r {
                Recorded::Composite(c) => Some(c),
                Recorded::Execute(_) => None,
            })
            .collect()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

/// Builder for single-operation expectations.
pub struct ExecuteExpectationBuilder {
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
}

impl ExecuteExpectationBuilder {
    pub fn return_ok(self, value: Value) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Execute { response: Ok(value) });
    }

    pub fn return_err(self, error: DispatchError) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Execute {
                response: Err(error),
            });
    }
}

/// Builder for composite expectations.
pub struct CompositeExpectationBuilder {
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
}

impl CompositeExpectationBuilder {
    pub fn return_ok(self, result: CompositeResult) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Composite { response: Ok(result) });
    }

    pub fn return_err(self, error: DispatchError) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Composite {
                response: Err(error),
            });
    }
}

// =============================================================================
// RAW CHANNEL HELPERS
// =============================================================================

/// Creates a dispatcher and the receiver its requests arrive on.
pub fn create_mock_dispatcher(buffer_size: usize) -> (Dispatcher, mpsc::Receiver<DispatchRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (Dispatcher::new(sender), receiver)
}

/// Helper to verify that the next message is a single operation.
pub async fn expect_execute(
    receiver: &mut mpsc::Receiver<DispatchRequest>,
) -> Option<(Operation, oneshot::Sender<Result<Value, DispatchError>>)> {
    match receiver.recv().await {
        Some(DispatchRequest::Execute {
            operation,
            respond_to,
        }) => Some((operation, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a composite.
pub async fn expect_composite(
    receiver: &mut mpsc::Receiver<DispatchRequest>,
) -> Option<(
    Composite,
    oneshot::Sender<Result<CompositeResult, DispatchError>>,
)> {
    match receiver.recv().await {
        Some(DispatchRequest::ExecuteComposite {
            composite,
            respond_to,
        }) => Some((composite, respond_to)),
        _ => None,
    }
}
