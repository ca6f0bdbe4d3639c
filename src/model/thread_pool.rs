//! Thread pools attached to a JCA work manager.
//!
//! A work manager (normal or distributed) may own at most one long running and at
//! most one short running thread pool. The server does not reject a second pool of
//! the same kind, so the console checks before offering creation; see
//! [`CardinalityGuard`](crate::guard::CardinalityGuard).
use mgmt_framework::ResourceAddress;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::Display;

/// Label used in dialogs and messages.
pub const THREAD_POOL: &str = "Thread Pool";

/// The two mutually exclusive thread pool kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ThreadPoolVariant {
    LongRunning,
    ShortRunning,
}

impl ThreadPoolVariant {
    pub const ALL: [ThreadPoolVariant; 2] =
        [ThreadPoolVariant::LongRunning, ThreadPoolVariant::ShortRunning];

    /// Child type of the pool below its work manager.
    pub fn child_type(self) -> &'static str {
        match self {
            ThreadPoolVariant::LongRunning => "long-running-threads",
            ThreadPoolVariant::ShortRunning => "short-running-threads",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ThreadPoolVariant::LongRunning => "Long Running",
            ThreadPoolVariant::ShortRunning => "Short Running",
        }
    }

    /// The variant that is not `self`.
    pub fn other(self) -> Self {
        match self {
            ThreadPoolVariant::LongRunning => ThreadPoolVariant::ShortRunning,
            ThreadPoolVariant::ShortRunning => ThreadPoolVariant::LongRunning,
        }
    }

    /// Address of the pool `name` below the resolved `workmanager`.
    ///
    /// `name` becomes the segment value as is; it is never parsed as a template.
    pub fn address(self, workmanager: &ResourceAddress, name: &str) -> ResourceAddress {
        workmanager.child(self.child_type(), name)
    }
}

impl Display for ThreadPoolVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A thread pool as shown in the work manager view.
#[derive(Debug, Clone, PartialEq)]
pub struct ThreadPool {
    pub name: String,
    pub variant: ThreadPoolVariant,
    pub attributes: Value,
}

impl ThreadPool {
    pub fn new(name: impl Into<String>, variant: ThreadPoolVariant, attributes: Value) -> Self {
        Self {
            name: name.into(),
            variant,
            attributes,
        }
    }
}
