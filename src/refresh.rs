//! View refresh.
//!
//! After every successful mutation the presenter re-reads the authoritative state
//! and pushes it to the view in full. Views never patch themselves from the
//! request they sent; whatever the last read returned is what they show.

use mgmt_framework::{AddressTemplate, Property};
use serde_json::Value;
use std::sync::Mutex;
use tracing::debug;

/// What the JCA presenter pushes to its view.
pub trait JcaView: Send + Sync {
    /// Replaces everything shown for the JCA subsystem.
    fn update(&self, payload: Value);

    /// Replaces the pool lists of one work manager.
    fn update_thread_pools(
        &self,
        workmanager_template: &AddressTemplate,
        workmanager: &str,
        lrt: Vec<Property>,
        srt: Vec<Property>,
    );
}

/// Pool lists as last pushed for a work manager.
#[derive(Debug, Clone, PartialEq)]
pub struct ThreadPoolsSnapshot {
    pub workmanager_template: AddressTemplate,
    pub workmanager: String,
    pub lrt: Vec<Property>,
    pub srt: Vec<Property>,
}

#[derive(Debug, Default)]
struct ViewState {
    payload: Option<Value>,
    thread_pools: Option<ThreadPoolsSnapshot>,
    updates: usize,
}

/// A headless view that keeps whatever it was last given.
#[derive(Debug, Default)]
pub struct InMemoryJcaView {
    state: Mutex<ViewState>,
}

impl InMemoryJcaView {
    pub fn payload(&self) -> Option<Value> {
        self.state.lock().ok().and_then(|s| s.payload.clone())
    }

    pub fn thread_pools(&self) -> Option<ThreadPoolsSnapshot> {
        self.state.lock().ok().and_then(|s| s.thread_pools.clone())
    }

    /// Number of pushes received, of either kind.
    pub fn updates(&self) -> usize {
        self.state.lock().map(|s| s.updates).unwrap_or(0)
    }
}

impl JcaView for InMemoryJcaView {
    fn update(&self, payload: Value) {
        debug!("JCA view updated");
        if let Ok(mut state) = self.state.lock() {
            state.payload = Some(payload);
            state.updates += 1;
        }
    }

    fn update_thread_pools(
        &self,
        workmanager_template: &AddressTemplate,
        workmanager: &str,
        lrt: Vec<Property>,
        srt: Vec<Property>,
    ) {
        debug!(workmanager, lrt = lrt.len(), srt = srt.len(), "Thread pools updated");
        if let Ok(mut state) = self.state.lock() {
            state.thread_pools = Some(ThreadPoolsSnapshot {
                workmanager_template: workmanager_template.clone(),
                workmanager: workmanager.to_string(),
                lrt,
                srt,
            });
            state.updates += 1;
        }
    }
}
