//! User-facing notifications.
//!
//! The console reports outcomes ("Thread Pool srt-b successfully added", "No
//! changes to save") through a [`Notifier`]. The UI layer plugs in its toast
//! bar; [`TracingNotifier`] just logs.

use std::sync::Mutex;
use tracing::{error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub level: Level,
    pub text: String,
}

impl Message {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            text: text.into(),
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: Level::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            text: text.into(),
        }
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, message: Message);
}

/// Logs every message.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: Message) {
        match message.level {
            Level::Error => error!(text = %message.text, "Notification"),
            Level::Success | Level::Info => info!(level = ?message.level, text = %message.text, "Notification"),
        }
    }
}

/// Keeps every message; handy for tests and for UIs that poll.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<Message>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<Message> {
        self.messages.lock().map(|m| m.clone()).unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: Message) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message);
        }
    }
}

/// Message texts, in one place.
pub mod messages {
    pub fn add_resource_success(type_label: &str, name: &str) -> String {
        format!("{type_label} {name} successfully added.")
    }

    pub fn add_singleton_success(type_label: &str) -> String {
        format!("{type_label} successfully added.")
    }

    pub fn modify_resource_success(type_label: &str, name: &str) -> String {
        format!("{type_label} {name} successfully modified.")
    }

    pub fn reset_resource_success(type_label: &str, name: &str) -> String {
        format!("{type_label} {name} successfully reset.")
    }

    pub fn remove_resource_success(type_label: &str, name: &str) -> String {
        format!("{type_label} {name} successfully removed.")
    }

    pub fn remove_singleton_success(type_label: &str) -> String {
        format!("{type_label} successfully removed.")
    }

    pub fn no_changes() -> String {
        "No changes to save.".to_string()
    }

    pub fn no_reset() -> String {
        "No attributes can be reset.".to_string()
    }

    pub fn all_thread_pools_exist() -> String {
        "This work manager already has a long running and a short running thread pool.".to_string()
    }
}
