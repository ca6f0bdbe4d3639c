//! Console configuration.
//!
//! Loaded from TOML. Every field has a default, so an empty file (or none at
//! all) is a valid configuration:
//!
//! ```toml
//! [dispatcher]
//! buffer_size = 32
//!
//! [logging]
//! filter = "mgmt_console=debug,info"
//!
//! [context]
//! "selected.host" = "primary"
//! ```
//!
//! `MGMT_CONSOLE_LOG` overrides `logging.filter`; `RUST_LOG` in turn wins over
//! both when the subscriber is installed.

use crate::error::ConfigError;
use mgmt_framework::MapStatementContext;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Environment variable overriding the configured log filter.
pub const LOG_ENV: &str = "MGMT_CONSOLE_LOG";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub dispatcher: DispatcherConfig,
    pub logging: LoggingConfig,
    /// Values for `{tuple}` placeholders in address templates.
    pub context: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatcherConfig {
    /// Capacity of the request channel.
    pub buffer_size: usize,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self { buffer_size: 32 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

impl ConsoleConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the console cannot start with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dispatcher.buffer_size == 0 {
            return Err(ConfigError::Invalid {
                field: "dispatcher.buffer_size",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Reads `path` and applies the environment override.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let mut config = Self::from_toml_str(&raw)?;
        config.apply_env();
        Ok(config)
    }

    /// Replaces the log filter with `MGMT_CONSOLE_LOG` if set.
    pub fn apply_env(&mut self) {
        if let Ok(filter) = std::env::var(LOG_ENV) {
            self.apply_log_override(Some(filter));
        }
    }

    fn apply_log_override(&mut self, filter: Option<String>) {
        if let Some(filter) = filter.filter(|f| !f.trim().is_empty()) {
            self.logging.filter = filter;
        }
    }

    pub fn statement_context(&self) -> MapStatementContext {
        MapStatementContext::new(self.context.clone())
    }
}
