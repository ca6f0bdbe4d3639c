//! Error types for the console core.

use mgmt_framework::{AddressError, DispatchError};
use thiserror::Error;

/// Errors that can occur during a single console action.
///
/// None of these are fatal: each is scoped to the action that raised it and
/// leaves earlier state untouched.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConsoleError {
    /// A composite result does not have one step per request step.
    #[error("Composite result has {actual} steps, expected {expected}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// A creation was refused locally because it would break a cardinality rule.
    #[error("{0}")]
    ConstraintViolation(String),

    /// The server rejected a create, write or delete. Kept verbatim.
    #[error("{0}")]
    RemoteOperationFailure(String),

    /// The dialog was confirmed without any row selected.
    #[error("No server group selected")]
    EmptySelection,

    /// A dialog was confirmed after it had been closed.
    #[error("Dialog is not open")]
    DialogClosed,

    /// A thread pool submission did not say which variant to create.
    #[error("Thread pool type is required")]
    MissingVariant,

    /// An address template could not be resolved.
    #[error(transparent)]
    Address(#[from] AddressError),

    /// No metadata is registered for a template.
    #[error("No metadata for {0}")]
    Metadata(String),

    /// The dispatcher could not reach the management model.
    #[error("Communication error: {0}")]
    Communication(String),
}

impl From<DispatchError> for ConsoleError {
    fn from(e: DispatchError) -> Self {
        match e {
            DispatchError::Failed(description) => ConsoleError::RemoteOperationFailure(description),
            DispatchError::Address(e) => ConsoleError::Address(e),
            DispatchError::Closed | DispatchError::Dropped => {
                ConsoleError::Communication(e.to_string())
            }
        }
    }
}

/// Errors loading the console configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {field} {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_failures_are_kept_verbatim() {
        let err: ConsoleError = DispatchError::Failed("Duplicate resource".into()).into();
        assert_eq!(err, ConsoleError::RemoteOperationFailure("Duplicate resource".into()));
        assert_eq!(err.to_string(), "Duplicate resource");
    }

    #[test]
    fn channel_failures_become_communication_errors() {
        let err: ConsoleError = DispatchError::Closed.into();
        assert!(matches!(err, ConsoleError::Communication(_)));
    }
}
