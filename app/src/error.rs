//! Error types for the application layer.
//!
//! Wraps parse and configuration failures from the lower crates and adds the
//! failure modes of handler dispatch, plugins, entries and the lifecycle.

use hole_config::ConfigError;
use hole_core::{ParseError, SpecError};
use thiserror::Error;

use crate::lifecycle::Lifecycle;

/// Errors that can occur while bootstrapping or running a command.
#[derive(Debug, Error)]
pub enum AppError {
    /// The arguments did not fit the handler's command template.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A namespace or config file operation failed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A handler was registered with an ambiguous command template.
    #[error("invalid command template for handler '{handler}': {source}")]
    InvalidSpec {
        handler: String,
        #[source]
        source: SpecError,
    },

    /// No handler is registered under this name.
    #[error("handler not found: {0}")]
    HandlerNotFound(String),

    /// A handler is already registered under this name.
    #[error("handler already exists: {0}")]
    HandlerAlreadyExists(String),

    /// No plugin is registered under this name.
    #[error("plugin not found: {0}")]
    PluginNotFound(String),

    /// No entry has this id.
    #[error("entry not found: {0}")]
    EntryNotFound(u32),

    /// The entry has no property with this key.
    #[error("key does not exist: {0}")]
    KeyNotFound(String),

    /// A positional argument or option value could not be interpreted.
    #[error("invalid argument '{value}': {reason}")]
    InvalidArgument { value: String, reason: String },

    /// An operation ran in the wrong lifecycle state.
    #[error("application is {actual}, expected {expected}")]
    Lifecycle {
        expected: Lifecycle,
        actual: Lifecycle,
    },

    /// Output serialization failure.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Convenience alias for results with [`AppError`].
pub type Result<T> = std::result::Result<T, AppError>;
