//! Error types for namespace and stack operations.
//!
//! Covers key validation, level lookups, and reading configuration files.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading or writing namespaces.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A key outside the namespace's allowed set was written.
    #[error("key does not exist in the key set: {0}")]
    IllegalKey(String),

    /// A level name is not registered in the stack.
    #[error("level does not exist: {0}")]
    LevelNotFound(String),

    /// A level index lies outside the stack.
    #[error("illegal level index: {0}")]
    IllegalIndex(usize),

    /// A level with this name was already created.
    #[error("level already exists: {0}")]
    LevelExists(String),

    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing failure.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// The file extension is neither JSON nor YAML.
    #[error("unsupported config format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// The file parsed, but its top level is not a mapping.
    #[error("config file is not a key/value mapping: {}", .0.display())]
    NotAMapping(PathBuf),
}

/// Convenience alias for results with [`ConfigError`].
pub type Result<T> = std::result::Result<T, ConfigError>;
