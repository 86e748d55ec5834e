//! Reading key/value mappings from configuration files.
//!
//! Files are chosen by extension: `.json` is parsed with `serde_json`,
//! `.yaml`/`.yml` with `serde_yaml`. The top level must be a mapping; its
//! entries are what gets loaded into a [`Namespace`](crate::Namespace).
//!
//! # Example YAML
//!
//! ```yaml
//! plugin.enabled:
//!   - keyvalue
//! time.format: rfc3339
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{ConfigError, Result};

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
}

impl ConfigFormat {
    /// Detects the format from a file extension.
    ///
    /// # Examples
    ///
    /// ```
    /// use hole_config::ConfigFormat;
    ///
    /// assert_eq!(ConfigFormat::from_path("a/b.json"), Some(ConfigFormat::Json));
    /// assert_eq!(ConfigFormat::from_path("a/b.yml"), Some(ConfigFormat::Yaml));
    /// assert_eq!(ConfigFormat::from_path("a/b.toml"), None);
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?;
        match ext.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

/// Reads a configuration file into a key/value mapping.
///
/// # Errors
///
/// - [`ConfigError::UnsupportedFormat`] for unknown extensions.
/// - [`ConfigError::IoError`] if the file cannot be opened.
/// - [`ConfigError::JsonError`] / [`ConfigError::YamlError`] on parse
///   failures.
/// - [`ConfigError::NotAMapping`] if the top level is not a mapping.
pub fn read_mapping(path: impl AsRef<Path>) -> Result<Map<String, Value>> {
    let path = path.as_ref();
    let format = ConfigFormat::from_path(path)
        .ok_or_else(|| ConfigError::UnsupportedFormat(path.to_path_buf()))?;

    let reader = BufReader::new(File::open(path)?);
    let value: Value = match format {
        ConfigFormat::Json => serde_json::from_reader(reader)?,
        ConfigFormat::Yaml => serde_yaml::from_reader(reader)?,
    };

    match value {
        Value::Object(map) => {
            debug!(path = %path.display(), entries = map.len(), "Read config file");
            Ok(map)
        }
        // `~` or a bare `null` document
        Value::Null => Ok(Map::new()),
        _ => Err(ConfigError::NotAMapping(path.to_path_buf())),
    }
}
