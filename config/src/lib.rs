//! Layered configuration namespaces for `hole`.
//!
//! - [`Namespace`]: a key/value map restricted to a fixed key set.
//! - [`NamespaceStack`]: named levels stacked on a `"DEFAULT"` level that
//!   resolve into one effective namespace.
//! - [`read_mapping`]: reads a JSON or YAML file into entries ready to be
//!   loaded into a level.
//!
//! Values are [`serde_json::Value`]s, so anything a config file can express
//! can be stored.
//!
//! # Quick start
//!
//! ```
//! use hole_config::{Namespace, NamespaceStack};
//! use serde_json::json;
//!
//! let mut seed = Namespace::new(["username", "age"]);
//! seed.set("username", "James Chan").unwrap();
//! seed.set("age", 25).unwrap();
//!
//! let mut stack = NamespaceStack::new(seed);
//! stack.create_level("USER").unwrap();
//! stack
//!     .load_into_level([("username", json!("Andrew Mo"))], "USER")
//!     .unwrap();
//!
//! assert_eq!(stack.effective().get("username"), Some(&json!("Andrew Mo")));
//! assert_eq!(
//!     stack.level("DEFAULT").unwrap().get("username"),
//!     Some(&json!("James Chan"))
//! );
//! ```

mod error;
mod file;
mod namespace;
mod stack;

pub use error::{ConfigError, Result};
pub use file::{ConfigFormat, read_mapping};
pub use namespace::Namespace;
pub use serde_json::Value;
pub use stack::{DEFAULT_LEVEL, NamespaceStack};
