//! The `hole` application: handlers, plugins and configuration on top of
//! [`hole_core`] parsing and [`hole_config`] namespaces.
//!
//! - [`App`]: lifecycle, handler registry and shared [`AppContext`].
//! - [`HandlerRegistry`]: command name → [`Handler`]; dispatches a
//!   [`TokenStream`](hole_core::TokenStream).
//! - [`PluginRegistry`] / [`PluginManager`]: compiled-in plugins and
//!   their enabled state.
//! - [`ConfigManager`]: `DEFAULT`, `USER` and `PROJECT` configuration
//!   levels.
//! - [`EntryStore`]: in-memory entries created by commands.

pub mod app;
pub mod bundle;
pub mod config;
pub mod entry;
pub mod error;
pub mod handler;
pub mod lifecycle;
pub mod logging;
pub mod plugin;

pub use app::{App, AppContext, ConfigSources};
pub use bundle::{Bundle, Env, StatusCode};
pub use config::ConfigManager;
pub use entry::{Entry, EntryStore};
pub use error::{AppError, Result};
pub use handler::{Handler, HandlerRegistry};
pub use lifecycle::Lifecycle;
pub use plugin::{Plugin, PluginConstructor, PluginManager, PluginRegistry};
