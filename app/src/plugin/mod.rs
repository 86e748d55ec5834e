//! Plugins and the registry they are constructed from.
//!
//! Plugins are compiled in. A [`PluginRegistry`] maps plugin names to
//! constructor functions; the [`PluginManager`] instantiates them, tracks
//! which ones are enabled and hands the enabled ones out in load order.

mod keyvalue;
mod time;

use std::collections::{BTreeMap, BTreeSet};

use hole_config::{Namespace, Value};
use hole_core::TokenStream;
use tracing::{debug, info};

use crate::bundle::{Bundle, Env};
use crate::entry::Entry;
use crate::error::{AppError, Result};
use crate::handler::HandlerRegistry;

pub use keyvalue::KeyValuePlugin;
pub use time::{KEY_TIME_FORMAT, TIME_PROPERTY, TimePlugin};

/// Hooks a plugin can attach to the application.
///
/// Every hook has a no-op default, so a plugin implements only what it
/// needs.
pub trait Plugin {
    /// Unique name used by the registry and the `plugin.enabled` key.
    fn name(&self) -> &str;

    /// Extra configuration keys the plugin reads.
    fn config_keys(&self) -> Vec<&'static str> {
        Vec::new()
    }

    /// Writes default values for [`config_keys`](Self::config_keys) into the
    /// bottom configuration level.
    fn apply_defaults(&self, _defaults: &mut Namespace) -> hole_config::Result<()> {
        Ok(())
    }

    /// Adds or overrides command handlers.
    fn register_handlers(&self, _handlers: &mut HandlerRegistry) -> Result<()> {
        Ok(())
    }

    /// Runs before dispatch. Setting a status other than `Null` on the
    /// bundle skips the handler.
    fn before_execute(&self, _bundle: &mut Bundle, _tokens: &mut TokenStream) {}

    /// Runs after dispatch, before the output is printed.
    fn before_print(&self, _bundle: &mut Bundle) {}

    /// Runs for every newly created entry.
    fn on_create_entry(&self, _entry: &mut Entry, _config: &Namespace) -> Result<()> {
        Ok(())
    }
}

/// Builds a plugin for the given environment.
pub type PluginConstructor = fn(&Env) -> Box<dyn Plugin>;

/// Named plugin constructors.
#[derive(Default)]
pub struct PluginRegistry {
    constructors: BTreeMap<String, PluginConstructor>,
}

impl PluginRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every plugin shipped with `hole`.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(KeyValuePlugin::NAME, KeyValuePlugin::construct);
        registry.register(TimePlugin::NAME, TimePlugin::construct);
        registry
    }

    /// Adds or replaces a constructor.
    pub fn register(&mut self, name: &str, constructor: PluginConstructor) {
        self.constructors.insert(name.to_string(), constructor);
    }

    /// Registered names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.constructors.keys().map(String::as_str)
    }

    /// Instantiates a registered plugin.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::PluginNotFound`] for unregistered names.
    pub fn construct(&self, name: &str, env: &Env) -> Result<Box<dyn Plugin>> {
        let constructor = self
            .constructors
            .get(name)
            .ok_or_else(|| AppError::PluginNotFound(name.to_string()))?;
        Ok(constructor(env))
    }
}

/// Loaded plugins and their enabled state.
#[derive(Default)]
pub struct PluginManager {
    plugins: Vec<Box<dyn Plugin>>,
    enabled: BTreeSet<String>,
}

impl PluginManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Instantiates `name` from the registry and enables it.
    ///
    /// Loading a name twice replaces the earlier instance.
    pub fn load(&mut self, registry: &PluginRegistry, name: &str, env: &Env) -> Result<()> {
        let plugin = registry.construct(name, env)?;
        let plugin_name = plugin.name().to_string();
        self.plugins.retain(|p| p.name() != plugin_name);
        debug!(plugin = %plugin_name, "Loaded plugin");
        self.enabled.insert(plugin_name);
        self.plugins.push(plugin);
        Ok(())
    }

    /// Loads every plugin in the registry.
    pub fn load_all(&mut self, registry: &PluginRegistry, env: &Env) -> Result<()> {
        for name in registry.names() {
            self.load(registry, name, env)?;
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`AppError::PluginNotFound`] if no plugin with this name is
    /// loaded.
    pub fn enable(&mut self, name: &str) -> Result<()> {
        self.ensure_loaded(name)?;
        self.enabled.insert(name.to_string());
        Ok(())
    }

    pub fn disable(&mut self, name: &str) -> Result<()> {
        self.ensure_loaded(name)?;
        self.enabled.remove(name);
        Ok(())
    }

    pub fn is_enabled(&self, name: &str) -> bool {
        self.enabled.contains(name)
    }

    /// Names of loaded plugins, in load order.
    pub fn loaded(&self) -> impl Iterator<Item = &str> {
        self.plugins.iter().map(|p| p.name())
    }

    /// Enabled plugins, in load order.
    pub fn enabled(&self) -> impl Iterator<Item = &dyn Plugin> {
        self.plugins
            .iter()
            .filter(|p| self.enabled.contains(p.name()))
            .map(|p| p.as_ref() as &dyn Plugin)
    }

    /// Restricts the enabled set to the names listed under `plugin.enabled`.
    ///
    /// A missing or null value leaves every loaded plugin enabled.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidArgument`] if the value is not a list of strings.
    /// - [`AppError::PluginNotFound`] if a listed plugin is not loaded.
    pub fn apply_enabled_list(&mut self, value: Option<&Value>) -> Result<()> {
        let names: Option<Vec<String>> = match value {
            None => None,
            Some(value) => {
                serde_json::from_value(value.clone()).map_err(|err| AppError::InvalidArgument {
                    value: value.to_string(),
                    reason: format!("plugin.enabled must be a list of names: {err}"),
                })?
            }
        };
        let Some(names) = names else {
            return Ok(());
        };

        for name in &names {
            self.ensure_loaded(name)?;
        }
        self.enabled = names.into_iter().collect();
        info!(enabled = ?self.enabled, "Restricted enabled plugins");
        Ok(())
    }

    fn ensure_loaded(&self, name: &str) -> Result<()> {
        if self.plugins.iter().any(|p| p.name() == name) {
            Ok(())
        } else {
            Err(AppError::PluginNotFound(name.to_string()))
        }
    }
}
