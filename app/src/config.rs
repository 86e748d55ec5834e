//! Application configuration.
//!
//! Builds the bottom `"DEFAULT"` level from the built-in keys plus every
//! enabled plugin's keys and defaults, then stacks config files on top:
//!
//! | Level     | Source                                          |
//! |-----------|-------------------------------------------------|
//! | `DEFAULT` | built-in and plugin defaults                    |
//! | `USER`    | file named by `HOLE_CONFIG`                     |
//! | `PROJECT` | `.hole.json`, `.hole.yaml` or `.hole.yml` in the working directory |

use std::path::{Path, PathBuf};

use hole_config::{Namespace, NamespaceStack, Value, read_mapping};
use tracing::{debug, info};

use crate::error::Result;
use crate::plugin::PluginManager;

/// Path of the loaded user config file.
pub const KEY_USER_CONFIG: &str = "user.config";
/// Reserved for external plugin directories.
pub const KEY_PLUGIN_PATH: &str = "plugin.path";
/// List of plugin names to keep enabled.
pub const KEY_PLUGIN_ENABLED: &str = "plugin.enabled";

/// Keys every configuration accepts.
pub const BUILTIN_KEYS: [&str; 3] = [KEY_USER_CONFIG, KEY_PLUGIN_PATH, KEY_PLUGIN_ENABLED];

pub const USER_LEVEL: &str = "USER";
pub const PROJECT_LEVEL: &str = "PROJECT";

/// Environment variable naming the user config file.
pub const USER_CONFIG_ENV: &str = "HOLE_CONFIG";

/// Project file names, in lookup order.
pub const PROJECT_FILE_NAMES: [&str; 3] = [".hole.json", ".hole.yaml", ".hole.yml"];

/// Owns the namespace stack of the application.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    stack: NamespaceStack,
}

impl ConfigManager {
    /// Builds the `"DEFAULT"` level for the currently enabled plugins.
    pub fn new(plugins: &PluginManager) -> Result<Self> {
        let mut keys: Vec<&str> = BUILTIN_KEYS.to_vec();
        for plugin in plugins.enabled() {
            keys.extend(plugin.config_keys());
        }

        let mut defaults = Namespace::new(keys);
        defaults.load(BUILTIN_KEYS.map(|key| (key, Value::Null)))?;
        for plugin in plugins.enabled() {
            plugin.apply_defaults(&mut defaults)?;
        }
        debug!(keys = defaults.allowed_keys().len(), "Built default configuration");

        Ok(Self {
            stack: NamespaceStack::new(defaults),
        })
    }

    /// Records `path` as the user config in every level.
    pub fn set_user_config(&mut self, path: &Path) -> Result<()> {
        let value = Value::String(path.display().to_string());
        self.stack.load_from_index([(KEY_USER_CONFIG, value)], 0)?;
        Ok(())
    }

    /// Reads a JSON or YAML mapping from `path` into a new level `name`.
    ///
    /// The level is created on top of the stack, loaded, and the effective
    /// namespace is recomputed.
    ///
    /// # Errors
    ///
    /// Fails on unreadable or malformed files, unknown keys and duplicate
    /// level names. The level stays registered if loading fails.
    pub fn load_file(&mut self, path: &Path, name: &str) -> Result<()> {
        let entries = read_mapping(path)?;
        self.stack.create_level(name)?;
        self.stack.load_into_level(entries, name)?;
        self.stack.update();
        info!(level = name, path = %path.display(), "Loaded config file");
        Ok(())
    }

    /// First project file present in `dir`.
    pub fn find_project_file(dir: &Path) -> Option<PathBuf> {
        PROJECT_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    }

    pub fn stack(&self) -> &NamespaceStack {
        &self.stack
    }

    pub fn stack_mut(&mut self) -> &mut NamespaceStack {
        &mut self.stack
    }

    pub fn effective(&self) -> &Namespace {
        self.stack.effective()
    }

    /// Effective value of `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.stack.effective().get(key)
    }
}
