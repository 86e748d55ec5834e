//! Application wiring.
//!
//! [`App::bootstrap`] loads plugins and configuration, [`App::init`]
//! registers handlers, and [`App::execute_raw_args`] runs one command line
//! through the plugins and the selected handler.

use std::path::PathBuf;

use hole_core::TokenStream;
use tracing::{debug, info};

use crate::bundle::{Bundle, Env, StatusCode};
use crate::config::{
    ConfigManager, KEY_PLUGIN_ENABLED, PROJECT_LEVEL, USER_CONFIG_ENV, USER_LEVEL,
};
use crate::entry::{Entry, EntryStore};
use crate::error::Result;
use crate::handler::{HandlerRegistry, builtin};
use crate::lifecycle::Lifecycle;
use crate::plugin::{PluginManager, PluginRegistry};

/// Config files to stack over the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigSources {
    /// Loaded as the `USER` level.
    pub user: Option<PathBuf>,
    /// Loaded as the `PROJECT` level, above `USER`.
    pub project: Option<PathBuf>,
}

impl ConfigSources {
    /// Reads `HOLE_CONFIG` and looks for a project file in the working
    /// directory.
    pub fn discover(env: &Env) -> Self {
        Self {
            user: std::env::var_os(USER_CONFIG_ENV)
                .filter(|path| !path.is_empty())
                .map(PathBuf::from),
            project: ConfigManager::find_project_file(&env.dir),
        }
    }
}

/// State shared with every handler.
pub struct AppContext {
    pub env: Env,
    pub config: ConfigManager,
    pub entries: EntryStore,
    pub plugins: PluginManager,
    manual: String,
}

impl AppContext {
    pub fn new(env: Env, config: ConfigManager, plugins: PluginManager) -> Self {
        Self {
            env,
            config,
            entries: EntryStore::new(),
            plugins,
            manual: String::new(),
        }
    }

    /// Stores a new entry and lets every enabled plugin amend it.
    pub fn create_entry<I, K, V>(&mut self, properties: I) -> Result<&mut Entry>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let AppContext {
            config,
            entries,
            plugins,
            ..
        } = self;

        let entry = entries.create(properties);
        for plugin in plugins.enabled() {
            plugin.on_create_entry(entry, config.effective())?;
        }
        debug!(id = entry.id(), "Created entry");
        Ok(entry)
    }

    /// Manual text printed by `hole --help`.
    pub fn manual(&self) -> &str {
        &self.manual
    }

    pub fn set_manual(&mut self, manual: String) {
        self.manual = manual;
    }
}

/// The `hole` application.
///
/// # Examples
///
/// ```
/// use hole_app::{App, ConfigSources, Env, PluginRegistry};
///
/// let mut app = App::bootstrap(
///     Env::new("."),
///     &PluginRegistry::builtin(),
///     &ConfigSources::default(),
/// )
/// .unwrap();
/// app.init().unwrap();
///
/// let bundle = app.execute_raw_args(["new", "color", "red"]).unwrap();
/// assert_eq!(bundle.output(), "Entry created: 1 (color = red)");
///
/// let bundle = app.execute_raw_args(["key", "color"]).unwrap();
/// assert_eq!(bundle.output(), "red");
/// ```
pub struct App {
    lifecycle: Lifecycle,
    handlers: HandlerRegistry,
    context: AppContext,
}

impl App {
    /// Loads every registry plugin, builds the configuration and applies
    /// `plugin.enabled`.
    ///
    /// # Errors
    ///
    /// Fails if a config file cannot be loaded or names an unknown plugin.
    pub fn bootstrap(
        env: Env,
        registry: &PluginRegistry,
        sources: &ConfigSources,
    ) -> Result<Self> {
        let mut plugins = PluginManager::new();
        plugins.load_all(registry, &env)?;

        let mut config = ConfigManager::new(&plugins)?;
        if let Some(path) = &sources.user {
            config.set_user_config(path)?;
            config.load_file(path, USER_LEVEL)?;
        }
        if let Some(path) = &sources.project {
            config.load_file(path, PROJECT_LEVEL)?;
        }
        plugins.apply_enabled_list(config.get(KEY_PLUGIN_ENABLED))?;

        info!(
            dir = %env.dir.display(),
            levels = config.stack().len(),
            "Bootstrapped application"
        );
        Ok(Self {
            lifecycle: Lifecycle::default(),
            handlers: HandlerRegistry::new(),
            context: AppContext::new(env, config, plugins),
        })
    }

    /// Registers built-in handlers, then each enabled plugin's handlers, and
    /// marks the application ready.
    pub fn init(&mut self) -> Result<()> {
        let mut next = self.lifecycle;
        next.init()?;

        builtin::register(&mut self.handlers)?;
        for plugin in self.context.plugins.enabled() {
            plugin.register_handlers(&mut self.handlers)?;
        }
        self.context.set_manual(self.handlers.usage());

        self.lifecycle = next;
        debug!("Application ready");
        Ok(())
    }

    pub fn destroy(&mut self) -> Result<()> {
        self.lifecycle.destroy()
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn handlers(&self) -> &HandlerRegistry {
        &self.handlers
    }

    pub fn context(&self) -> &AppContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut AppContext {
        &mut self.context
    }

    /// Runs one raw command line and returns its bundle.
    ///
    /// Enabled plugins see the tokens first; the handler runs only if none
    /// of them settled the status. Plugins then see the bundle again before
    /// it is returned for printing.
    pub fn execute_raw_args<I, S>(&mut self, args: I) -> Result<Bundle>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lifecycle.ensure_ready()?;

        let mut tokens = TokenStream::new(args);
        let mut bundle = Bundle::new(self.context.env.clone());

        for plugin in self.context.plugins.enabled() {
            plugin.before_execute(&mut bundle, &mut tokens);
        }
        if bundle.status() == StatusCode::Null {
            self.execute(&mut bundle, &mut tokens)?;
        }
        for plugin in self.context.plugins.enabled() {
            plugin.before_print(&mut bundle);
        }
        Ok(bundle)
    }

    /// Dispatches the remaining tokens to a handler.
    pub fn execute(&mut self, bundle: &mut Bundle, tokens: &mut TokenStream) -> Result<()> {
        self.lifecycle.ensure_ready()?;
        self.handlers.dispatch(tokens, bundle, &mut self.context)
    }
}
