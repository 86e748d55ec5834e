//! Handlers registered by every application.

use hole_config::{ConfigError, Value};
use hole_core::{Command, CommandSpec, OptionSpec};

use crate::app::AppContext;
use crate::bundle::{Bundle, StatusCode};
use crate::error::{AppError, Result};
use crate::handler::{Handler, HandlerRegistry};

/// Version printed by `hole --version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Registers the built-in handlers. Fails if any name is already taken.
pub fn register(registry: &mut HandlerRegistry) -> Result<()> {
    registry.register(None, Box::new(DefaultHandler::new()), false)?;
    registry.register(Some("new"), Box::new(NewHandler::new()), false)?;
    registry.register(Some("item"), Box::new(ItemHandler::new()), false)?;
    registry.register(Some("config"), Box::new(ConfigHandler::new()), false)?;
    Ok(())
}

/// Renders a config value for display: strings without quotes, the rest as
/// JSON.
pub(crate) fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Parses a numeric entry id argument.
pub(crate) fn parse_id(arg: &str) -> Result<u32> {
    arg.parse().map_err(|err: std::num::ParseIntError| AppError::InvalidArgument {
        value: arg.to_string(),
        reason: format!("expected an entry id: {err}"),
    })
}

// ---------------------------------------------------------------------------
// Default
// ---------------------------------------------------------------------------

/// `hole [--version | --help]`; prints the manual when no option is given.
pub struct DefaultHandler {
    spec: CommandSpec,
}

impl DefaultHandler {
    pub fn new() -> Self {
        Self {
            spec: CommandSpec::new("default", 0)
                .with_option(OptionSpec::new("version"))
                .with_option(OptionSpec::new("help")),
        }
    }
}

impl Default for DefaultHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl Handler for DefaultHandler {
    fn spec(&self) -> &CommandSpec {
        &self.spec
    }

    fn summary(&self) -> &str {
        "Show the version or this manual"
    }

    fn handle(
        &self,
        command: &Command<'_>,
        bundle: &mut Bundle,
        context: &mut AppContext,
    ) -> Result<()> {
        bundle.set_status(StatusCode::Success);
        if command.has_option("version") {
            bundle.push_line(format!("Hole v{VERSION}"));
        } else {
            bundle.push_line(context.manual());
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// new
// ---------------------------------------------------------------------------

/// `hole new`: creates an empty entry.
pub struct NewHandler {
    spec: CommandSpec,
}

impl NewHandler {
    pub fn new() -> Self {
        Self {
            spec: CommandSpec::new("new", 0),
        }
    }
}

impl Default for NewHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl Handler for NewHandler {
    fn spec(&self) -> &CommandSpec {
        &self.spec
    }

    fn summary(&self) -> &str {
        "Create an empty entry"
    }

    fn handle(
        &self,
        _command: &Command<'_>,
        bundle: &mut Bundle,
        context: &mut AppContext,
    ) -> Result<()> {
        let id = context.create_entry(Vec::<(String, String)>::new())?.id();
        bundle.set_status(StatusCode::Success);
        bundle.push_line(format!("Entry created: {id}"));
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// item
// ---------------------------------------------------------------------------

/// `hole item <id> [--json]`: prints one entry.
pub struct ItemHandler {
    spec: CommandSpec,
}

impl ItemHandler {
    pub fn new() -> Self {
        Self {
            spec: CommandSpec::new("item", 1).with_option(OptionSpec::new("json")),
        }
    }
}

impl Default for ItemHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl Handler for ItemHandler {
    fn spec(&self) -> &CommandSpec {
        &self.spec
    }

    fn summary(&self) -> &str {
        "Show an entry by id"
    }

    fn handle(
        &self,
        command: &Command<'_>,
        bundle: &mut Bundle,
        context: &mut AppContext,
    ) -> Result<()> {
        let id = parse_id(command.arg(0).unwrap_or_default())?;
        let entry = context.entries.get(id)?;

        if command.has_option("json") {
            bundle.push_line(serde_json::to_string_pretty(entry)?);
        } else {
            bundle.push_line(format!("id: {}", entry.id()));
            for (key, value) in entry.properties() {
                bundle.push_line(format!("{key}: {value}"));
            }
        }
        bundle.set_status(StatusCode::Success);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// config
// ---------------------------------------------------------------------------

/// `hole config [key] [--level <name>]`: prints configuration values.
pub struct ConfigHandler {
    spec: CommandSpec,
}

impl ConfigHandler {
    pub fn new() -> Self {
        Self {
            spec: CommandSpec::new("config", 0)
                .with_option(OptionSpec::new("level").with_args(1)),
        }
    }
}

impl Default for ConfigHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl Handler for ConfigHandler {
    fn spec(&self) -> &CommandSpec {
        &self.spec
    }

    fn summary(&self) -> &str {
        "Show effective configuration, or one level or key"
    }

    fn handle(
        &self,
        command: &Command<'_>,
        bundle: &mut Bundle,
        context: &mut AppContext,
    ) -> Result<()> {
        let level = command.option("level").and_then(|o| o.value());
        let namespace = context.config.stack().get(level)?;

        match command.arg(0) {
            Some(key) => {
                if !namespace.is_allowed(key) {
                    return Err(ConfigError::IllegalKey(key.to_string()).into());
                }
                let rendered = namespace
                    .get(key)
                    .map(render_value)
                    .unwrap_or_else(|| "null".to_string());
                bundle.push_line(rendered);
            }
            None => {
                for key in namespace.allowed_keys() {
                    let rendered = namespace
                        .get(key)
                        .map(render_value)
                        .unwrap_or_else(|| "null".to_string());
                    bundle.push_line(format!("{key} = {rendered}"));
                }
            }
        }
        bundle.set_status(StatusCode::Success);
        Ok(())
    }
}
