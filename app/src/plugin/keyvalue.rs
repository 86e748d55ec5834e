//! Key/value entries.
//!
//! Replaces `new` with `new <key> <value>` and adds `key <key>`, which
//! prints the value of every entry stored under that key.

use hole_core::{Command, CommandSpec};

use crate::app::AppContext;
use crate::bundle::{Bundle, Env, StatusCode};
use crate::error::Result;
use crate::handler::{Handler, HandlerRegistry};
use crate::plugin::Plugin;

const KEY_PROPERTY: &str = "key";
const VALUE_PROPERTY: &str = "value";

#[derive(Debug, Default)]
pub struct KeyValuePlugin;

impl KeyValuePlugin {
    pub const NAME: &'static str = "keyvalue";

    pub fn construct(_env: &Env) -> Box<dyn Plugin> {
        Box::new(Self)
    }
}

impl Plugin for KeyValuePlugin {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn register_handlers(&self, handlers: &mut HandlerRegistry) -> Result<()> {
        handlers.register(Some("new"), Box::new(NewPairHandler::new()), true)?;
        handlers.register(Some("key"), Box::new(KeyHandler::new()), true)?;
        Ok(())
    }
}

/// `hole new <key> <value>`
struct NewPairHandler {
    spec: CommandSpec,
}

impl NewPairHandler {
    fn new() -> Self {
        Self {
            spec: CommandSpec::new("new", 2),
        }
    }
}

impl Handler for NewPairHandler {
    fn spec(&self) -> &CommandSpec {
        &self.spec
    }

    fn summary(&self) -> &str {
        "Create an entry holding a key and a value"
    }

    fn handle(
        &self,
        command: &Command<'_>,
        bundle: &mut Bundle,
        context: &mut AppContext,
    ) -> Result<()> {
        let key = command.arg(0).unwrap_or_default();
        let value = command.arg(1).unwrap_or_default();
        let id = context
            .create_entry([(KEY_PROPERTY, key), (VALUE_PROPERTY, value)])?
            .id();

        bundle.set_status(StatusCode::Success);
        bundle.push_line(format!("Entry created: {id} ({key} = {value})"));
        Ok(())
    }
}

/// `hole key <key>`
struct KeyHandler {
    spec: CommandSpec,
}

impl KeyHandler {
    fn new() -> Self {
        Self {
            spec: CommandSpec::new("key", 1),
        }
    }
}

impl Handler for KeyHandler {
    fn spec(&self) -> &CommandSpec {
        &self.spec
    }

    fn summary(&self) -> &str {
        "List values stored under a key"
    }

    fn handle(
        &self,
        command: &Command<'_>,
        bundle: &mut Bundle,
        context: &mut AppContext,
    ) -> Result<()> {
        let key = command.arg(0).unwrap_or_default();
        for entry in context.entries.find_by(KEY_PROPERTY, key) {
            bundle.push_line(entry.get(VALUE_PROPERTY)?);
        }
        bundle.set_status(StatusCode::Success);
        Ok(())
    }
}
