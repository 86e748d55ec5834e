//! Command handlers and dispatch.
//!
//! A handler owns a [`CommandSpec`] and runs against the [`Command`] parsed
//! from it. Handlers are registered under a command name; the unnamed slot
//! holds the default handler that runs when no command name is given.

pub mod builtin;

use std::collections::BTreeMap;
use std::fmt::Write as _;

use hole_core::{Command, CommandSpec, TokenStream, is_option, validate_command_spec};
use tracing::debug;

use crate::app::AppContext;
use crate::bundle::Bundle;
use crate::error::{AppError, Result};

/// Name shown for the unnamed handler in errors and the manual.
pub const DEFAULT_HANDLER_NAME: &str = "default";

/// Executes one kind of command.
pub trait Handler {
    /// Template the command line is parsed against.
    fn spec(&self) -> &CommandSpec;

    /// One-line description for the manual.
    fn summary(&self) -> &str {
        ""
    }

    fn handle(
        &self,
        command: &Command<'_>,
        bundle: &mut Bundle,
        context: &mut AppContext,
    ) -> Result<()>;
}

/// Handlers by command name; `None` is the default handler.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: BTreeMap<Option<String>, Box<dyn Handler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` under `name`.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidSpec`] if the handler's template is ambiguous.
    /// - [`AppError::HandlerAlreadyExists`] if `name` is taken and
    ///   `overwrite` is `false`.
    pub fn register(
        &mut self,
        name: Option<&str>,
        handler: Box<dyn Handler>,
        overwrite: bool,
    ) -> Result<()> {
        let handler_name = name.unwrap_or(DEFAULT_HANDLER_NAME);
        if let Some(source) = validate_command_spec(handler.spec()).into_iter().next() {
            return Err(AppError::InvalidSpec {
                handler: handler_name.to_string(),
                source,
            });
        }

        let key = name.map(str::to_string);
        if !overwrite && self.handlers.contains_key(&key) {
            return Err(AppError::HandlerAlreadyExists(handler_name.to_string()));
        }

        debug!(handler = handler_name, overwrite, "Registered handler");
        self.handlers.insert(key, handler);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`AppError::HandlerNotFound`] if nothing is registered under
    /// `name`.
    pub fn get(&self, name: Option<&str>) -> Result<&dyn Handler> {
        self.handlers
            .get(&name.map(str::to_string))
            .map(|h| h.as_ref() as &dyn Handler)
            .ok_or_else(|| {
                AppError::HandlerNotFound(name.unwrap_or(DEFAULT_HANDLER_NAME).to_string())
            })
    }

    pub fn contains(&self, name: Option<&str>) -> bool {
        self.handlers.contains_key(&name.map(str::to_string))
    }

    /// Registered handlers, the default first, then by name.
    pub fn iter(&self) -> impl Iterator<Item = (Option<&str>, &dyn Handler)> {
        self.handlers
            .iter()
            .map(|(name, h)| (name.as_deref(), h.as_ref() as &dyn Handler))
    }

    /// Selects a handler from the next token and runs it on the rest.
    ///
    /// A leading plain token names the handler and is consumed; a leading
    /// option, or no token at all, selects the default handler.
    pub fn dispatch(
        &self,
        tokens: &mut TokenStream,
        bundle: &mut Bundle,
        context: &mut AppContext,
    ) -> Result<()> {
        let named = tokens.peek().is_some_and(|token| !is_option(token));
        let name = if named { tokens.next() } else { None };
        let handler = self.get(name.as_deref())?;
        let command = handler.spec().parse(tokens)?;

        debug!(
            handler = name.as_deref().unwrap_or(DEFAULT_HANDLER_NAME),
            "Dispatching command"
        );
        handler.handle(&command, bundle, context)
    }

    /// Renders the manual listing every handler and its options.
    pub fn usage(&self) -> String {
        let mut out = String::from("Usage: hole [command] [arguments] [options]\n\nCommands:\n");
        for (name, handler) in self.iter() {
            let spec = handler.spec();
            let mut synopsis = name.unwrap_or("(default)").to_string();
            for index in 0..spec.arg_count() {
                let _ = write!(synopsis, " <arg{}>", index + 1);
            }
            let _ = writeln!(out, "  {synopsis:<24}{}", handler.summary());

            for option in spec.options() {
                let mut flag = format!("--{}", option.long_label());
                if option.short_label() != '\0' {
                    let _ = write!(flag, ", -{}", option.short_label());
                }
                for _ in 0..option.arg_count() {
                    flag.push_str(" <value>");
                }
                let _ = writeln!(out, "      {flag}");
            }
        }
        out
    }
}
