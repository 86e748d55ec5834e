//! Command templates and parsed commands.
//!
//! A [`CommandSpec`] declares how many positional arguments a command needs
//! and which [`OptionSpec`]s it accepts. [`CommandSpec::parse`] walks a
//! [`TokenStream`] once, left to right, and produces a [`Command`].

use tracing::debug;

use crate::error::{ParseError, Result};
use crate::{CommandOption, OptionSpec, TokenStream, is_option, option_label};

/// Declarative template for one command.
///
/// # Examples
///
/// ```
/// use hole_core::{CommandSpec, OptionSpec, TokenStream};
///
/// let spec = CommandSpec::new("default", 0)
///     .with_option(OptionSpec::new("version"))
///     .with_option(OptionSpec::new("help"));
///
/// let command = spec.parse(&mut TokenStream::new(["--version"])).unwrap();
/// assert!(command.option("version").is_some());
/// assert!(command.option("help").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    name: String,
    arg_count: usize,
    options: Vec<OptionSpec>,
}

impl CommandSpec {
    /// Creates a template requiring at least `arg_count` positional arguments.
    pub fn new(name: &str, arg_count: usize) -> Self {
        Self {
            name: name.to_string(),
            arg_count,
            options: Vec::new(),
        }
    }

    /// Adds an accepted option.
    pub fn with_option(mut self, option: OptionSpec) -> Self {
        self.options.push(option);
        self
    }

    /// Adds an accepted option in place.
    pub fn add_option(&mut self, option: OptionSpec) {
        self.options.push(option);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arg_count(&self) -> usize {
        self.arg_count
    }

    pub fn options(&self) -> &[OptionSpec] {
        &self.options
    }

    /// Resolves an option label in declaration order.
    ///
    /// A label matches by exact long label, or by short label when it is a
    /// single character.
    pub fn find_option(&self, label: &str) -> Option<&OptionSpec> {
        self.options.iter().find(|o| o.matches(label))
    }

    /// Builds a [`Command`] from the remaining tokens.
    ///
    /// Options may be interleaved with positional arguments in any order.
    /// An option's own arguments are always the tokens right after it.
    ///
    /// # Errors
    ///
    /// - [`ParseError::OptionNotFound`] if an option token matches no
    ///   declared option.
    /// - [`ParseError::OptionInsufficientArguments`] if an option runs out of
    ///   arguments.
    /// - [`ParseError::InsufficientArguments`] if fewer than
    ///   [`arg_count`](Self::arg_count) positional arguments were collected.
    ///
    /// # Examples
    ///
    /// ```
    /// use hole_core::{CommandSpec, ParseError, TokenStream};
    ///
    /// let spec = CommandSpec::new("item", 1);
    /// let err = spec.parse(&mut TokenStream::new(Vec::<String>::new())).unwrap_err();
    /// assert!(matches!(
    ///     err,
    ///     ParseError::InsufficientArguments { required: 1, provided: 0, .. }
    /// ));
    /// ```
    pub fn parse<'s>(&'s self, tokens: &mut TokenStream) -> Result<Command<'s>> {
        let mut args = Vec::new();
        let mut options = Vec::new();

        while let Some(token) = tokens.next() {
            if !is_option(&token) {
                args.push(token);
                continue;
            }

            let label = option_label(&token);
            let option = self
                .find_option(label)
                .ok_or_else(|| ParseError::OptionNotFound {
                    command: self.name.clone(),
                    label: label.to_string(),
                })?;
            options.push(option.parse(tokens)?);
        }

        if args.len() < self.arg_count {
            return Err(ParseError::InsufficientArguments {
                command: self.name.clone(),
                required: self.arg_count,
                provided: args.len(),
            });
        }

        debug!(
            command = %self.name,
            args = args.len(),
            options = options.len(),
            "Parsed command"
        );

        Ok(Command {
            spec: self,
            args,
            options,
        })
    }
}

/// One parsed invocation of a [`CommandSpec`].
///
/// Options keep their command-line order. A repeated option produces one
/// [`CommandOption`] per occurrence; [`option`](Self::option) returns the
/// first and [`occurrences`](Self::occurrences) returns all of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command<'s> {
    spec: &'s CommandSpec,
    args: Vec<String>,
    options: Vec<CommandOption<'s>>,
}

impl<'s> Command<'s> {
    pub fn spec(&self) -> &'s CommandSpec {
        self.spec
    }

    /// Positional arguments in order.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Positional argument at `index`.
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }

    pub fn options(&self) -> &[CommandOption<'s>] {
        &self.options
    }

    /// First occurrence of the option with this long label.
    pub fn option(&self, long_label: &str) -> Option<&CommandOption<'s>> {
        self.options
            .iter()
            .find(|o| o.spec().long_label() == long_label)
    }

    /// Every occurrence of the option with this long label, in order.
    pub fn occurrences<'a>(
        &'a self,
        long_label: &str,
    ) -> impl Iterator<Item = &'a CommandOption<'s>> {
        self.options
            .iter()
            .filter(move |o| o.spec().long_label() == long_label)
    }

    /// Returns `true` if the option was given at least once.
    pub fn has_option(&self, long_label: &str) -> bool {
        self.option(long_label).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_spec() -> CommandSpec {
        CommandSpec::new("default", 0)
            .with_option(OptionSpec::new("version"))
            .with_option(OptionSpec::new("help"))
    }

    fn parse<'s>(spec: &'s CommandSpec, raw: &[&str]) -> Result<Command<'s>> {
        spec.parse(&mut TokenStream::new(raw.iter().copied()))
    }

    #[test]
    fn test_version_present_help_absent() {
        let spec = default_spec();
        let command = parse(&spec, &["--version"]).unwrap();
        assert!(command.option("version").is_some());
        assert!(command.option("help").is_none());
        assert!(command.args().is_empty());
    }

    #[test]
    fn test_short_label_resolution() {
        let spec = default_spec();
        let command = parse(&spec, &["-h"]).unwrap();
        assert!(command.has_option("help"));
        assert!(!command.has_option("version"));
    }

    #[test]
    fn test_grouped_short_equals_separate() {
        let spec = default_spec();
        let grouped = parse(&spec, &["-vh"]).unwrap();
        let separate = parse(&spec, &["-v", "-h"]).unwrap();
        assert_eq!(grouped, separate);
        assert!(grouped.has_option("version"));
        assert!(grouped.has_option("help"));
    }

    #[test]
    fn test_insufficient_arguments() {
        let spec = CommandSpec::new("item", 1);
        let err = parse(&spec, &[]).unwrap_err();
        assert_eq!(
            err,
            ParseError::InsufficientArguments {
                command: "item".to_string(),
                required: 1,
                provided: 0,
            }
        );
    }

    #[test]
    fn test_extra_positional_arguments_allowed() {
        let spec = CommandSpec::new("new", 1);
        let command = parse(&spec, &["a", "b", "c"]).unwrap();
        assert_eq!(command.args(), ["a", "b", "c"]);
        assert_eq!(command.arg(1), Some("b"));
        assert_eq!(command.arg(3), None);
    }

    #[test]
    fn test_option_not_found() {
        let spec = default_spec();
        let err = parse(&spec, &["--verbose"]).unwrap_err();
        assert_eq!(
            err,
            ParseError::OptionNotFound {
                command: "default".to_string(),
                label: "verbose".to_string(),
            }
        );
    }

    #[test]
    fn test_multichar_label_does_not_match_short() {
        let spec = default_spec();
        // "vh" is neither a long label nor a single character
        let err = parse(&spec, &["--vh"]).unwrap_err();
        assert!(matches!(err, ParseError::OptionNotFound { .. }));
    }

    #[test]
    fn test_options_interleaved_with_arguments() {
        let spec = CommandSpec::new("config", 1)
            .with_option(OptionSpec::new("level").with_args(1))
            .with_option(OptionSpec::new("verbose"));
        let command = parse(&spec, &["-l", "USER", "key", "--verbose", "more"]).unwrap();
        assert_eq!(command.args(), ["key", "more"]);
        assert_eq!(command.option("level").unwrap().value(), Some("USER"));
        assert!(command.has_option("verbose"));
    }

    #[test]
    fn test_option_argument_never_reinterpreted() {
        let spec = CommandSpec::new("config", 0)
            .with_option(OptionSpec::new("level").with_args(1))
            .with_option(OptionSpec::new("verbose"));
        let command = parse(&spec, &["--level", "--verbose"]).unwrap();
        assert_eq!(command.option("level").unwrap().value(), Some("--verbose"));
        assert!(!command.has_option("verbose"));
    }

    #[test]
    fn test_option_runs_out_of_arguments() {
        let spec = CommandSpec::new("config", 0).with_option(OptionSpec::new("level").with_args(1));
        let err = parse(&spec, &["x", "--level"]).unwrap_err();
        assert_eq!(
            err,
            ParseError::OptionInsufficientArguments {
                option: "level".to_string(),
                required: 1,
                provided: 0,
            }
        );
    }

    #[test]
    fn test_repeated_option_first_wins() {
        let spec = CommandSpec::new("tag", 0).with_option(OptionSpec::new("foo").with_args(1));
        let command = parse(&spec, &["--foo", "a", "--foo", "b"]).unwrap();
        assert_eq!(command.option("foo").unwrap().value(), Some("a"));
        let all: Vec<_> = command
            .occurrences("foo")
            .filter_map(|o| o.value())
            .collect();
        assert_eq!(all, vec!["a", "b"]);
    }

    #[test]
    fn test_lone_dash_is_positional() {
        let spec = CommandSpec::new("read", 1);
        let command = parse(&spec, &["-"]).unwrap();
        assert_eq!(command.args(), ["-"]);
    }

    #[test]
    fn test_first_declared_option_wins_on_short_collision() {
        let spec = CommandSpec::new("x", 0)
            .with_option(OptionSpec::new("verbose"))
            .with_option(OptionSpec::new("version"));
        let command = parse(&spec, &["-v"]).unwrap();
        assert!(command.has_option("verbose"));
        assert!(!command.has_option("version"));
    }
}
