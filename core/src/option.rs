//! Option templates and parsed option values.

use tracing::debug;

use crate::TokenStream;
use crate::error::{ParseError, Result};

/// Declares one option a command accepts.
///
/// An option has a long label (matched as `--label`), a single-character
/// short label (matched as `-l`) and a fixed number of arguments that follow
/// it on the command line.
///
/// # Examples
///
/// ```
/// use hole_core::OptionSpec;
///
/// let version = OptionSpec::new("version");
/// assert_eq!(version.short_label(), 'v');
/// assert_eq!(version.arg_count(), 0);
///
/// let level = OptionSpec::with_short("level", 'L').with_args(1);
/// assert_eq!(level.short_label(), 'L');
/// assert_eq!(level.arg_count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSpec {
    long_label: String,
    short_label: char,
    arg_count: usize,
}

impl OptionSpec {
    /// Creates a flag whose short label is the first character of `long_label`.
    ///
    /// An empty `long_label` yields a NUL short label that no token can
    /// match; [`validate_command_spec`](crate::validate_command_spec) reports
    /// it as [`SpecError::EmptyLabel`](crate::SpecError::EmptyLabel).
    pub fn new(long_label: &str) -> Self {
        let short_label = long_label.chars().next().unwrap_or('\0');
        Self::with_short(long_label, short_label)
    }

    /// Creates a flag with an explicit short label.
    pub fn with_short(long_label: &str, short_label: char) -> Self {
        Self {
            long_label: long_label.to_string(),
            short_label,
            arg_count: 0,
        }
    }

    /// Sets how many arguments the option consumes.
    pub fn with_args(mut self, arg_count: usize) -> Self {
        self.arg_count = arg_count;
        self
    }

    pub fn long_label(&self) -> &str {
        &self.long_label
    }

    pub fn short_label(&self) -> char {
        self.short_label
    }

    pub fn arg_count(&self) -> usize {
        self.arg_count
    }

    /// Returns `true` if `label` (already stripped of dashes) names this option.
    ///
    /// Only a one-character label may match the short form.
    pub fn matches(&self, label: &str) -> bool {
        if self.long_label == label {
            return true;
        }
        let mut chars = label.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => c == self.short_label,
            _ => false,
        }
    }

    /// Consumes exactly [`arg_count`](Self::arg_count) tokens as this
    /// option's arguments.
    ///
    /// Arguments are taken by position, even when they look like options.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::OptionInsufficientArguments`] if the stream is
    /// exhausted first.
    ///
    /// # Examples
    ///
    /// ```
    /// use hole_core::{OptionSpec, TokenStream};
    ///
    /// let spec = OptionSpec::new("level").with_args(1);
    /// let mut tokens = TokenStream::new(["--raw"]);
    /// let option = spec.parse(&mut tokens).unwrap();
    /// assert_eq!(option.args(), ["--raw"]);
    /// ```
    pub fn parse<'s>(&'s self, tokens: &mut TokenStream) -> Result<CommandOption<'s>> {
        let mut args = Vec::with_capacity(self.arg_count);
        while args.len() < self.arg_count {
            match tokens.next() {
                Some(token) => args.push(token),
                None => {
                    return Err(ParseError::OptionInsufficientArguments {
                        option: self.long_label.clone(),
                        required: self.arg_count,
                        provided: args.len(),
                    });
                }
            }
        }

        debug!(option = %self.long_label, args = ?args, "Parsed option");
        Ok(CommandOption { spec: self, args })
    }
}

/// An option as it appeared in one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOption<'s> {
    spec: &'s OptionSpec,
    args: Vec<String>,
}

impl<'s> CommandOption<'s> {
    pub fn spec(&self) -> &'s OptionSpec {
        self.spec
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// First argument, if the option takes any.
    pub fn value(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_label_defaults_to_first_char() {
        let spec = OptionSpec::new("help");
        assert_eq!(spec.short_label(), 'h');
        assert_eq!(spec.long_label(), "help");
    }

    #[test]
    fn test_matches_long_and_short() {
        let spec = OptionSpec::new("help");
        assert!(spec.matches("help"));
        assert!(spec.matches("h"));
        assert!(!spec.matches("he"));
        assert!(!spec.matches("x"));
    }

    #[test]
    fn test_parse_consumes_arguments_blindly() {
        let spec = OptionSpec::new("pair").with_args(2);
        let mut tokens = TokenStream::new(["a", "--b", "c"]);
        let option = spec.parse(&mut tokens).unwrap();
        assert_eq!(option.args(), ["a", "--b"]);
        assert_eq!(option.value(), Some("a"));
        assert_eq!(tokens.peek(), Some("c"));
    }

    #[test]
    fn test_parse_insufficient_arguments() {
        let spec = OptionSpec::new("pair").with_args(3);
        let mut tokens = TokenStream::new(["a"]);
        let err = spec.parse(&mut tokens).unwrap_err();
        assert_eq!(
            err,
            ParseError::OptionInsufficientArguments {
                option: "pair".to_string(),
                required: 3,
                provided: 1,
            }
        );
    }

    #[test]
    fn test_flag_consumes_nothing() {
        let spec = OptionSpec::new("verbose");
        let mut tokens = TokenStream::new(["x"]);
        let option = spec.parse(&mut tokens).unwrap();
        assert!(option.args().is_empty());
        assert_eq!(option.value(), None);
        assert_eq!(tokens.remaining(), 1);
    }
}
