//! Error types for command parsing.

use thiserror::Error;

/// Errors raised while turning a [`TokenStream`](crate::TokenStream) into a
/// [`Command`](crate::Command).
///
/// Every variant aborts the parse; no partial command is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The command received fewer positional arguments than it requires.
    #[error(
        "insufficient arguments for command '{command}': {required} required, but only {provided} provided"
    )]
    InsufficientArguments {
        command: String,
        required: usize,
        provided: usize,
    },

    /// An option token matched no declared option of the command.
    #[error("option not found for command '{command}': there is no option for \"{label}\"")]
    OptionNotFound { command: String, label: String },

    /// The stream ran out before an option collected all of its arguments.
    #[error(
        "insufficient arguments for option '{option}': {required} required, but only {provided} provided"
    )]
    OptionInsufficientArguments {
        option: String,
        required: usize,
        provided: usize,
    },
}

/// Convenience alias for results with [`ParseError`].
pub type Result<T> = std::result::Result<T, ParseError>;
