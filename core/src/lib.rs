//! Command-line tokenization and command templates for `hole`.
//!
//! This crate turns a raw argument vector into a structured [`Command`]:
//!
//! - [`TokenStream`]: expands grouped short options (`-abc` → `-a -b -c`)
//!   and iterates tokens by position.
//! - [`OptionSpec`]: an option's long label, short label and argument
//!   count; parses a [`CommandOption`].
//! - [`CommandSpec`]: required positional argument count plus accepted
//!   options; parses a [`Command`].
//!
//! Validation ([`validate_command_spec`]) catches ambiguous templates such
//! as duplicate labels.
//!
//! # Example
//!
//! ```
//! use hole_core::*;
//!
//! let spec = CommandSpec::new("config", 0)
//!     .with_option(OptionSpec::new("level").with_args(1))
//!     .with_option(OptionSpec::new("verbose"));
//! assert!(validate_command_spec(&spec).is_empty());
//!
//! let mut tokens = TokenStream::new(["user.name", "-vl", "USER"]);
//! let command = spec.parse(&mut tokens).unwrap();
//!
//! assert_eq!(command.args(), ["user.name"]);
//! assert!(command.has_option("verbose"));
//! assert_eq!(command.option("level").unwrap().value(), Some("USER"));
//! ```

mod command;
mod error;
mod option;
mod token;
mod validate;

pub use command::{Command, CommandSpec};
pub use error::{ParseError, Result};
pub use option::{CommandOption, OptionSpec};
pub use token::{TokenStream, is_long_option, is_option, option_label};
pub use validate::{SpecError, validate_command_spec};
