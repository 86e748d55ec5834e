//! Command template validation.
//!
//! Catches definitions that would make option resolution ambiguous, such as
//! two options sharing a long label or a short label, before a template is
//! used to parse anything.
//!
//! # Examples
//!
//! ```
//! use hole_core::*;
//!
//! let spec = CommandSpec::new("default", 0)
//!     .with_option(OptionSpec::new("version"))
//!     .with_option(OptionSpec::new("help"));
//! assert!(validate_command_spec(&spec).is_empty());
//!
//! // `verbose` and `version` both default to `-v`
//! let bad = CommandSpec::new("default", 0)
//!     .with_option(OptionSpec::new("verbose"))
//!     .with_option(OptionSpec::new("version"));
//! assert_eq!(
//!     validate_command_spec(&bad),
//!     vec![SpecError::DuplicateShortLabel('v')]
//! );
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::CommandSpec;

/// Command template validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecError {
    /// An option's long label is empty.
    #[error("option long label cannot be empty")]
    EmptyLabel,
    /// A long label carries leading dashes (e.g. `"--help"` instead of `"help"`).
    #[error("option long label must not start with '-': {0}")]
    DashedLabel(String),
    /// Two options share a long label.
    #[error("duplicate option long label: {0}")]
    DuplicateLongLabel(String),
    /// Two options share a short label.
    #[error("duplicate option short label: {0}")]
    DuplicateShortLabel(char),
}

/// Validates a command template, returning every problem found.
///
/// Options with a malformed long label are reported once and skipped for
/// the duplicate checks.
pub fn validate_command_spec(spec: &CommandSpec) -> Vec<SpecError> {
    let mut errors = Vec::new();
    let mut long_labels = HashSet::new();
    let mut short_labels = HashSet::new();

    for option in spec.options() {
        let long = option.long_label();
        if long.is_empty() {
            errors.push(SpecError::EmptyLabel);
            continue;
        }
        if long.starts_with('-') {
            errors.push(SpecError::DashedLabel(long.to_string()));
            continue;
        }
        if !long_labels.insert(long) {
            errors.push(SpecError::DuplicateLongLabel(long.to_string()));
        }
        if !short_labels.insert(option.short_label()) {
            errors.push(SpecError::DuplicateShortLabel(option.short_label()));
        }
    }

    errors
}
