//! Token stream over raw command-line words.
//!
//! [`TokenStream`] pre-splits grouped short options (`-abc` becomes `-a`,
//! `-b`, `-c`) so that downstream parsing only ever sees atomic tokens.
//! Long options (`--name`) and plain words pass through untouched.

/// Returns `true` if `token` is an option token (short or long).
///
/// A lone `-` is a plain token, conventionally meaning stdin.
///
/// # Examples
///
/// ```
/// use hole_core::is_option;
///
/// assert!(is_option("-v"));
/// assert!(is_option("--verbose"));
/// assert!(!is_option("-"));
/// assert!(!is_option("file.txt"));
/// ```
pub fn is_option(token: &str) -> bool {
    token.starts_with('-') && token.len() > 1
}

/// Returns `true` if `token` starts with two dashes.
pub fn is_long_option(token: &str) -> bool {
    token.starts_with("--")
}

/// Extracts the label of an option token by dropping its leading dash(es).
///
/// # Examples
///
/// ```
/// use hole_core::option_label;
///
/// assert_eq!(option_label("--version"), "version");
/// assert_eq!(option_label("-v"), "v");
/// assert_eq!(option_label("plain"), "plain");
/// ```
pub fn option_label(token: &str) -> &str {
    token
        .strip_prefix("--")
        .or_else(|| token.strip_prefix('-'))
        .unwrap_or(token)
}

/// Flat, expanded list of tokens iterated by position.
///
/// Implements [`Iterator`], so [`next`](Iterator::next) advances and yields
/// `None` once the stream is exhausted.
///
/// # Examples
///
/// ```
/// use hole_core::TokenStream;
///
/// let mut tokens = TokenStream::new(["new", "-ab", "--name", "x"]);
/// assert_eq!(tokens.peek(), Some("new"));
/// assert_eq!(tokens.next().as_deref(), Some("new"));
/// assert_eq!(tokens.next().as_deref(), Some("-a"));
/// assert_eq!(tokens.next().as_deref(), Some("-b"));
/// assert_eq!(tokens.remaining(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TokenStream {
    tokens: Vec<String>,
    position: usize,
}

impl TokenStream {
    /// Builds a stream from raw arguments, expanding grouped short options.
    pub fn new<I, S>(raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tokens = Vec::new();
        for raw_token in raw {
            let raw_token = raw_token.into();
            if is_long_option(&raw_token) || !is_option(&raw_token) {
                tokens.push(raw_token);
            } else {
                tokens.extend(raw_token.chars().skip(1).map(|c| format!("-{c}")));
            }
        }

        Self {
            tokens,
            position: 0,
        }
    }

    /// Returns the next token without advancing.
    pub fn peek(&self) -> Option<&str> {
        self.tokens.get(self.position).map(String::as_str)
    }

    /// Returns `true` while tokens remain.
    pub fn has_next(&self) -> bool {
        self.position < self.tokens.len()
    }

    /// Number of tokens not yet consumed.
    pub fn remaining(&self) -> usize {
        self.tokens.len() - self.position
    }

    /// The full expanded token list, consumed or not.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

impl Iterator for TokenStream {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let token = self.tokens.get(self.position).cloned()?;
        self.position += 1;
        Some(token)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining(), Some(self.remaining()))
    }
}
