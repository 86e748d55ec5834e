//! Per-invocation output bundle.

use std::fmt::{self, Write as _};
use std::path::PathBuf;

/// Process environment a command runs in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Env {
    /// Working directory of the invocation.
    pub dir: PathBuf,
}

impl Env {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Environment rooted at the process's current directory.
    pub fn current() -> std::io::Result<Self> {
        Ok(Self::new(std::env::current_dir()?))
    }
}

/// Outcome of a command.
///
/// `Null` means no handler has run yet; plugins may settle a command in
/// `before_execute` by setting any other status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusCode {
    #[default]
    Null,
    Success,
    InvalidCommand,
}

impl StatusCode {
    pub fn code(self) -> i32 {
        match self {
            StatusCode::Null => -1,
            StatusCode::Success => 0,
            StatusCode::InvalidCommand => 1,
        }
    }

    /// Maps a numeric code back; unknown codes become `Null`.
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => StatusCode::Success,
            1 => StatusCode::InvalidCommand,
            _ => StatusCode::Null,
        }
    }

    /// Process exit code; a command nobody settled still exits cleanly.
    pub fn exit_code(self) -> i32 {
        match self {
            StatusCode::Null | StatusCode::Success => 0,
            StatusCode::InvalidCommand => 1,
        }
    }
}

/// Status and buffered output of one command.
#[derive(Debug, Clone)]
pub struct Bundle {
    env: Env,
    status: StatusCode,
    buffer: String,
}

impl Bundle {
    pub fn new(env: Env) -> Self {
        Self {
            env,
            status: StatusCode::Null,
            buffer: String::new(),
        }
    }

    pub fn env(&self) -> &Env {
        &self.env
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn set_status(&mut self, status: StatusCode) {
        self.status = status;
    }

    /// Appends a line of output.
    pub fn push_line(&mut self, line: impl fmt::Display) {
        // Writing into a String cannot fail
        let _ = writeln!(self.buffer, "{line}");
    }

    /// Raw buffer, including trailing whitespace.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut String {
        &mut self.buffer
    }

    /// Text to print, trimmed; empty when there is nothing to show.
    pub fn output(&self) -> &str {
        self.buffer.trim()
    }
}
