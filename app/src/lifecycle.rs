//! Explicit three-state lifecycle.

use std::fmt;

use crate::error::{AppError, Result};

/// Lifecycle state of the application.
///
/// Transitions are explicit calls: [`init`](Self::init) moves
/// `Uninitialized → Ready`, [`destroy`](Self::destroy) moves any live state
/// to `Destroyed`. Nothing leaves `Destroyed`.
///
/// # Examples
///
/// ```
/// use hole_app::Lifecycle;
///
/// let mut state = Lifecycle::default();
/// assert!(state.ensure_ready().is_err());
///
/// state.init().unwrap();
/// assert!(state.ensure_ready().is_ok());
///
/// state.destroy().unwrap();
/// assert!(state.init().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
    #[default]
    Uninitialized,
    Ready,
    Destroyed,
}

impl Lifecycle {
    /// Fails unless the state is `Ready`.
    pub fn ensure_ready(self) -> Result<()> {
        self.expect(Lifecycle::Ready)
    }

    /// `Uninitialized → Ready`.
    pub fn init(&mut self) -> Result<()> {
        self.expect(Lifecycle::Uninitialized)?;
        *self = Lifecycle::Ready;
        Ok(())
    }

    /// `Uninitialized | Ready → Destroyed`.
    pub fn destroy(&mut self) -> Result<()> {
        if *self == Lifecycle::Destroyed {
            return Err(AppError::Lifecycle {
                expected: Lifecycle::Ready,
                actual: *self,
            });
        }
        *self = Lifecycle::Destroyed;
        Ok(())
    }

    fn expect(self, expected: Lifecycle) -> Result<()> {
        if self == expected {
            Ok(())
        } else {
            Err(AppError::Lifecycle {
                expected,
                actual: self,
            })
        }
    }
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Lifecycle::Uninitialized => "uninitialized",
            Lifecycle::Ready => "ready",
            Lifecycle::Destroyed => "destroyed",
        };
        f.write_str(name)
    }
}
