//! The scratch register stack.
//!
//! Expression code keeps intermediate values in consecutive registers from
//! [`FIRST_SCRATCH`] up to [`LAST_SCRATCH`]. A [`RegisterStack`] is a plain
//! value passed into and returned from each generation step, so every step's
//! effect on the stack is visible in its signature.

use spl_core::{Result, Span, SplError};

use super::Register;
use super::machine::{FIRST_SCRATCH, LAST_SCRATCH};

/// Which scratch registers are in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterStack {
    /// Number of the topmost register in use, one below the pool when empty.
    top: u8,
}

impl RegisterStack {
    /// An empty stack.
    pub const fn new() -> Self {
        Self {
            top: FIRST_SCRATCH.0 - 1,
        }
    }

    pub fn is_empty(self) -> bool {
        self.top < FIRST_SCRATCH.0
    }

    /// Claim the next register.
    ///
    /// Fails with a register overflow at `span` once the pool is exhausted.
    pub fn push(self, span: Span) -> Result<Self> {
        if self.top >= LAST_SCRATCH.0 {
            return Err(SplError::RegisterOverflow { span });
        }
        Ok(Self { top: self.top + 1 })
    }

    /// Release the topmost register.
    pub fn pop(self) -> Self {
        debug_assert!(!self.is_empty(), "pop from empty register stack");
        Self { top: self.top - 1 }
    }

    /// The topmost register in use.
    pub fn top(self) -> Register {
        Register(self.top)
    }

    /// The register just below the top.
    pub fn second(self) -> Register {
        Register(self.top - 1)
    }
}

impl Default for RegisterStack {
    fn default() -> Self {
        Self::new()
    }
}
