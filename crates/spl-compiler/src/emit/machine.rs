//! Target machine constants.
//!
//! The target is a 32-register load/store machine with byte-addressed,
//! word-aligned memory.

use super::Register;

/// Size of a machine word in bytes.
pub const WORD_SIZE: u32 = 4;

/// A reference parameter slot holds one address.
pub const REFERENCE_SIZE: u32 = WORD_SIZE;

/// Always reads as zero.
pub const ZERO: Register = Register(0);

/// First register free for expression evaluation.
pub const FIRST_SCRATCH: Register = Register(8);

/// Last register free for expression evaluation.
pub const LAST_SCRATCH: Register = Register(23);

pub const FRAME_POINTER: Register = Register(25);

pub const STACK_POINTER: Register = Register(29);

/// Holds the return address after `jal`.
pub const RETURN_ADDRESS: Register = Register(31);

/// Runtime routine reached when an array index is out of bounds.
pub const INDEX_ERROR: &str = "_indexError";
