//! Compiler passes, in the order they run.
//!
//! - [`resolution`]: Pass 1 - build scopes and resolve type expressions
//! - [`checking`]: Pass 2 - check the entry point and type check bodies
//! - [`allocation`]: Pass 3 - assign frame offsets and area sizes
//! - [`generation`]: Pass 4 - emit assembly
//!
//! Each pass returns the first error it finds; nothing is recovered.

pub mod allocation;
pub mod checking;
pub mod generation;
pub mod resolution;

pub use allocation::{AllocationOutput, AllocationPass};
pub use checking::{CheckingOutput, CheckingPass};
pub use generation::GenerationPass;
pub use resolution::{ResolutionOutput, ResolutionPass};
