//! SPL Compiler
//!
//! Turns a parsed SPL program into assembly for a 32-register load/store
//! machine.
//!
//! ## Architecture
//!
//! - **Pass 1 (Resolution)**: build one scope per procedure, resolve types
//! - **Pass 2 (Checking)**: check `main` and type check every body
//! - **Pass 3 (Allocation)**: lay out stack frames
//! - **Pass 4 (Generation)**: emit assembly
//!
//! ## Modules
//!
//! - [`builtins`]: predeclared runtime-library procedures
//! - [`codegen`]: per-procedure code generation and frame layout
//! - [`context`]: compilation context and node annotations
//! - [`emit`]: assembly model, registers and labels
//! - [`passes`]: the four passes
//! - [`report`]: symbol-table and frame-layout dumps
//! - [`table`]: scopes and symbol entries

pub mod builtins;
pub mod codegen;
pub mod context;
pub mod emit;
pub mod passes;
pub mod report;
pub mod table;

pub use codegen::{FrameLayout, ProcedureGenerator};
pub use context::{Annotations, CompilationContext};
pub use emit::{AsmLine, Assembly, Instruction, Label, Mnemonic, Operand, Register};
pub use passes::{
    AllocationOutput, AllocationPass, CheckingOutput, CheckingPass, GenerationPass,
    ResolutionOutput, ResolutionPass,
};
pub use report::{format_allocation, format_tables};
pub use table::{
    Entry, OutgoingArea, ParameterType, ProcedureEntry, ScopeArena, ScopeId, TypeEntry,
    VariableEntry,
};

// Re-export the error type from core for convenience
pub use spl_core::SplError;
