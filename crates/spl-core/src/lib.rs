//! Core types shared by every SPL compiler phase.
//!
//! - [`Span`]: source positions attached to every tree node
//! - [`Identifier`]: interned names used as symbol-table keys
//! - [`TypeRegistry`]: the nominal type model (`int`, `boolean`, arrays)
//! - [`SplError`]: the fail-fast error taxonomy with stable numeric codes

mod error;
mod ident;
mod span;
mod types;

pub use error::{ErrorCode, SplError};
pub use ident::Identifier;
pub use span::Span;
pub use types::{PrimitiveKind, TypeDef, TypeId, TypeRegistry};

/// Result alias used by all compiler phases.
pub type Result<T> = std::result::Result<T, SplError>;
