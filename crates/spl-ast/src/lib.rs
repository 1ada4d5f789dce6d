//! SPL syntax tree.
//!
//! The tree is produced by the parser (not part of this workspace), allocated
//! in a [`bumpalo::Bump`] arena, and never changed afterwards. Compiler phases
//! record their results in side tables keyed by [`NodeId`] instead of writing
//! into the nodes.
//!
//! # Example
//!
//! ```
//! use bumpalo::Bump;
//! use spl_ast::{AstBuilder, GlobalDecl};
//! use spl_core::Span;
//!
//! let arena = Bump::new();
//! let b = AstBuilder::new(&arena);
//! let s = Span::new(1, 1);
//!
//! // proc main() { }
//! let main = b.procedure("main", &[], &[], &[], s);
//! let program = b.program(&[main], s);
//! assert!(matches!(program.declarations[0], GlobalDecl::Procedure(_)));
//! ```

mod builder;
mod decl;
mod expr;
mod ops;
mod stmt;
mod types;

pub use builder::AstBuilder;
pub use decl::{GlobalDecl, ParamDecl, ProcedureDecl, Program, TypeDecl, VarDecl};
pub use expr::{ArrayAccess, BinaryExpr, Expr, IntLiteral, NamedVariable, Variable, VariableExpr};
pub use ops::BinaryOp;
pub use stmt::{AssignStmt, CallStmt, CompoundStmt, EmptyStmt, IfStmt, Stmt, WhileStmt};
pub use types::{ArrayTypeExpr, NamedTypeExpr, TypeExpr};

/// Identity of a tree node that carries a semantic annotation.
///
/// Type expressions, expressions and variables each get a unique id from the
/// [`AstBuilder`] that created them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);
