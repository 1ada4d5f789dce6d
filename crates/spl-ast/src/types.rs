//! Type expression nodes.

use spl_core::{Identifier, Span};

use crate::NodeId;

/// A type as written in the source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TypeExpr<'ast> {
    /// A type name, e.g. `int` or a declared type.
    Named(NamedTypeExpr),
    /// `array [size] of base`
    Array(&'ast ArrayTypeExpr<'ast>),
}

impl TypeExpr<'_> {
    pub fn id(&self) -> NodeId {
        match self {
            TypeExpr::Named(t) => t.id,
            TypeExpr::Array(t) => t.id,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            TypeExpr::Named(t) => t.span,
            TypeExpr::Array(t) => t.span,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NamedTypeExpr {
    pub name: Identifier,
    pub id: NodeId,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrayTypeExpr<'ast> {
    pub base: TypeExpr<'ast>,
    /// Element count, a positive literal in the source.
    pub size: u32,
    pub id: NodeId,
    pub span: Span,
}
