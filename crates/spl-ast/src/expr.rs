//! Expression and variable nodes.

use spl_core::{Identifier, Span};

use crate::NodeId;
use crate::ops::BinaryOp;

/// An expression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Expr<'ast> {
    Binary(&'ast BinaryExpr<'ast>),
    /// The value stored in a variable.
    Variable(&'ast VariableExpr<'ast>),
    IntLiteral(IntLiteral),
}

impl Expr<'_> {
    pub fn id(&self) -> NodeId {
        match self {
            Expr::Binary(e) => e.id,
            Expr::Variable(e) => e.id,
            Expr::IntLiteral(e) => e.id,
        }
    }

    /// Get the span of this expression.
    pub fn span(&self) -> Span {
        match self {
            Expr::Binary(e) => e.span,
            Expr::Variable(e) => e.span,
            Expr::IntLiteral(e) => e.span,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinaryExpr<'ast> {
    pub op: BinaryOp,
    pub left: Expr<'ast>,
    pub right: Expr<'ast>,
    pub id: NodeId,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariableExpr<'ast> {
    pub variable: Variable<'ast>,
    pub id: NodeId,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntLiteral {
    pub value: i32,
    pub id: NodeId,
    pub span: Span,
}

/// A storage location: a named variable or an element of an array.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Variable<'ast> {
    Named(NamedVariable),
    ArrayAccess(&'ast ArrayAccess<'ast>),
}

impl Variable<'_> {
    pub fn id(&self) -> NodeId {
        match self {
            Variable::Named(v) => v.id,
            Variable::ArrayAccess(v) => v.id,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Variable::Named(v) => v.span,
            Variable::ArrayAccess(v) => v.span,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NamedVariable {
    pub name: Identifier,
    pub id: NodeId,
    pub span: Span,
}

/// `array[index]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrayAccess<'ast> {
    pub array: Variable<'ast>,
    pub index: Expr<'ast>,
    pub id: NodeId,
    pub span: Span,
}
