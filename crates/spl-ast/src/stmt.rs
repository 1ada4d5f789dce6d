//! Statement nodes.

use spl_core::{Identifier, Span};

use crate::expr::{Expr, Variable};

/// A statement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Stmt<'ast> {
    /// `target := value;`
    Assign(&'ast AssignStmt<'ast>),
    /// `if (cond) stmt [else stmt]`
    If(&'ast IfStmt<'ast>),
    /// `while (cond) stmt`
    While(&'ast WhileStmt<'ast>),
    /// `name(args);`
    Call(&'ast CallStmt<'ast>),
    /// `{ stmts }`
    Compound(CompoundStmt<'ast>),
    /// `;`
    Empty(EmptyStmt),
}

impl Stmt<'_> {
    /// Get the span of this statement.
    pub fn span(&self) -> Span {
        match self {
            Stmt::Assign(s) => s.span,
            Stmt::If(s) => s.span,
            Stmt::While(s) => s.span,
            Stmt::Call(s) => s.span,
            Stmt::Compound(s) => s.span,
            Stmt::Empty(s) => s.span,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssignStmt<'ast> {
    pub target: Variable<'ast>,
    pub value: Expr<'ast>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IfStmt<'ast> {
    pub condition: Expr<'ast>,
    pub then_part: Stmt<'ast>,
    /// Optional else branch
    pub else_part: Option<Stmt<'ast>>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WhileStmt<'ast> {
    pub condition: Expr<'ast>,
    pub body: Stmt<'ast>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CallStmt<'ast> {
    pub procedure: Identifier,
    pub arguments: &'ast [Expr<'ast>],
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompoundStmt<'ast> {
    pub statements: &'ast [Stmt<'ast>],
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmptyStmt {
    pub span: Span,
}
