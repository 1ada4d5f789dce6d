//! Declaration nodes.

use spl_core::{Identifier, Span};

use crate::stmt::Stmt;
use crate::types::TypeExpr;

/// Root of the tree: the global declarations in source order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Program<'ast> {
    pub declarations: &'ast [GlobalDecl<'ast>],
    pub span: Span,
}

impl<'ast> Program<'ast> {
    /// Iterate over the procedure declarations in source order.
    pub fn procedures(self) -> impl Iterator<Item = &'ast ProcedureDecl<'ast>> + 'ast {
        self.declarations.iter().filter_map(|decl| match decl {
            GlobalDecl::Procedure(proc) => Some(*proc),
            GlobalDecl::Type(_) => None,
        })
    }
}

/// A declaration at program level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GlobalDecl<'ast> {
    Type(&'ast TypeDecl<'ast>),
    Procedure(&'ast ProcedureDecl<'ast>),
}

impl GlobalDecl<'_> {
    pub fn name(&self) -> Identifier {
        match self {
            GlobalDecl::Type(decl) => decl.name,
            GlobalDecl::Procedure(decl) => decl.name,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            GlobalDecl::Type(decl) => decl.span,
            GlobalDecl::Procedure(decl) => decl.span,
        }
    }
}

/// `type name = type_expr;`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TypeDecl<'ast> {
    pub name: Identifier,
    pub ty: TypeExpr<'ast>,
    pub span: Span,
}

/// `proc name(params) { vars body }`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcedureDecl<'ast> {
    pub name: Identifier,
    pub parameters: &'ast [ParamDecl<'ast>],
    pub variables: &'ast [VarDecl<'ast>],
    pub body: &'ast [Stmt<'ast>],
    pub span: Span,
}

/// A formal parameter, optionally passed by reference (`ref name: type`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDecl<'ast> {
    pub name: Identifier,
    pub ty: TypeExpr<'ast>,
    pub is_reference: bool,
    pub span: Span,
}

/// A local variable declaration (`var name: type;`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VarDecl<'ast> {
    pub name: Identifier,
    pub ty: TypeExpr<'ast>,
    pub span: Span,
}
