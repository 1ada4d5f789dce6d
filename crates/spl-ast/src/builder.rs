//! Arena-backed construction of syntax trees.
//!
//! [`AstBuilder`] is the only way to create nodes that carry a [`NodeId`], so
//! ids are unique within one builder. The parser front end and the tests both
//! go through it.

use std::cell::Cell;

use bumpalo::Bump;
use spl_core::{Identifier, Span};

use crate::NodeId;
use crate::decl::{GlobalDecl, ParamDecl, ProcedureDecl, Program, TypeDecl, VarDecl};
use crate::expr::{ArrayAccess, BinaryExpr, Expr, IntLiteral, NamedVariable, Variable, VariableExpr};
use crate::ops::BinaryOp;
use crate::stmt::{AssignStmt, CallStmt, CompoundStmt, EmptyStmt, IfStmt, Stmt, WhileStmt};
use crate::types::{ArrayTypeExpr, NamedTypeExpr, TypeExpr};

/// Allocates tree nodes in an arena and hands out node ids.
pub struct AstBuilder<'ast> {
    arena: &'ast Bump,
    next_id: Cell<u32>,
}

impl<'ast> AstBuilder<'ast> {
    pub fn new(arena: &'ast Bump) -> Self {
        Self {
            arena,
            next_id: Cell::new(0),
        }
    }

    /// Number of ids handed out so far.
    pub fn node_count(&self) -> u32 {
        self.next_id.get()
    }

    fn next_id(&self) -> NodeId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        NodeId(id)
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    pub fn program(&self, declarations: &[GlobalDecl<'ast>], span: Span) -> Program<'ast> {
        Program {
            declarations: self.arena.alloc_slice_copy(declarations),
            span,
        }
    }

    /// `type name = ty;`
    pub fn type_decl(&self, name: &str, ty: TypeExpr<'ast>, span: Span) -> GlobalDecl<'ast> {
        GlobalDecl::Type(self.arena.alloc(TypeDecl {
            name: Identifier::new(name),
            ty,
            span,
        }))
    }

    pub fn procedure(
        &self,
        name: &str,
        parameters: &[ParamDecl<'ast>],
        variables: &[VarDecl<'ast>],
        body: &[Stmt<'ast>],
        span: Span,
    ) -> GlobalDecl<'ast> {
        GlobalDecl::Procedure(self.arena.alloc(ProcedureDecl {
            name: Identifier::new(name),
            parameters: self.arena.alloc_slice_copy(parameters),
            variables: self.arena.alloc_slice_copy(variables),
            body: self.arena.alloc_slice_copy(body),
            span,
        }))
    }

    pub fn param(
        &self,
        name: &str,
        ty: TypeExpr<'ast>,
        is_reference: bool,
        span: Span,
    ) -> ParamDecl<'ast> {
        ParamDecl {
            name: Identifier::new(name),
            ty,
            is_reference,
            span,
        }
    }

    pub fn var(&self, name: &str, ty: TypeExpr<'ast>, span: Span) -> VarDecl<'ast> {
        VarDecl {
            name: Identifier::new(name),
            ty,
            span,
        }
    }

    // ========================================================================
    // Type expressions
    // ========================================================================

    pub fn named_type(&self, name: &str, span: Span) -> TypeExpr<'ast> {
        TypeExpr::Named(NamedTypeExpr {
            name: Identifier::new(name),
            id: self.next_id(),
            span,
        })
    }

    /// `array [size] of base`
    pub fn array_type(&self, size: u32, base: TypeExpr<'ast>, span: Span) -> TypeExpr<'ast> {
        TypeExpr::Array(self.arena.alloc(ArrayTypeExpr {
            base,
            size,
            id: self.next_id(),
            span,
        }))
    }

    // ========================================================================
    // Statements
    // ========================================================================

    pub fn assign(&self, target: Variable<'ast>, value: Expr<'ast>, span: Span) -> Stmt<'ast> {
        Stmt::Assign(self.arena.alloc(AssignStmt {
            target,
            value,
            span,
        }))
    }

    pub fn if_stmt(
        &self,
        condition: Expr<'ast>,
        then_part: Stmt<'ast>,
        else_part: Option<Stmt<'ast>>,
        span: Span,
    ) -> Stmt<'ast> {
        Stmt::If(self.arena.alloc(IfStmt {
            condition,
            then_part,
            else_part,
            span,
        }))
    }

    pub fn while_stmt(&self, condition: Expr<'ast>, body: Stmt<'ast>, span: Span) -> Stmt<'ast> {
        Stmt::While(self.arena.alloc(WhileStmt {
            condition,
            body,
            span,
        }))
    }

    pub fn call(&self, procedure: &str, arguments: &[Expr<'ast>], span: Span) -> Stmt<'ast> {
        Stmt::Call(self.arena.alloc(CallStmt {
            procedure: Identifier::new(procedure),
            arguments: self.arena.alloc_slice_copy(arguments),
            span,
        }))
    }

    pub fn compound(&self, statements: &[Stmt<'ast>], span: Span) -> Stmt<'ast> {
        Stmt::Compound(CompoundStmt {
            statements: self.arena.alloc_slice_copy(statements),
            span,
        })
    }

    pub fn empty(&self, span: Span) -> Stmt<'ast> {
        Stmt::Empty(EmptyStmt { span })
    }

    // ========================================================================
    // Expressions and variables
    // ========================================================================

    pub fn binary(
        &self,
        op: BinaryOp,
        left: Expr<'ast>,
        right: Expr<'ast>,
        span: Span,
    ) -> Expr<'ast> {
        Expr::Binary(self.arena.alloc(BinaryExpr {
            op,
            left,
            right,
            id: self.next_id(),
            span,
        }))
    }

    pub fn int(&self, value: i32, span: Span) -> Expr<'ast> {
        Expr::IntLiteral(IntLiteral {
            value,
            id: self.next_id(),
            span,
        })
    }

    /// Read the value stored in `variable`.
    pub fn var_expr(&self, variable: Variable<'ast>, span: Span) -> Expr<'ast> {
        Expr::Variable(self.arena.alloc(VariableExpr {
            variable,
            id: self.next_id(),
            span,
        }))
    }

    /// Shorthand for `var_expr(named_var(name))` at one position.
    pub fn load(&self, name: &str, span: Span) -> Expr<'ast> {
        let variable = self.named_var(name, span);
        self.var_expr(variable, span)
    }

    pub fn named_var(&self, name: &str, span: Span) -> Variable<'ast> {
        Variable::Named(NamedVariable {
            name: Identifier::new(name),
            id: self.next_id(),
            span,
        })
    }

    /// `array[index]`
    pub fn index(&self, array: Variable<'ast>, index: Expr<'ast>, span: Span) -> Variable<'ast> {
        Variable::ArrayAccess(self.arena.alloc(ArrayAccess {
            array,
            index,
            id: self.next_id(),
            span,
        }))
    }
}
