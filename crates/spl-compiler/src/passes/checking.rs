//! Body checking - type check every procedure body.
//!
//! Runs after [`resolution`](super::resolution). The entry point is checked
//! first, then each procedure body in its own local scope. Every expression
//! and variable node gets its type recorded in the annotations.
//!
//! Types are compared by [`TypeId`], so two array types are only compatible
//! when they come from the same type expression or declared type name.

use log::{debug, trace};
use spl_ast::{
    ArrayAccess, AssignStmt, BinaryExpr, CallStmt, Expr, IfStmt, ProcedureDecl, Program, Stmt,
    Variable, WhileStmt,
};
use spl_core::{Identifier, Result, SplError, TypeId};

use crate::context::CompilationContext;
use crate::table::{Entry, ScopeId};

/// Name of the procedure a program starts in.
pub const MAIN: &str = "main";

/// Output of the checking pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CheckingOutput {
    pub procedures_checked: usize,
}

/// Pass 2: check procedure bodies.
pub struct CheckingPass<'a> {
    ctx: &'a mut CompilationContext,
}

impl<'a> CheckingPass<'a> {
    pub fn new(ctx: &'a mut CompilationContext) -> Self {
        Self { ctx }
    }

    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn run(mut self, program: &Program<'_>) -> Result<CheckingOutput> {
        self.check_main(program)?;

        let mut output = CheckingOutput::default();
        for decl in program.procedures() {
            self.check_procedure(decl)?;
            output.procedures_checked += 1;
        }

        debug!(
            "checking: {} procedures, {} annotated nodes",
            output.procedures_checked,
            self.ctx.annotations.expr_count()
        );
        Ok(output)
    }

    fn check_main(&self, program: &Program<'_>) -> Result<()> {
        let span = program.span;
        let name = Identifier::new(MAIN);
        match self.ctx.scopes.lookup(ScopeId::GLOBAL, name) {
            None => Err(SplError::MainIsMissing { span }),
            Some(Entry::Procedure(main)) if !main.parameter_types.is_empty() => {
                Err(SplError::MainMustNotHaveParameters { span })
            }
            Some(Entry::Procedure(_)) => Ok(()),
            Some(_) => Err(SplError::MainIsNotAProcedure { span }),
        }
    }

    fn check_procedure(&mut self, decl: &ProcedureDecl<'_>) -> Result<()> {
        let scope = self
            .ctx
            .procedure(decl.name)
            .and_then(|proc| proc.local_table)
            .ok_or_else(|| {
                SplError::internal(
                    format!("procedure '{}' has no local scope", decl.name),
                    decl.span,
                )
            })?;

        trace!("checking body of {}", decl.name);
        for stmt in decl.body {
            self.check_stmt(stmt, scope)?;
        }
        Ok(())
    }

    // ========================================================================
    // Statements
    // ========================================================================

    fn check_stmt(&mut self, stmt: &Stmt<'_>, scope: ScopeId) -> Result<()> {
        match stmt {
            Stmt::Assign(assign) => self.check_assign(assign, scope),
            Stmt::If(if_stmt) => self.check_if(if_stmt, scope),
            Stmt::While(while_stmt) => self.check_while(while_stmt, scope),
            Stmt::Call(call) => self.check_call(call, scope),
            Stmt::Compound(compound) => {
                for stmt in compound.statements {
                    self.check_stmt(stmt, scope)?;
                }
                Ok(())
            }
            Stmt::Empty(_) => Ok(()),
        }
    }

    fn check_assign(&mut self, assign: &AssignStmt<'_>, scope: ScopeId) -> Result<()> {
        let target = self.check_variable(&assign.target, scope)?;
        let value = self.check_expr(&assign.value, scope)?;

        if target != TypeId::INT {
            return Err(SplError::AssignmentRequiresIntegers { span: assign.span });
        }
        if target != value {
            return Err(SplError::AssignmentHasDifferentTypes { span: assign.span });
        }
        Ok(())
    }

    fn check_if(&mut self, if_stmt: &IfStmt<'_>, scope: ScopeId) -> Result<()> {
        if self.check_expr(&if_stmt.condition, scope)? != TypeId::BOOL {
            return Err(SplError::IfConditionMustBeBoolean { span: if_stmt.span });
        }
        self.check_stmt(&if_stmt.then_part, scope)?;
        if let Some(else_part) = &if_stmt.else_part {
            self.check_stmt(else_part, scope)?;
        }
        Ok(())
    }

    fn check_while(&mut self, while_stmt: &WhileStmt<'_>, scope: ScopeId) -> Result<()> {
        if self.check_expr(&while_stmt.condition, scope)? != TypeId::BOOL {
            return Err(SplError::WhileConditionMustBeBoolean {
                span: while_stmt.span,
            });
        }
        self.check_stmt(&while_stmt.body, scope)
    }

    fn check_call(&mut self, call: &CallStmt<'_>, scope: ScopeId) -> Result<()> {
        // Procedures are declared one level above the body being checked.
        let outer = self.ctx.scopes.parent(scope).ok_or_else(|| {
            SplError::internal("call checked outside of a procedure scope", call.span)
        })?;

        let parameters = match self.ctx.scopes.lookup(outer, call.procedure) {
            Some(Entry::Procedure(proc)) => proc.parameter_types.clone(),
            Some(_) => {
                return Err(SplError::CallOfNonProcedure {
                    name: call.procedure,
                    span: call.span,
                });
            }
            None => {
                return Err(SplError::UndefinedProcedure {
                    name: call.procedure,
                    span: call.span,
                });
            }
        };

        if parameters.len() < call.arguments.len() {
            return Err(SplError::TooManyArguments {
                procedure: call.procedure,
                span: call.span,
            });
        }
        if parameters.len() > call.arguments.len() {
            return Err(SplError::TooFewArguments {
                procedure: call.procedure,
                span: call.span,
            });
        }

        for (index, (param, arg)) in parameters.iter().zip(call.arguments).enumerate() {
            let ty = self.check_expr(arg, scope)?;
            if param.is_reference && !matches!(arg, Expr::Variable(_)) {
                return Err(SplError::ArgumentMustBeAVariable {
                    procedure: call.procedure,
                    argument: index + 1,
                    span: arg.span(),
                });
            }
            if ty != param.ty {
                return Err(SplError::ArgumentTypeMismatch {
                    procedure: call.procedure,
                    argument: index + 1,
                    span: arg.span(),
                });
            }
        }
        Ok(())
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    fn check_expr(&mut self, expr: &Expr<'_>, scope: ScopeId) -> Result<TypeId> {
        let ty = match expr {
            Expr::Binary(binary) => self.check_binary(binary, scope)?,
            Expr::Variable(var) => self.check_variable(&var.variable, scope)?,
            Expr::IntLiteral(_) => TypeId::INT,
        };
        self.ctx.annotations.record_expr(expr.id(), ty);
        Ok(ty)
    }

    fn check_binary(&mut self, binary: &BinaryExpr<'_>, scope: ScopeId) -> Result<TypeId> {
        let left = self.check_expr(&binary.left, scope)?;
        let right = self.check_expr(&binary.right, scope)?;

        if left != right {
            return Err(SplError::OperatorDifferentTypes { span: binary.span });
        }

        let operands = [(left, binary.left.span()), (right, binary.right.span())];
        if binary.op.is_comparison() {
            if let Some((_, span)) = operands.iter().find(|(ty, _)| *ty != TypeId::INT) {
                return Err(SplError::ComparisonNonInteger { span: *span });
            }
            Ok(TypeId::BOOL)
        } else {
            if let Some((_, span)) = operands.iter().find(|(ty, _)| *ty != TypeId::INT) {
                return Err(SplError::ArithmeticOperatorNonInteger { span: *span });
            }
            Ok(TypeId::INT)
        }
    }

    fn check_variable(&mut self, var: &Variable<'_>, scope: ScopeId) -> Result<TypeId> {
        let ty = match var {
            Variable::Named(named) => match self.ctx.scopes.lookup(scope, named.name) {
                Some(Entry::Variable(entry)) => entry.ty,
                Some(_) => {
                    return Err(SplError::NotAVariable {
                        name: named.name,
                        span: named.span,
                    });
                }
                None => {
                    return Err(SplError::UndefinedVariable {
                        name: named.name,
                        span: named.span,
                    });
                }
            },
            Variable::ArrayAccess(access) => self.check_array_access(access, scope)?,
        };
        self.ctx.annotations.record_expr(var.id(), ty);
        Ok(ty)
    }

    fn check_array_access(&mut self, access: &ArrayAccess<'_>, scope: ScopeId) -> Result<TypeId> {
        let index = self.check_expr(&access.index, scope)?;
        let array = self.check_variable(&access.array, scope)?;

        if index != TypeId::INT {
            return Err(SplError::IndexingWithNonInteger { span: access.span });
        }
        match self.ctx.types.as_array(array) {
            Some((base, _)) => Ok(base),
            None => Err(SplError::IndexingNonArray { span: access.span }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::passes::ResolutionPass;
    use bumpalo::Bump;
    use spl_ast::{AstBuilder, BinaryOp, GlobalDecl};
    use spl_core::{ErrorCode, Span};

    fn at(line: u32, col: u32) -> Span {
        Span::new(line, col)
    }

    /// An integer literal on line 2.
    fn int<'ast>(b: &AstBuilder<'ast>, value: i32, col: u32) -> Expr<'ast> {
        b.int(value, at(2, col))
    }

    fn check<'ast>(decls: &[GlobalDecl<'ast>], b: &AstBuilder<'ast>) -> Result<CompilationContext> {
        let program = b.program(decls, at(1, 1));
        let mut ctx = CompilationContext::new();
        ResolutionPass::new(&mut ctx).run(&program)?;
        CheckingPass::new(&mut ctx).run(&program)?;
        Ok(ctx)
    }

    fn main_with<'ast>(
        b: &AstBuilder<'ast>,
        vars: &[spl_ast::VarDecl<'ast>],
        body: &[Stmt<'ast>],
    ) -> GlobalDecl<'ast> {
        b.procedure("main", &[], vars, body, at(1, 1))
    }

    #[test]
    fn missing_main() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);

        let err = check(&[b.procedure("p", &[], &[], &[], at(2, 1))], &b).unwrap_err();
        assert_eq!(err, SplError::MainIsMissing { span: at(1, 1) });
    }

    #[test]
    fn main_declared_as_type() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);

        let int = b.named_type("int", at(1, 13));
        let decls = [b.type_decl("main", int, at(1, 1))];
        let err = check(&decls, &b).unwrap_err();
        assert_eq!(err.code(), ErrorCode::MainIsNotAProcedure);
    }

    #[test]
    fn main_with_parameters() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);

        let int = b.named_type("int", at(1, 15));
        let params = [b.param("x", int, false, at(1, 11))];
        let decls = [b.procedure("main", &params, &[], &[], at(1, 1))];
        let err = check(&decls, &b).unwrap_err();
        assert_eq!(err.code(), ErrorCode::MainMustNotHaveParameters);
    }

    #[test]
    fn main_checked_before_bodies() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);

        // The body error would fire first if bodies were checked before main.
        let bad = b.assign(b.named_var("nope", at(2, 3)), b.int(1, at(2, 11)), at(2, 3));
        let decls = [b.procedure("p", &[], &[], &[bad], at(2, 1))];
        let err = check(&decls, &b).unwrap_err();
        assert_eq!(err.code(), ErrorCode::MainIsMissing);
    }

    #[test]
    fn annotates_expressions() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);

        // var x: int; x := 1 + 2;
        let vars = [b.var("x", b.named_type("int", at(1, 10)), at(1, 5))];
        let sum = b.binary(BinaryOp::Add, int(&b, 1, 8), int(&b, 2, 12), at(2, 10));
        let target = b.named_var("x", at(2, 3));
        let body = [b.assign(target, sum, at(2, 3))];
        let ctx = check(&[main_with(&b, &vars, &body)], &b).unwrap();

        assert_eq!(ctx.annotations.expr_type(sum.id()), Some(TypeId::INT));
        assert_eq!(ctx.annotations.expr_type(target.id()), Some(TypeId::INT));
    }

    #[test]
    fn if_condition_must_be_boolean() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);

        let stmt = b.if_stmt(b.int(1, at(2, 6)), b.empty(at(2, 14)), None, at(2, 3));
        let err = check(&[main_with(&b, &[], &[stmt])], &b).unwrap_err();
        assert_eq!(err, SplError::IfConditionMustBeBoolean { span: at(2, 3) });
    }

    #[test]
    fn while_condition_must_be_boolean() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);

        let cond = b.binary(BinaryOp::Sub, int(&b, 1, 10), int(&b, 1, 14), at(2, 12));
        let stmt = b.while_stmt(cond, b.empty(at(2, 17)), at(2, 3));
        let err = check(&[main_with(&b, &[], &[stmt])], &b).unwrap_err();
        assert_eq!(err.code(), ErrorCode::WhileConditionMustBeBoolean);
    }

    #[test]
    fn comparison_yields_boolean() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);

        let cond = b.binary(BinaryOp::Lst, int(&b, 1, 7), int(&b, 2, 11), at(2, 9));
        let stmt = b.if_stmt(cond, b.empty(at(2, 14)), Some(b.empty(at(2, 21))), at(2, 3));
        let ctx = check(&[main_with(&b, &[], &[stmt])], &b).unwrap();
        assert_eq!(ctx.annotations.expr_type(cond.id()), Some(TypeId::BOOL));
    }

    #[test]
    fn comparing_booleans_is_rejected_at_operand() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);

        let lt = b.binary(BinaryOp::Lst, int(&b, 1, 8), int(&b, 2, 12), at(2, 10));
        let gt = b.binary(BinaryOp::Grt, int(&b, 3, 17), int(&b, 4, 21), at(2, 19));
        let eq = b.binary(BinaryOp::Equ, lt, gt, at(2, 14));
        let stmt = b.if_stmt(eq, b.empty(at(2, 24)), None, at(2, 3));
        let err = check(&[main_with(&b, &[], &[stmt])], &b).unwrap_err();
        assert_eq!(err, SplError::ComparisonNonInteger { span: at(2, 10) });
    }

    #[test]
    fn arithmetic_on_booleans_is_rejected() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);

        let vars = [b.var("x", b.named_type("int", at(1, 10)), at(1, 5))];
        let lt = b.binary(BinaryOp::Lst, int(&b, 1, 8), int(&b, 2, 12), at(2, 10));
        let ge = b.binary(BinaryOp::Gre, int(&b, 1, 17), int(&b, 2, 21), at(2, 19));
        let sum = b.binary(BinaryOp::Add, lt, ge, at(2, 15));
        let stmt = b.assign(b.named_var("x", at(2, 3)), sum, at(2, 3));
        let err = check(&[main_with(&b, &vars, &[stmt])], &b).unwrap_err();
        assert_eq!(err.code(), ErrorCode::ArithmeticOperatorNonInteger);
        assert_eq!(err.span(), at(2, 10));
    }

    #[test]
    fn operands_must_match() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);

        let vars = [b.var("x", b.named_type("int", at(1, 10)), at(1, 5))];
        let lt = b.binary(BinaryOp::Lst, int(&b, 1, 8), int(&b, 2, 12), at(2, 10));
        let sum = b.binary(BinaryOp::Add, lt, b.int(3, at(2, 17)), at(2, 15));
        let stmt = b.assign(b.named_var("x", at(2, 3)), sum, at(2, 3));
        let err = check(&[main_with(&b, &vars, &[stmt])], &b).unwrap_err();
        assert_eq!(err, SplError::OperatorDifferentTypes { span: at(2, 15) });
    }

    #[test]
    fn assignment_to_array_is_rejected() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);

        let vec_ty = b.array_type(2, b.named_type("int", at(1, 1)), at(1, 1));
        let vars = [b.var("a", vec_ty, at(2, 5))];
        let stmt = b.assign(b.named_var("a", at(3, 3)), b.load("a", at(3, 8)), at(3, 3));
        let err = check(&[main_with(&b, &vars, &[stmt])], &b).unwrap_err();
        assert_eq!(err.code(), ErrorCode::AssignmentRequiresIntegers);
    }

    #[test]
    fn assignment_types_must_match() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);

        let vars = [b.var("x", b.named_type("int", at(1, 10)), at(1, 5))];
        let cond = b.binary(BinaryOp::Neq, int(&b, 1, 8), int(&b, 2, 13), at(2, 10));
        let stmt = b.assign(b.named_var("x", at(2, 3)), cond, at(2, 3));
        let err = check(&[main_with(&b, &vars, &[stmt])], &b).unwrap_err();
        assert_eq!(err.code(), ErrorCode::AssignmentHasDifferentTypes);
        assert_eq!(err.span(), at(2, 3));
    }

    #[test]
    fn structurally_equal_arrays_are_not_interchangeable() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);

        // proc f(ref a: array [3] of int) {}
        // proc main() { var v: array [3] of int; f(v); }
        let f_param = [b.param(
            "a",
            b.array_type(3, b.named_type("int", at(1, 28)), at(1, 14)),
            true,
            at(1, 8),
        )];
        let v_type = b.array_type(3, b.named_type("int", at(2, 36)), at(2, 22));
        let vars = [b.var("v", v_type, at(2, 19))];
        let call = b.call("f", &[b.load("v", at(2, 42))], at(2, 40));
        let decls = [
            b.procedure("f", &f_param, &[], &[], at(1, 1)),
            main_with(&b, &vars, &[call]),
        ];
        let err = check(&decls, &b).unwrap_err();
        assert_eq!(
            err,
            SplError::ArgumentTypeMismatch {
                procedure: Identifier::new("f"),
                argument: 1,
                span: at(2, 42)
            }
        );
    }

    #[test]
    fn declared_array_type_is_shared() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);

        // type vec = array [3] of int;
        // proc f(ref a: vec) {}
        // proc main() { var v: vec; f(v); }
        let f_param = [b.param("a", b.named_type("vec", at(2, 16)), true, at(2, 8))];
        let vars = [b.var("v", b.named_type("vec", at(3, 22)), at(3, 19))];
        let call = b.call("f", &[b.load("v", at(3, 29))], at(3, 27));
        let vec_type = b.array_type(3, b.named_type("int", at(1, 25)), at(1, 12));
        let decls = [
            b.type_decl("vec", vec_type, at(1, 1)),
            b.procedure("f", &f_param, &[], &[], at(2, 1)),
            main_with(&b, &vars, &[call]),
        ];
        assert!(check(&decls, &b).is_ok());
    }

    #[test]
    fn call_arity() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);

        let call = b.call("printi", &[], at(2, 3));
        let err = check(&[main_with(&b, &[], &[call])], &b).unwrap_err();
        assert_eq!(err.code(), ErrorCode::TooFewArguments);

        let call = b.call("exit", &[b.int(1, at(2, 8))], at(2, 3));
        let err = check(&[main_with(&b, &[], &[call])], &b).unwrap_err();
        assert_eq!(
            err,
            SplError::TooManyArguments {
                procedure: Identifier::new("exit"),
                span: at(2, 3)
            }
        );
    }

    #[test]
    fn reference_argument_must_be_variable() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);

        let call = b.call("readi", &[b.int(7, at(2, 9))], at(2, 3));
        let err = check(&[main_with(&b, &[], &[call])], &b).unwrap_err();
        assert_eq!(
            err,
            SplError::ArgumentMustBeAVariable {
                procedure: Identifier::new("readi"),
                argument: 1,
                span: at(2, 9)
            }
        );
    }

    #[test]
    fn reference_argument_accepts_array_element() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);

        let a_type = b.array_type(4, b.named_type("int", at(1, 1)), at(1, 1));
        let vars = [b.var("a", a_type, at(1, 1))];
        let elem = b.index(b.named_var("a", at(2, 9)), b.int(2, at(2, 11)), at(2, 9));
        let call = b.call("readi", &[b.var_expr(elem, at(2, 9))], at(2, 3));
        assert!(check(&[main_with(&b, &vars, &[call])], &b).is_ok());
    }

    #[test]
    fn undefined_and_non_procedures() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);

        let call = b.call("nowhere", &[], at(2, 3));
        let err = check(&[main_with(&b, &[], &[call])], &b).unwrap_err();
        assert_eq!(err.code(), ErrorCode::UndefinedProcedure);

        let call = b.call("int", &[], at(2, 3));
        let err = check(&[main_with(&b, &[], &[call])], &b).unwrap_err();
        assert_eq!(err.code(), ErrorCode::CallOfNonProcedure);
    }

    #[test]
    fn local_variable_does_not_hide_procedure() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);

        let vars = [b.var("printi", b.named_type("int", at(1, 1)), at(1, 1))];
        let call = b.call("printi", &[b.load("printi", at(2, 10))], at(2, 3));
        assert!(check(&[main_with(&b, &vars, &[call])], &b).is_ok());
    }

    #[test]
    fn variable_lookup_errors() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);

        let vars = [b.var("x", b.named_type("int", at(1, 1)), at(1, 1))];
        let stmt = b.assign(b.named_var("x", at(2, 3)), b.load("y", at(2, 8)), at(2, 3));
        let err = check(&[main_with(&b, &vars, &[stmt])], &b).unwrap_err();
        assert_eq!(
            err,
            SplError::UndefinedVariable {
                name: Identifier::new("y"),
                span: at(2, 8)
            }
        );

        let printc = b.load("printc", at(2, 8));
        let stmt = b.assign(b.named_var("x", at(2, 3)), printc, at(2, 3));
        let err = check(&[main_with(&b, &vars, &[stmt])], &b).unwrap_err();
        assert_eq!(err.code(), ErrorCode::NotAVariable);
    }

    #[test]
    fn sibling_locals_are_invisible() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);

        let p_vars = [b.var("secret", b.named_type("int", at(1, 1)), at(1, 1))];
        let main_vars = [b.var("x", b.named_type("int", at(2, 1)), at(2, 1))];
        let secret = b.load("secret", at(3, 8));
        let stmt = b.assign(b.named_var("x", at(3, 3)), secret, at(3, 3));
        let decls = [
            b.procedure("p", &[], &p_vars, &[], at(1, 1)),
            main_with(&b, &main_vars, &[stmt]),
        ];
        let err = check(&decls, &b).unwrap_err();
        assert_eq!(err.code(), ErrorCode::UndefinedVariable);
    }

    #[test]
    fn indexing_errors() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);

        let a_type = b.array_type(4, b.named_type("int", at(1, 1)), at(1, 1));
        let vars = [
            b.var("x", b.named_type("int", at(1, 1)), at(1, 1)),
            b.var("a", a_type, at(1, 1)),
        ];

        let target = b.index(b.named_var("x", at(2, 3)), b.int(0, at(2, 5)), at(2, 3));
        let stmt = b.assign(target, b.int(1, at(2, 11)), at(2, 3));
        let err = check(&[main_with(&b, &vars, &[stmt])], &b).unwrap_err();
        assert_eq!(err, SplError::IndexingNonArray { span: at(2, 3) });

        let (lhs, rhs) = (b.int(0, at(3, 5)), b.int(0, at(3, 9)));
        let bool_index = b.binary(BinaryOp::Equ, lhs, rhs, at(3, 7));
        let target = b.index(b.named_var("a", at(3, 3)), bool_index, at(3, 3));
        let stmt = b.assign(target, b.int(1, at(3, 15)), at(3, 3));
        let err = check(&[main_with(&b, &vars, &[stmt])], &b).unwrap_err();
        assert_eq!(err, SplError::IndexingWithNonInteger { span: at(3, 3) });
    }

    #[test]
    fn nested_statements_are_checked() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);

        let cond = b.binary(BinaryOp::Lse, int(&b, 1, 10), int(&b, 2, 15), at(2, 12));
        let inner = b.call("nowhere", &[], at(3, 5));
        let body = b.compound(&[b.empty(at(2, 20)), inner], at(2, 18));
        let stmt = b.while_stmt(cond, body, at(2, 3));
        let err = check(&[main_with(&b, &[], &[stmt])], &b).unwrap_err();
        assert_eq!(err.span(), at(3, 5));
    }
}
