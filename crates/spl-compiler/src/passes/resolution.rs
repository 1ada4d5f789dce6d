//! Scope resolution - build symbol tables and resolve type expressions.
//!
//! Declarations are processed top-down in source order. Type declarations may
//! only refer to types declared before them. Procedure signatures are entered
//! without looking at other procedures, so procedures may appear in any order.
//!
//! ## Responsibilities
//!
//! - Enter type declarations into the global scope
//! - Create one local scope per procedure holding its parameters and variables
//! - Record the [`TypeId`] of every type expression in the annotations
//! - Reject redeclarations and array parameters passed by value
//!
//! Array sizes are taken as the parser produced them. A size of zero yields
//! a type with no elements, every access to which fails the bounds check.

use log::{debug, trace};
use spl_ast::{GlobalDecl, ProcedureDecl, Program, TypeDecl, TypeExpr};
use spl_core::{Result, SplError, TypeId};

use crate::context::CompilationContext;
use crate::table::{Entry, ParameterType, ProcedureEntry, ScopeId, TypeEntry, VariableEntry};

/// Output of the resolution pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ResolutionOutput {
    /// Number of user type declarations entered.
    pub types_declared: usize,
    /// Number of user procedures entered.
    pub procedures_declared: usize,
}

/// Pass 1: build the scopes and resolve type expressions.
pub struct ResolutionPass<'a> {
    ctx: &'a mut CompilationContext,
    output: ResolutionOutput,
}

impl<'a> ResolutionPass<'a> {
    pub fn new(ctx: &'a mut CompilationContext) -> Self {
        Self {
            ctx,
            output: ResolutionOutput::default(),
        }
    }

    /// Run the pass over a whole program.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn run(mut self, program: &Program<'_>) -> Result<ResolutionOutput> {
        for decl in program.declarations {
            match decl {
                GlobalDecl::Type(decl) => self.visit_type_decl(decl)?,
                GlobalDecl::Procedure(decl) => self.visit_procedure(decl)?,
            }
        }

        debug!(
            "resolution: {} types, {} procedures, {} scopes, {} type expressions",
            self.output.types_declared,
            self.output.procedures_declared,
            self.ctx.scopes.len(),
            self.ctx.annotations.type_expr_count()
        );
        Ok(self.output)
    }

    fn visit_type_decl(&mut self, decl: &TypeDecl<'_>) -> Result<()> {
        let ty = self.resolve_type(&decl.ty, ScopeId::GLOBAL)?;

        self.ctx
            .scopes
            .enter(ScopeId::GLOBAL, decl.name, Entry::Type(TypeEntry { ty }))
            .map_err(|_| SplError::RedeclarationAsType {
                name: decl.name,
                span: decl.span,
            })?;

        trace!("type {} = {}", decl.name, self.ctx.types.display(ty));
        self.output.types_declared += 1;
        Ok(())
    }

    fn visit_procedure(&mut self, decl: &ProcedureDecl<'_>) -> Result<()> {
        let local = self.ctx.scopes.new_scope(ScopeId::GLOBAL);
        let mut parameter_types = Vec::with_capacity(decl.parameters.len());

        for param in decl.parameters {
            // Parameter types are part of the signature, so they are resolved
            // in the enclosing scope.
            let ty = self.resolve_type(&param.ty, ScopeId::GLOBAL)?;
            if self.ctx.types.is_array(ty) && !param.is_reference {
                return Err(SplError::MustBeAReferenceParameter {
                    name: param.name,
                    span: param.span,
                });
            }

            let entry = Entry::Variable(VariableEntry::new(ty, param.is_reference));
            self.ctx
                .scopes
                .enter(local, param.name, entry)
                .map_err(|_| SplError::RedeclarationAsParameter {
                    name: param.name,
                    span: param.span,
                })?;

            trace!("{}: param {}", decl.name, param.name);
            parameter_types.push(ParameterType::new(ty, param.is_reference));
        }

        for var in decl.variables {
            let ty = self.resolve_type(&var.ty, local)?;
            let entry = Entry::Variable(VariableEntry::new(ty, false));
            self.ctx
                .scopes
                .enter(local, var.name, entry)
                .map_err(|_| SplError::RedeclarationAsVariable {
                    name: var.name,
                    span: var.span,
                })?;

            trace!("{}: var {}", decl.name, var.name);
        }

        self.ctx
            .scopes
            .enter(
                ScopeId::GLOBAL,
                decl.name,
                Entry::Procedure(ProcedureEntry::new(local, parameter_types)),
            )
            .map_err(|_| SplError::RedeclarationAsProcedure {
                name: decl.name,
                span: decl.span,
            })?;

        self.output.procedures_declared += 1;
        Ok(())
    }

    /// Resolve a type expression as seen from `scope` and annotate it.
    fn resolve_type(&mut self, expr: &TypeExpr<'_>, scope: ScopeId) -> Result<TypeId> {
        let ty = match expr {
            TypeExpr::Named(named) => match self.ctx.scopes.lookup(scope, named.name) {
                Some(Entry::Type(entry)) => entry.ty,
                Some(_) => {
                    return Err(SplError::NotAType {
                        name: named.name,
                        span: named.span,
                    });
                }
                None => {
                    return Err(SplError::UndefinedType {
                        name: named.name,
                        span: named.span,
                    });
                }
            },
            TypeExpr::Array(array) => {
                let base = self.resolve_type(&array.base, scope)?;
                if array.size == 0 {
                    debug!("{}: array type without elements", array.span);
                }
                self.ctx
                    .types
                    .register_array(base, array.size)
                    .ok_or(SplError::TypeTooLarge { span: array.span })?
            }
        };

        self.ctx.annotations.record_type_expr(expr.id(), ty);
        Ok(ty)
    }
}
