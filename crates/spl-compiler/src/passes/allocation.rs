//! Frame allocation - assign stack offsets and frame area sizes.
//!
//! Runs in two sweeps over the procedures:
//!
//! 1. Parameters get non-negative offsets from the frame pointer and locals
//!    get negative ones, both in declaration order. This fixes every
//!    procedure's argument area size, which depends only on its signature.
//! 2. Each body is scanned for calls, including calls nested in compound,
//!    `if` and `while` statements. The outgoing area is the largest argument
//!    area among the callees.
//!
//! Every offset and the total frame size must fit in an `i32`; larger frames
//! fail with [`SplError::FrameTooLarge`].
//!
//! Since sweep 2 only reads what sweep 1 wrote, one forward pass each is
//! enough even for mutually recursive procedures.

use log::{debug, trace};
use spl_ast::{ProcedureDecl, Program, Stmt};
use spl_core::{Identifier, Result, Span, SplError};

use crate::codegen::FrameLayout;
use crate::context::CompilationContext;
use crate::emit::machine::REFERENCE_SIZE;
use crate::table::{Entry, OutgoingArea, ProcedureEntry, ScopeArena, ScopeId, VariableEntry};

/// Output of the allocation pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AllocationOutput {
    pub procedures_allocated: usize,
}

/// Pass 3: lay out stack frames.
pub struct AllocationPass<'a> {
    ctx: &'a mut CompilationContext,
}

impl<'a> AllocationPass<'a> {
    pub fn new(ctx: &'a mut CompilationContext) -> Self {
        Self { ctx }
    }

    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn run(mut self, program: &Program<'_>) -> Result<AllocationOutput> {
        let mut output = AllocationOutput::default();

        for decl in program.procedures() {
            self.allocate_variables(decl)?;
            output.procedures_allocated += 1;
        }

        for decl in program.procedures() {
            let scope = self.local_table(decl)?;
            let outgoing = decl
                .body
                .iter()
                .try_fold(OutgoingArea::NoCalls, |area, stmt| {
                    self.outgoing_area(stmt, scope, area)
                })?;
            trace!("{}: outgoing area {:?}", decl.name, outgoing);

            let proc = self.procedure_mut(decl)?;
            let local_var_area_size = proc.local_var_area_size.unwrap_or_default();
            if FrameLayout::new(local_var_area_size, outgoing).is_none() {
                return Err(SplError::FrameTooLarge {
                    procedure: decl.name,
                    span: decl.span,
                });
            }
            proc.outgoing_area = Some(outgoing);
        }

        debug!("allocation: {} procedures", output.procedures_allocated);
        Ok(output)
    }

    fn allocate_variables(&mut self, decl: &ProcedureDecl<'_>) -> Result<()> {
        let scope = self.local_table(decl)?;
        let too_large = |span| SplError::FrameTooLarge {
            procedure: decl.name,
            span,
        };

        // Offsets stay within `i32` so they can be addressed from `fp`.
        let mut arg_offset: i32 = 0;
        let mut slots = Vec::with_capacity(decl.parameters.len());
        for param in decl.parameters {
            let var = variable_mut(&mut self.ctx.scopes, scope, param.name, param.span)?;
            var.offset = Some(arg_offset);
            let size = if var.is_reference {
                REFERENCE_SIZE
            } else {
                self.ctx.types.byte_size(var.ty)
            };
            trace!("{}: param {} at fp + {}", decl.name, param.name, arg_offset);
            slots.push(arg_offset.unsigned_abs());
            arg_offset = i32::try_from(size)
                .ok()
                .and_then(|size| arg_offset.checked_add(size))
                .ok_or_else(|| too_large(param.span))?;
        }

        let mut var_offset: i32 = 0;
        for var_decl in decl.variables {
            let var = variable_mut(&mut self.ctx.scopes, scope, var_decl.name, var_decl.span)?;
            var_offset = i32::try_from(self.ctx.types.byte_size(var.ty))
                .ok()
                .and_then(|size| var_offset.checked_sub(size))
                .ok_or_else(|| too_large(var_decl.span))?;
            var.offset = Some(var_offset);
            trace!(
                "{}: var {} at fp - {}",
                decl.name,
                var_decl.name,
                var_offset.unsigned_abs()
            );
        }

        let proc = self.procedure_mut(decl)?;
        for (param, slot) in proc.parameter_types.iter_mut().zip(slots) {
            param.offset = Some(slot);
        }
        proc.argument_area_size = Some(arg_offset.unsigned_abs());
        proc.local_var_area_size = Some(var_offset.unsigned_abs());

        debug!(
            "{}: argument area {}, localvar area {}",
            decl.name,
            arg_offset,
            var_offset.unsigned_abs()
        );
        Ok(())
    }

    /// Widen `area` by the argument area of every call reachable from `stmt`.
    fn outgoing_area(
        &self,
        stmt: &Stmt<'_>,
        scope: ScopeId,
        area: OutgoingArea,
    ) -> Result<OutgoingArea> {
        Ok(match stmt {
            Stmt::Call(call) => {
                let size = self
                    .ctx
                    .callee(scope, call.procedure)
                    .and_then(|callee| callee.argument_area_size)
                    .ok_or_else(|| {
                        SplError::internal(
                            format!("callee '{}' has no argument area", call.procedure),
                            call.span,
                        )
                    })?;
                area.include(size)
            }
            Stmt::Compound(compound) => compound
                .statements
                .iter()
                .try_fold(area, |area, stmt| self.outgoing_area(stmt, scope, area))?,
            Stmt::If(if_stmt) => {
                let area = self.outgoing_area(&if_stmt.then_part, scope, area)?;
                match &if_stmt.else_part {
                    Some(else_part) => self.outgoing_area(else_part, scope, area)?,
                    None => area,
                }
            }
            Stmt::While(while_stmt) => self.outgoing_area(&while_stmt.body, scope, area)?,
            Stmt::Assign(_) | Stmt::Empty(_) => area,
        })
    }

    // ========================================================================
    // Table access
    // ========================================================================

    fn local_table(&self, decl: &ProcedureDecl<'_>) -> Result<ScopeId> {
        self.ctx
            .procedure(decl.name)
            .and_then(|proc| proc.local_table)
            .ok_or_else(|| {
                SplError::internal(
                    format!("procedure '{}' has no local scope", decl.name),
                    decl.span,
                )
            })
    }

    fn procedure_mut(&mut self, decl: &ProcedureDecl<'_>) -> Result<&mut ProcedureEntry> {
        match self.ctx.scopes.lookup_local_mut(ScopeId::GLOBAL, decl.name) {
            Some(Entry::Procedure(proc)) => Ok(proc),
            _ => Err(SplError::internal(
                format!("procedure '{}' is not in the global scope", decl.name),
                decl.span,
            )),
        }
    }
}

fn variable_mut(
    scopes: &mut ScopeArena,
    scope: ScopeId,
    name: Identifier,
    span: Span,
) -> Result<&mut VariableEntry> {
    match scopes.lookup_local_mut(scope, name) {
        Some(Entry::Variable(var)) => Ok(var),
        _ => Err(SplError::internal(
            format!("'{name}' is not a local variable"),
            span,
        )),
    }
}
