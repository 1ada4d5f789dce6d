//! Statement lowering.

use log::trace;
use spl_ast::{AssignStmt, CallStmt, Expr, IfStmt, Stmt, WhileStmt};
use spl_core::{Result, SplError};

use super::ProcedureGenerator;
use crate::emit::machine::STACK_POINTER;
use crate::emit::{Label, LabelCounter, Mnemonic, Operand, RegisterStack};

impl ProcedureGenerator<'_> {
    pub(super) fn gen_stmt(
        &mut self,
        stmt: &Stmt<'_>,
        labels: LabelCounter,
    ) -> Result<LabelCounter> {
        match stmt {
            Stmt::Assign(assign) => {
                self.gen_assign(assign)?;
                Ok(labels)
            }
            Stmt::If(if_stmt) => self.gen_if(if_stmt, labels),
            Stmt::While(while_stmt) => self.gen_while(while_stmt, labels),
            Stmt::Call(call) => {
                self.gen_call(call)?;
                Ok(labels)
            }
            Stmt::Compound(compound) => compound
                .statements
                .iter()
                .try_fold(labels, |labels, stmt| self.gen_stmt(stmt, labels)),
            Stmt::Empty(_) => Ok(labels),
        }
    }

    fn gen_assign(&mut self, assign: &AssignStmt<'_>) -> Result<()> {
        let regs = self.gen_address(&assign.target, RegisterStack::new())?;
        let regs = self.gen_expr(&assign.value, regs)?;
        self.emit(
            Mnemonic::Stw,
            &[regs.top().into(), regs.second().into(), Operand::Imm(0)],
        );
        debug_assert!(regs.pop().pop().is_empty());
        Ok(())
    }

    fn gen_if(&mut self, if_stmt: &IfStmt<'_>, labels: LabelCounter) -> Result<LabelCounter> {
        let (else_label, labels) = labels.next();
        let (end_label, labels) = match if_stmt.else_part {
            Some(_) => labels.next(),
            None => (else_label, labels),
        };
        trace!("if: else {else_label}, end {end_label}");

        self.gen_condition(&if_stmt.condition, else_label)?;
        let labels = self.gen_stmt(&if_stmt.then_part, labels)?;

        let labels = match &if_stmt.else_part {
            Some(else_part) => {
                self.emit(Mnemonic::J, &[end_label.into()]);
                self.asm.label(else_label);
                self.gen_stmt(else_part, labels)?
            }
            None => labels,
        };
        self.asm.label(end_label);
        Ok(labels)
    }

    fn gen_while(
        &mut self,
        while_stmt: &WhileStmt<'_>,
        labels: LabelCounter,
    ) -> Result<LabelCounter> {
        let (cond_label, labels) = labels.next();
        let (end_label, labels) = labels.next();
        trace!("while: cond {cond_label}, end {end_label}");

        self.asm.label(cond_label);
        self.gen_condition(&while_stmt.condition, end_label)?;
        let labels = self.gen_stmt(&while_stmt.body, labels)?;
        self.emit(Mnemonic::J, &[cond_label.into()]);
        self.asm.label(end_label);
        Ok(labels)
    }

    /// Store each argument into its slot of the outgoing area, then call.
    fn gen_call(&mut self, call: &CallStmt<'_>) -> Result<()> {
        let ctx = self.ctx;
        let Some(callee) = ctx.callee(self.scope, call.procedure) else {
            return Err(SplError::internal(
                format!("'{}' is not a procedure", call.procedure),
                call.span,
            ));
        };

        for (param, arg) in callee.parameter_types.iter().zip(call.arguments) {
            let regs = if param.is_reference {
                match arg {
                    Expr::Variable(var) => self.gen_address(&var.variable, RegisterStack::new())?,
                    _ => {
                        return Err(SplError::internal(
                            "reference argument is not a variable",
                            arg.span(),
                        ));
                    }
                }
            } else {
                self.gen_expr(arg, RegisterStack::new())?
            };

            let slot = param.offset.ok_or_else(|| {
                SplError::internal(
                    format!("parameter slot of '{}' is not allocated", call.procedure),
                    arg.span(),
                )
            })?;
            let slot = Operand::Imm(i64::from(slot));
            self.emit(
                Mnemonic::Stw,
                &[regs.top().into(), STACK_POINTER.into(), slot],
            );
            debug_assert!(regs.pop().is_empty());
        }

        let target = Label::Named(call.procedure.as_str());
        self.emit(Mnemonic::Jal, &[target.into()]);
        Ok(())
    }
}
