//! Expression, address and condition lowering.

use spl_ast::{ArrayAccess, BinaryOp, Expr, Variable};
use spl_core::{Result, SplError};

use super::ProcedureGenerator;
use crate::emit::machine::{FRAME_POINTER, INDEX_ERROR, ZERO};
use crate::emit::{Label, Mnemonic, Operand, RegisterStack};
use crate::table::Entry;

/// Instruction computing an arithmetic operator.
fn arithmetic_mnemonic(op: BinaryOp) -> Option<Mnemonic> {
    match op {
        BinaryOp::Add => Some(Mnemonic::Add),
        BinaryOp::Sub => Some(Mnemonic::Sub),
        BinaryOp::Mul => Some(Mnemonic::Mul),
        BinaryOp::Div => Some(Mnemonic::Div),
        _ => None,
    }
}

/// Branch taken when a comparison holds.
fn branch_mnemonic(op: BinaryOp) -> Option<Mnemonic> {
    match op {
        BinaryOp::Equ => Some(Mnemonic::Beq),
        BinaryOp::Neq => Some(Mnemonic::Bne),
        BinaryOp::Lst => Some(Mnemonic::Blt),
        BinaryOp::Lse => Some(Mnemonic::Ble),
        BinaryOp::Grt => Some(Mnemonic::Bgt),
        BinaryOp::Gre => Some(Mnemonic::Bge),
        _ => None,
    }
}

impl ProcedureGenerator<'_> {
    /// Push the value of `expr`.
    pub(super) fn gen_expr(
        &mut self,
        expr: &Expr<'_>,
        regs: RegisterStack,
    ) -> Result<RegisterStack> {
        match expr {
            Expr::IntLiteral(lit) => {
                let regs = regs.push(lit.span)?;
                let value = Operand::Imm(i64::from(lit.value));
                self.emit(Mnemonic::Add, &[regs.top().into(), ZERO.into(), value]);
                Ok(regs)
            }
            Expr::Variable(var) => {
                let regs = self.gen_address(&var.variable, regs)?;
                self.emit(
                    Mnemonic::Ldw,
                    &[regs.top().into(), regs.top().into(), Operand::Imm(0)],
                );
                Ok(regs)
            }
            Expr::Binary(binary) => {
                let mnemonic = arithmetic_mnemonic(binary.op).ok_or_else(|| {
                    SplError::internal(
                        format!("comparison '{}' used as a value", binary.op),
                        binary.span,
                    )
                })?;
                let regs = self.gen_expr(&binary.left, regs)?;
                let regs = self.gen_expr(&binary.right, regs)?;
                let (left, right) = (regs.second(), regs.top());
                self.emit(mnemonic, &[left.into(), left.into(), right.into()]);
                Ok(regs.pop())
            }
        }
    }

    /// Push the address of `var`.
    pub(super) fn gen_address(
        &mut self,
        var: &Variable<'_>,
        regs: RegisterStack,
    ) -> Result<RegisterStack> {
        match var {
            Variable::Named(named) => {
                let entry = match self.ctx.scopes.lookup(self.scope, named.name) {
                    Some(Entry::Variable(entry)) => *entry,
                    _ => {
                        return Err(SplError::internal(
                            format!("'{}' is not a variable", named.name),
                            named.span,
                        ));
                    }
                };
                let Some(offset) = entry.offset else {
                    return Err(SplError::internal(
                        format!("'{}' has no frame offset", named.name),
                        named.span,
                    ));
                };

                let regs = regs.push(named.span)?;
                let offset = Operand::Imm(i64::from(offset));
                self.emit(
                    Mnemonic::Add,
                    &[regs.top().into(), FRAME_POINTER.into(), offset],
                );
                if entry.is_reference {
                    // The slot holds the caller's address, not the value.
                    self.emit(
                        Mnemonic::Ldw,
                        &[regs.top().into(), regs.top().into(), Operand::Imm(0)],
                    );
                }
                Ok(regs)
            }
            Variable::ArrayAccess(access) => self.gen_element_address(access, regs),
        }
    }

    /// Push the address of an array element, checking the index first.
    fn gen_element_address(
        &mut self,
        access: &ArrayAccess<'_>,
        regs: RegisterStack,
    ) -> Result<RegisterStack> {
        let (base, length) = self
            .ctx
            .annotations
            .expr_type(access.array.id())
            .and_then(|ty| self.ctx.types.as_array(ty))
            .ok_or_else(|| {
                SplError::internal("indexed variable is not an array", access.span)
            })?;
        let element_size = Operand::Imm(i64::from(self.ctx.types.byte_size(base)));

        let regs = self.gen_address(&access.array, regs)?;
        let regs = self.gen_expr(&access.index, regs)?;

        let bound = regs.push(access.span)?;
        let length = Operand::Imm(i64::from(length));
        let index_error = Label::Named(INDEX_ERROR);
        self.emit(Mnemonic::Add, &[bound.top().into(), ZERO.into(), length]);
        self.emit(
            Mnemonic::Bgeu,
            &[regs.top().into(), bound.top().into(), index_error.into()],
        );
        self.emit(
            Mnemonic::Mul,
            &[regs.top().into(), regs.top().into(), element_size],
        );

        let (address, index) = (regs.second(), regs.top());
        self.emit(
            Mnemonic::Add,
            &[address.into(), address.into(), index.into()],
        );
        Ok(regs.pop())
    }

    /// Branch to `target` when the comparison `expr` does not hold.
    pub(super) fn gen_condition(&mut self, expr: &Expr<'_>, target: Label) -> Result<()> {
        let Expr::Binary(binary) = expr else {
            return Err(SplError::internal(
                "condition is not a comparison",
                expr.span(),
            ));
        };
        let mnemonic = binary
            .op
            .negated()
            .and_then(branch_mnemonic)
            .ok_or_else(|| {
                SplError::internal(
                    format!("operator '{}' is not a comparison", binary.op),
                    binary.span,
                )
            })?;

        let regs = self.gen_expr(&binary.left, RegisterStack::new())?;
        let regs = self.gen_expr(&binary.right, regs)?;
        self.emit(
            mnemonic,
            &[regs.second().into(), regs.top().into(), target.into()],
        );
        debug_assert!(regs.pop().pop().is_empty());
        Ok(())
    }
}
