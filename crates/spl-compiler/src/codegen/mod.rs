//! Per-procedure code generation.
//!
//! [`ProcedureGenerator`] lowers one procedure body to instructions. It reads
//! the tables and annotations but never changes them. Two pieces of state are
//! threaded through the traversal by value instead of living in the
//! generator:
//!
//! - a [`RegisterStack`](crate::emit::RegisterStack) through expressions.
//!   Every expression leaves exactly one more register in use than it found.
//! - a [`LabelCounter`] through statements, so labels stay unique across
//!   procedures.
//!
//! ## Frame layout
//!
//! ```text
//!  higher addresses
//! ┌──────────────────────┐
//! │ incoming arguments   │  fp + 0 ...
//! ├──────────────────────┤ ← fp
//! │ local variables      │  fp - localvar area
//! ├──────────────────────┤
//! │ saved return address │  only when the body makes calls
//! │ saved frame pointer  │
//! ├──────────────────────┤
//! │ outgoing arguments   │  sp + 0 ...
//! └──────────────────────┘ ← sp
//! ```

mod expr;
mod stmt;

use spl_ast::ProcedureDecl;
use spl_core::Result;

use crate::context::CompilationContext;
use crate::emit::machine::{FRAME_POINTER, RETURN_ADDRESS, STACK_POINTER};
use crate::emit::{Assembly, Label, LabelCounter, Mnemonic, Operand};
use crate::table::{OutgoingArea, ScopeId};

/// Sizes and save slots of one procedure's stack frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameLayout {
    /// Bytes the stack pointer moves on entry.
    pub size: u32,
    /// Where the caller's frame pointer is saved, relative to the new `sp`.
    pub old_fp_offset: u32,
    /// Where the return address is saved, relative to the new `fp`. `None`
    /// when the procedure makes no calls and `$31` stays intact.
    pub return_address_offset: Option<i32>,
}

impl FrameLayout {
    /// Lay out a frame, or `None` if its size does not fit in an `i32`.
    pub fn new(local_var_area_size: u32, outgoing: OutgoingArea) -> Option<Self> {
        let size = match outgoing {
            OutgoingArea::Bytes(outgoing) => {
                local_var_area_size.checked_add(outgoing)?.checked_add(8)?
            }
            OutgoingArea::NoCalls => local_var_area_size.checked_add(4)?,
        };
        i32::try_from(size).ok()?;

        // Every offset below is bounded by `size`.
        Some(match outgoing {
            OutgoingArea::Bytes(outgoing) => Self {
                size,
                old_fp_offset: outgoing + 4,
                return_address_offset: Some(-i32::try_from(local_var_area_size + 8).ok()?),
            },
            OutgoingArea::NoCalls => Self {
                size,
                old_fp_offset: 0,
                return_address_offset: None,
            },
        })
    }
}

/// Generates the code of one procedure.
pub struct ProcedureGenerator<'a> {
    ctx: &'a CompilationContext,
    /// Local scope of the procedure being generated.
    scope: ScopeId,
    asm: &'a mut Assembly,
}

impl<'a> ProcedureGenerator<'a> {
    pub fn new(ctx: &'a CompilationContext, scope: ScopeId, asm: &'a mut Assembly) -> Self {
        Self { ctx, scope, asm }
    }

    /// Emit the procedure: export, entry label, prologue, body and epilogue.
    ///
    /// Returns the label counter for the next procedure.
    pub fn generate(
        mut self,
        decl: &ProcedureDecl<'_>,
        frame: FrameLayout,
        mut labels: LabelCounter,
    ) -> Result<LabelCounter> {
        let (sp, fp, ra) = (
            Operand::from(STACK_POINTER),
            Operand::from(FRAME_POINTER),
            Operand::from(RETURN_ADDRESS),
        );
        let frame_size = Operand::Imm(i64::from(frame.size));
        let old_fp_offset = Operand::Imm(i64::from(frame.old_fp_offset));
        let ra_offset = frame
            .return_address_offset
            .map(|offset| Operand::Imm(i64::from(offset)));

        self.asm.directive(format!(".export {}", decl.name));
        self.asm.label(Label::Named(decl.name.as_str()));

        self.emit(Mnemonic::Sub, &[sp, sp, frame_size]);
        self.emit(Mnemonic::Stw, &[fp, sp, old_fp_offset]);
        self.emit(Mnemonic::Add, &[fp, sp, frame_size]);
        if let Some(offset) = ra_offset {
            self.emit(Mnemonic::Stw, &[ra, fp, offset]);
        }

        for stmt in decl.body {
            labels = self.gen_stmt(stmt, labels)?;
        }

        if let Some(offset) = ra_offset {
            self.emit(Mnemonic::Ldw, &[ra, fp, offset]);
        }
        self.emit(Mnemonic::Ldw, &[fp, sp, old_fp_offset]);
        self.emit(Mnemonic::Add, &[sp, sp, frame_size]);
        self.emit(Mnemonic::Jr, &[ra]);

        Ok(labels)
    }

    fn emit(&mut self, mnemonic: Mnemonic, operands: &[Operand]) {
        self.asm.emit(mnemonic, operands);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_without_calls() {
        let frame = FrameLayout::new(20, OutgoingArea::NoCalls).unwrap();
        assert_eq!(
            frame,
            FrameLayout {
                size: 24,
                old_fp_offset: 0,
                return_address_offset: None,
            }
        );
    }

    #[test]
    fn frame_with_calls() {
        let frame = FrameLayout::new(8, OutgoingArea::Bytes(12)).unwrap();
        assert_eq!(frame.size, 28);
        assert_eq!(frame.old_fp_offset, 16);
        assert_eq!(frame.return_address_offset, Some(-16));
    }

    #[test]
    fn frame_with_argumentless_call_still_saves_return_address() {
        let frame = FrameLayout::new(0, OutgoingArea::Bytes(0)).unwrap();
        assert_eq!(frame.size, 8);
        assert_eq!(frame.old_fp_offset, 4);
        assert_eq!(frame.return_address_offset, Some(-8));
    }

    #[test]
    fn frame_beyond_i32_is_refused() {
        let max = i32::MAX as u32;
        assert!(FrameLayout::new(max - 4, OutgoingArea::NoCalls).is_some());
        assert!(FrameLayout::new(max - 3, OutgoingArea::NoCalls).is_none());
        assert!(FrameLayout::new(max - 8, OutgoingArea::Bytes(1)).is_none());
        let everything = OutgoingArea::Bytes(u32::MAX);
        assert!(FrameLayout::new(u32::MAX, everything).is_none());
    }
}
