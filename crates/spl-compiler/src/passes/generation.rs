//! Code generation - lower the checked, allocated program to assembly.
//!
//! Emits the module prolog and then one block per user procedure in source
//! order. The label counter is handed from each procedure to the next.

use log::debug;
use spl_ast::{ProcedureDecl, Program};
use spl_core::{Result, SplError};

use crate::builtins::BUILTINS;
use crate::codegen::{FrameLayout, ProcedureGenerator};
use crate::context::CompilationContext;
use crate::emit::machine::INDEX_ERROR;
use crate::emit::{Assembly, LabelCounter};
use crate::table::ScopeId;

/// Pass 4: generate assembly.
pub struct GenerationPass<'a> {
    ctx: &'a CompilationContext,
}

impl<'a> GenerationPass<'a> {
    pub fn new(ctx: &'a CompilationContext) -> Self {
        Self { ctx }
    }

    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn run(self, program: &Program<'_>) -> Result<Assembly> {
        let mut asm = Assembly::new();
        emit_prolog(&mut asm);

        let mut labels = LabelCounter::new();
        for decl in program.procedures() {
            let (scope, frame) = self.frame(decl)?;
            debug!("{}: frame size {}", decl.name, frame.size);

            asm.blank();
            labels = ProcedureGenerator::new(self.ctx, scope, &mut asm)
                .generate(decl, frame, labels)?;
        }

        debug!(
            "generation: {} lines, {} labels",
            asm.len(),
            labels.issued()
        );
        Ok(asm)
    }

    fn frame(&self, decl: &ProcedureDecl<'_>) -> Result<(ScopeId, FrameLayout)> {
        let missing = |what: &str| {
            SplError::internal(
                format!("procedure '{}' has no {what}", decl.name),
                decl.span,
            )
        };

        let proc = self
            .ctx
            .procedure(decl.name)
            .ok_or_else(|| missing("table entry"))?;
        let scope = proc.local_table.ok_or_else(|| missing("local scope"))?;
        let local_var_area_size = proc
            .local_var_area_size
            .ok_or_else(|| missing("localvar area"))?;
        let outgoing = proc.outgoing_area.ok_or_else(|| missing("outgoing area"))?;

        let frame = FrameLayout::new(local_var_area_size, outgoing)
            .ok_or_else(|| missing("addressable frame"))?;
        Ok((scope, frame))
    }
}

/// Imports of the runtime library followed by the code section header.
fn emit_prolog(asm: &mut Assembly) {
    for builtin in BUILTINS {
        asm.directive(format!(".import {}", builtin.name));
    }
    asm.directive(format!(".import {INDEX_ERROR}"));
    asm.blank();
    asm.directive(".code");
    asm.directive(".align 4");
}
