//! SPL compiler pipeline.
//!
//! Runs the compiler phases over a parsed program in a fixed order and stops
//! after the phase selected in [`CompileOptions`]:
//!
//! ```text
//! Program ─► Tables ─► Semant ─► Vars ─► Codegen ─► Assembly
//!            (scopes)  (types)   (frames)
//! ```
//!
//! The first error in any phase aborts the whole compilation and is returned
//! unchanged.
//!
//! # Example
//!
//! ```
//! use bumpalo::Bump;
//! use spl::ast::{AstBuilder, BinaryOp};
//! use spl::{CompileOptions, Span, compile};
//!
//! let arena = Bump::new();
//! let b = AstBuilder::new(&arena);
//! let s = Span::new(1, 1);
//!
//! // proc main() { printi(1 + 2); }
//! let sum = b.binary(BinaryOp::Add, b.int(1, s), b.int(2, s), s);
//! let main = b.procedure("main", &[], &[], &[b.call("printi", &[sum], s)], s);
//! let program = b.program(&[main], s);
//!
//! let compilation = compile(&program, CompileOptions::default()).unwrap();
//! let asm = compilation.assembly().unwrap().to_string();
//! assert!(asm.contains("\tjal\tprinti\n"));
//! ```

use log::debug;

pub use spl_ast as ast;
pub use spl_compiler::{
    Assembly, CompilationContext, Entry, OutgoingArea, ProcedureEntry, ScopeId, VariableEntry,
    format_allocation, format_tables,
};
pub use spl_core::{ErrorCode, Identifier, Result, Span, SplError, TypeId};

use spl_ast::Program;
use spl_compiler::{AllocationPass, CheckingPass, GenerationPass, ResolutionPass};

/// A compiler phase. Phases run in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Phase {
    /// Build symbol tables and resolve types.
    Tables,
    /// Check procedure bodies.
    Semant,
    /// Allocate stack frames.
    Vars,
    /// Generate assembly.
    #[default]
    Codegen,
}

/// Pipeline configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CompileOptions {
    /// Last phase to run.
    pub stop_after: Phase,
}

impl CompileOptions {
    /// Run all phases up to and including `phase`.
    pub fn stop_after(phase: Phase) -> Self {
        Self { stop_after: phase }
    }
}

/// Everything a successful compilation produced.
#[derive(Debug)]
pub struct Compilation {
    ctx: CompilationContext,
    assembly: Option<Assembly>,
    completed: Phase,
}

impl Compilation {
    /// Types, scopes and annotations built by the phases that ran.
    pub fn context(&self) -> &CompilationContext {
        &self.ctx
    }

    /// Generated code, present only when code generation ran.
    pub fn assembly(&self) -> Option<&Assembly> {
        self.assembly.as_ref()
    }

    /// Last phase that ran.
    pub fn completed(&self) -> Phase {
        self.completed
    }

    /// Look up a user or predeclared procedure.
    pub fn procedure(&self, name: &str) -> Option<&ProcedureEntry> {
        self.ctx.procedure(Identifier::new(name))
    }
}

/// Compile `program`, running phases up to `options.stop_after`.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn compile(program: &Program<'_>, options: CompileOptions) -> Result<Compilation> {
    let mut ctx = CompilationContext::new();
    let stop_after = options.stop_after;

    ResolutionPass::new(&mut ctx).run(program)?;
    let mut completed = Phase::Tables;

    if stop_after >= Phase::Semant {
        CheckingPass::new(&mut ctx).run(program)?;
        completed = Phase::Semant;
    }
    if stop_after >= Phase::Vars {
        AllocationPass::new(&mut ctx).run(program)?;
        completed = Phase::Vars;
    }
    let assembly = if stop_after >= Phase::Codegen {
        completed = Phase::Codegen;
        Some(GenerationPass::new(&ctx).run(program)?)
    } else {
        None
    };

    debug!("compiled through {completed:?}");
    Ok(Compilation {
        ctx,
        assembly,
        completed,
    })
}
