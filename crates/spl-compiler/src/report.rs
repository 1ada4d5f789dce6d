//! Human-readable dumps of the symbol tables and the frame layout.
//!
//! Both reports are [`fmt::Display`] adapters over a compiled program; the
//! `format_*` functions render them to strings.

use std::fmt;

use spl_ast::{ProcedureDecl, Program};
use spl_core::{Identifier, TypeRegistry};

use crate::context::CompilationContext;
use crate::table::{Entry, OutgoingArea, ParameterType, ProcedureEntry, ScopeArena, ScopeId};

/// Render every user procedure's scope chain.
pub fn format_tables(ctx: &CompilationContext, program: &Program<'_>) -> String {
    TableReport { ctx, program }.to_string()
}

/// Render the frame layout of every user procedure.
pub fn format_allocation(ctx: &CompilationContext, program: &Program<'_>) -> String {
    AllocationReport { ctx, program }.to_string()
}

/// Placeholder printed for values a later phase has not filled in yet.
const UNSET: &str = "?";

// ============================================================================
// Symbol tables
// ============================================================================

/// Scope chain of each procedure, innermost level first.
pub struct TableReport<'a, 'ast> {
    pub ctx: &'a CompilationContext,
    pub program: &'a Program<'ast>,
}

impl fmt::Display for TableReport<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for decl in self.program.procedures() {
            let Some(scope) = self.ctx.procedure(decl.name).and_then(|p| p.local_table) else {
                continue;
            };
            writeln!(f, "symbol table at end of procedure '{}':", decl.name)?;
            write_scope_chain(f, &self.ctx.scopes, &self.ctx.types, scope)?;
            writeln!(f)?;
        }
        Ok(())
    }
}

fn write_scope_chain(
    f: &mut fmt::Formatter<'_>,
    scopes: &ScopeArena,
    types: &TypeRegistry,
    scope: ScopeId,
) -> fmt::Result {
    let mut level = 0;
    let mut current = Some(scope);
    while let Some(id) = current {
        writeln!(f, "level {level}")?;
        for (name, entry) in scopes.entries(id) {
            write!(f, "{:<10} --> ", name.as_str())?;
            write_entry(f, types, entry)?;
            writeln!(f)?;
        }
        level += 1;
        current = scopes.parent(id);
    }
    Ok(())
}

fn write_entry(f: &mut fmt::Formatter<'_>, types: &TypeRegistry, entry: &Entry) -> fmt::Result {
    match entry {
        Entry::Type(entry) => write!(f, "type: {}", types.display(entry.ty)),
        Entry::Variable(var) => {
            let by_ref = if var.is_reference { "ref " } else { "" };
            write!(f, "var: {by_ref}{}", types.display(var.ty))
        }
        Entry::Procedure(proc) => {
            f.write_str("proc: (")?;
            for (i, param) in proc.parameter_types.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write_parameter(f, types, param)?;
            }
            f.write_str(")")
        }
    }
}

fn write_parameter(
    f: &mut fmt::Formatter<'_>,
    types: &TypeRegistry,
    param: &ParameterType,
) -> fmt::Result {
    if param.is_reference {
        f.write_str("ref ")?;
    }
    write!(f, "{}", types.display(param.ty))
}

// ============================================================================
// Frame layout
// ============================================================================

/// Offsets and area sizes of each procedure.
pub struct AllocationReport<'a, 'ast> {
    pub ctx: &'a CompilationContext,
    pub program: &'a Program<'ast>,
}

impl fmt::Display for AllocationReport<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for decl in self.program.procedures() {
            if let Some(proc) = self.ctx.procedure(decl.name) {
                self.write_procedure(f, decl, proc)?;
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl AllocationReport<'_, '_> {
    fn write_procedure(
        &self,
        f: &mut fmt::Formatter<'_>,
        decl: &ProcedureDecl<'_>,
        proc: &ProcedureEntry,
    ) -> fmt::Result {
        writeln!(f, "Variable allocation for procedure '{}'", decl.name)?;

        for (i, param) in proc.parameter_types.iter().enumerate() {
            writeln!(f, "arg {i}: sp + {}", Unset(param.offset))?;
        }
        let argument_area = Unset(proc.argument_area_size);
        writeln!(f, "size of argument area = {argument_area}")?;

        let offset = |name: Identifier| {
            proc.local_table
                .and_then(|scope| self.ctx.scopes.lookup_local(scope, name))
                .and_then(Entry::as_variable)
                .and_then(|var| var.offset)
        };
        for param in decl.parameters {
            let above_fp = offset(param.name);
            writeln!(f, "param '{}': fp + {}", param.name, Unset(above_fp))?;
        }
        for var in decl.variables {
            let below_fp = offset(var.name).map(i32::unsigned_abs);
            writeln!(f, "var '{}': fp - {}", var.name, Unset(below_fp))?;
        }

        let local_var_area = Unset(proc.local_var_area_size);
        writeln!(f, "size of localvar area = {local_var_area}")?;
        match proc.outgoing_area {
            Some(OutgoingArea::NoCalls) => writeln!(f, "size of outgoing area = -1"),
            Some(OutgoingArea::Bytes(bytes)) => writeln!(f, "size of outgoing area = {bytes}"),
            None => writeln!(f, "size of outgoing area = {UNSET}"),
        }
    }
}

/// Displays the value, or a placeholder when it is not set yet.
struct Unset<T>(Option<T>);

impl<T: fmt::Display> fmt::Display for Unset<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(value) => write!(f, "{value}"),
            None => f.write_str(UNSET),
        }
    }
}
