//! Predeclared names of the global scope.
//!
//! The runtime library provides a fixed set of I/O and graphics procedures.
//! Their frames are never allocated by the compiler, so argument slots and
//! argument-area sizes are given here directly.

use spl_core::{Identifier, TypeId};

use crate::table::{Entry, ParameterType, ProcedureEntry, ScopeArena, ScopeId, TypeEntry};

/// A runtime-library procedure.
#[derive(Debug, Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub parameters: &'static [BuiltinParam],
    pub argument_area_size: u32,
}

/// An `int` parameter of a builtin, by value or by reference.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinParam {
    pub is_reference: bool,
    pub offset: u32,
}

const fn value(offset: u32) -> BuiltinParam {
    BuiltinParam {
        is_reference: false,
        offset,
    }
}

const fn reference(offset: u32) -> BuiltinParam {
    BuiltinParam {
        is_reference: true,
        offset,
    }
}

/// Every predeclared procedure, in declaration order.
pub const BUILTINS: &[Builtin] = &[
    Builtin {
        name: "printi",
        parameters: &[value(0)],
        argument_area_size: 4,
    },
    Builtin {
        name: "printc",
        parameters: &[value(0)],
        argument_area_size: 4,
    },
    Builtin {
        name: "readi",
        parameters: &[reference(0)],
        argument_area_size: 4,
    },
    Builtin {
        name: "readc",
        parameters: &[reference(0)],
        argument_area_size: 4,
    },
    Builtin {
        name: "exit",
        parameters: &[],
        argument_area_size: 0,
    },
    Builtin {
        name: "time",
        parameters: &[reference(0)],
        argument_area_size: 4,
    },
    Builtin {
        name: "clearAll",
        parameters: &[value(0)],
        argument_area_size: 4,
    },
    Builtin {
        name: "setPixel",
        parameters: &[value(0), value(4), value(8)],
        argument_area_size: 12,
    },
    Builtin {
        name: "drawLine",
        parameters: &[value(0), value(4), value(8), value(12), value(16)],
        argument_area_size: 20,
    },
    Builtin {
        name: "drawCircle",
        parameters: &[value(0), value(4), value(8), value(12)],
        argument_area_size: 16,
    },
];

impl Builtin {
    fn entry(&self) -> ProcedureEntry {
        let parameter_types = self
            .parameters
            .iter()
            .map(|param| ParameterType {
                ty: TypeId::INT,
                is_reference: param.is_reference,
                offset: Some(param.offset),
            })
            .collect();
        ProcedureEntry::predeclared(parameter_types, self.argument_area_size)
    }
}

/// Seed the global scope with `int` and the runtime-library procedures.
pub fn declare_builtins(scopes: &mut ScopeArena) {
    let int = Entry::Type(TypeEntry { ty: TypeId::INT });
    let procedures = BUILTINS
        .iter()
        .map(|builtin| (builtin.name, Entry::Procedure(builtin.entry())));

    for (name, entry) in std::iter::once(("int", int)).chain(procedures) {
        // Names are distinct, so nothing can clash in a fresh global scope.
        let _ = scopes.enter(ScopeId::GLOBAL, Identifier::new(name), entry);
    }
}
