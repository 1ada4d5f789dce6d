//! Symbol tables.
//!
//! Scopes live in a [`ScopeArena`] and point at their enclosing scope by
//! [`ScopeId`]. The global scope is created with the arena; each procedure gets
//! one child scope holding its parameters and local variables.
//!
//! Lookup searches the given scope first and then walks outward. Declaring a
//! name only ever touches the given scope, and the first declaration of a name
//! wins.

use rustc_hash::FxHashMap;
use spl_core::{Identifier, TypeId};

// ============================================================================
// Entries
// ============================================================================

/// What a name in a scope stands for.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    Type(TypeEntry),
    Variable(VariableEntry),
    Procedure(ProcedureEntry),
}

impl Entry {
    pub fn as_variable(&self) -> Option<&VariableEntry> {
        match self {
            Entry::Variable(var) => Some(var),
            _ => None,
        }
    }

    pub fn as_procedure(&self) -> Option<&ProcedureEntry> {
        match self {
            Entry::Procedure(proc) => Some(proc),
            _ => None,
        }
    }
}

/// A declared type name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeEntry {
    pub ty: TypeId,
}

/// A parameter or local variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariableEntry {
    pub ty: TypeId,
    /// Only ever true for reference parameters.
    pub is_reference: bool,
    /// Offset from the frame pointer, set by frame allocation.
    pub offset: Option<i32>,
}

impl VariableEntry {
    pub fn new(ty: TypeId, is_reference: bool) -> Self {
        Self {
            ty,
            is_reference,
            offset: None,
        }
    }
}

/// One slot of a procedure signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterType {
    pub ty: TypeId,
    pub is_reference: bool,
    /// Offset of the argument slot within the callee's argument area.
    pub offset: Option<u32>,
}

impl ParameterType {
    pub fn new(ty: TypeId, is_reference: bool) -> Self {
        Self {
            ty,
            is_reference,
            offset: None,
        }
    }
}

/// Size of the area a procedure reserves for arguments of the calls it makes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutgoingArea {
    /// The body makes no calls, so no area and no saved return address.
    NoCalls,
    Bytes(u32),
}

impl OutgoingArea {
    /// Widen the area so it can hold an argument area of `bytes`.
    pub fn include(self, bytes: u32) -> Self {
        match self {
            OutgoingArea::NoCalls => OutgoingArea::Bytes(bytes),
            OutgoingArea::Bytes(current) => OutgoingArea::Bytes(current.max(bytes)),
        }
    }

    pub fn has_calls(self) -> bool {
        matches!(self, OutgoingArea::Bytes(_))
    }

    /// Size in bytes, zero when there are no calls.
    pub fn bytes(self) -> u32 {
        match self {
            OutgoingArea::NoCalls => 0,
            OutgoingArea::Bytes(bytes) => bytes,
        }
    }
}

/// A procedure, user-declared or predeclared.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcedureEntry {
    /// Scope of parameters and locals. `None` for predeclared procedures.
    pub local_table: Option<ScopeId>,
    pub parameter_types: Vec<ParameterType>,
    // Filled in by frame allocation (or by hand for predeclared procedures).
    pub argument_area_size: Option<u32>,
    pub local_var_area_size: Option<u32>,
    pub outgoing_area: Option<OutgoingArea>,
}

impl ProcedureEntry {
    pub fn new(local_table: ScopeId, parameter_types: Vec<ParameterType>) -> Self {
        Self {
            local_table: Some(local_table),
            parameter_types,
            argument_area_size: None,
            local_var_area_size: None,
            outgoing_area: None,
        }
    }

    /// Entry for a predeclared procedure whose layout is known up front.
    pub fn predeclared(parameter_types: Vec<ParameterType>, argument_area_size: u32) -> Self {
        Self {
            local_table: None,
            parameter_types,
            argument_area_size: Some(argument_area_size),
            local_var_area_size: None,
            outgoing_area: None,
        }
    }
}

// ============================================================================
// Scopes
// ============================================================================

/// Handle to a scope in a [`ScopeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(u32);

impl ScopeId {
    /// The program-level scope.
    pub const GLOBAL: ScopeId = ScopeId(0);

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Returned by [`ScopeArena::enter`] when the name is taken in that scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlreadyDeclared;

#[derive(Debug, Clone, Default)]
struct Scope {
    parent: Option<ScopeId>,
    entries: FxHashMap<Identifier, Entry>,
}

/// Owns every scope of one compilation.
#[derive(Debug, Clone)]
pub struct ScopeArena {
    scopes: Vec<Scope>,
}

impl ScopeArena {
    /// Create an arena holding an empty global scope.
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope::default()],
        }
    }

    /// Create a scope nested in `parent`.
    pub fn new_scope(&mut self, parent: ScopeId) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope {
            parent: Some(parent),
            entries: FxHashMap::default(),
        });
        id
    }

    /// Enclosing scope, `None` for the global scope.
    pub fn parent(&self, scope: ScopeId) -> Option<ScopeId> {
        self.scopes[scope.index()].parent
    }

    /// Number of scopes, the global one included.
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Declare `name` in `scope`.
    ///
    /// Leaves the scope untouched if the name is already declared there.
    pub fn enter(
        &mut self,
        scope: ScopeId,
        name: Identifier,
        entry: Entry,
    ) -> Result<(), AlreadyDeclared> {
        let entries = &mut self.scopes[scope.index()].entries;
        if entries.contains_key(&name) {
            return Err(AlreadyDeclared);
        }
        entries.insert(name, entry);
        Ok(())
    }

    /// Find `name` in `scope` or any enclosing scope.
    pub fn lookup(&self, scope: ScopeId, name: Identifier) -> Option<&Entry> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let scope = &self.scopes[id.index()];
            if let Some(entry) = scope.entries.get(&name) {
                return Some(entry);
            }
            current = scope.parent;
        }
        None
    }

    /// Find `name` in `scope` only.
    pub fn lookup_local(&self, scope: ScopeId, name: Identifier) -> Option<&Entry> {
        self.scopes[scope.index()].entries.get(&name)
    }

    pub fn lookup_local_mut(&mut self, scope: ScopeId, name: Identifier) -> Option<&mut Entry> {
        self.scopes[scope.index()].entries.get_mut(&name)
    }

    /// Entries declared directly in `scope`, sorted by name.
    pub fn entries(&self, scope: ScopeId) -> Vec<(Identifier, &Entry)> {
        let mut entries: Vec<_> = self.scopes[scope.index()]
            .entries
            .iter()
            .map(|(name, entry)| (*name, entry))
            .collect();
        entries.sort_by(|a, b| a.0.as_str().cmp(b.0.as_str()));
        entries
    }
}

impl Default for ScopeArena {
    fn default() -> Self {
        Self::new()
    }
}
