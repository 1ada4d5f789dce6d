//! Compilation context shared by the phases.
//!
//! The syntax tree is immutable, so everything the phases learn about it is
//! kept here: the types, the scopes and the node annotations.

use rustc_hash::FxHashMap;
use spl_ast::NodeId;
use spl_core::{Identifier, TypeId, TypeRegistry};

use crate::builtins::declare_builtins;
use crate::table::{Entry, ProcedureEntry, ScopeArena, ScopeId};

/// Resolved types of tree nodes, keyed by [`NodeId`].
#[derive(Debug, Clone, Default)]
pub struct Annotations {
    type_exprs: FxHashMap<NodeId, TypeId>,
    exprs: FxHashMap<NodeId, TypeId>,
}

impl Annotations {
    /// Record the meaning of a type expression.
    pub fn record_type_expr(&mut self, node: NodeId, ty: TypeId) {
        self.type_exprs.insert(node, ty);
    }

    pub fn type_expr(&self, node: NodeId) -> Option<TypeId> {
        self.type_exprs.get(&node).copied()
    }

    /// Record the type of an expression or variable.
    pub fn record_expr(&mut self, node: NodeId, ty: TypeId) {
        self.exprs.insert(node, ty);
    }

    pub fn expr_type(&self, node: NodeId) -> Option<TypeId> {
        self.exprs.get(&node).copied()
    }

    /// Number of annotated type expressions.
    pub fn type_expr_count(&self) -> usize {
        self.type_exprs.len()
    }

    /// Number of annotated expressions and variables.
    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }
}

/// State built up over one compilation.
#[derive(Debug, Clone)]
pub struct CompilationContext {
    pub types: TypeRegistry,
    pub scopes: ScopeArena,
    pub annotations: Annotations,
}

impl CompilationContext {
    /// Create a context whose global scope holds the predeclared names.
    pub fn new() -> Self {
        let mut scopes = ScopeArena::new();
        declare_builtins(&mut scopes);
        Self {
            types: TypeRegistry::with_primitives(),
            scopes,
            annotations: Annotations::default(),
        }
    }

    /// Look up a procedure declared at program level.
    pub fn procedure(&self, name: Identifier) -> Option<&ProcedureEntry> {
        self.scopes
            .lookup_local(ScopeId::GLOBAL, name)
            .and_then(Entry::as_procedure)
    }

    /// Look up the procedure `name` called from a body whose scope is `scope`.
    ///
    /// Procedures live one level above the body, so a local of the same name
    /// does not hide them.
    pub fn callee(&self, scope: ScopeId, name: Identifier) -> Option<&ProcedureEntry> {
        let outer = self.scopes.parent(scope)?;
        self.scopes
            .lookup(outer, name)
            .and_then(Entry::as_procedure)
    }
}

impl Default for CompilationContext {
    fn default() -> Self {
        Self::new()
    }
}
