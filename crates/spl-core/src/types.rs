//! The SPL type model.
//!
//! Types live in a [`TypeRegistry`] and are referred to by [`TypeId`]. Type
//! equality is identity of the id: every `array [N] of T` type expression in
//! the source registers a fresh array type, so two structurally identical
//! array expressions are still distinct types unless both go through the same
//! declared type name.

use std::fmt;

/// Size in bytes of an `int` or `boolean` value.
pub const PRIMITIVE_BYTE_SIZE: u32 = 4;

/// Primitive type kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Int,
    Bool,
}

impl PrimitiveKind {
    /// Get the name of this primitive type.
    pub const fn name(self) -> &'static str {
        match self {
            PrimitiveKind::Int => "int",
            PrimitiveKind::Bool => "boolean",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Handle to a type stored in a [`TypeRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(u32);

impl TypeId {
    /// The predeclared `int` type.
    pub const INT: TypeId = TypeId(0);
    /// The `boolean` type produced by comparisons.
    pub const BOOL: TypeId = TypeId(1);

    /// Index into the owning registry.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Definition of a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeDef {
    Primitive(PrimitiveKind),
    Array { base: TypeId, size: u32 },
}

/// Owns every type created during one compilation.
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    defs: Vec<TypeDef>,
}

impl TypeRegistry {
    /// Create a registry holding only `int` and `boolean`.
    pub fn with_primitives() -> Self {
        Self {
            defs: vec![
                TypeDef::Primitive(PrimitiveKind::Int),
                TypeDef::Primitive(PrimitiveKind::Bool),
            ],
        }
    }

    /// Register a new array type.
    ///
    /// Always returns a fresh id, even if an identical array type exists.
    /// Returns `None` when a value of the type would not fit in `u32` bytes.
    pub fn register_array(&mut self, base: TypeId, size: u32) -> Option<TypeId> {
        size.checked_mul(self.byte_size(base))?;
        let id = TypeId(self.defs.len() as u32);
        self.defs.push(TypeDef::Array { base, size });
        Some(id)
    }

    /// Look up a type definition.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not created by this registry.
    pub fn get(&self, id: TypeId) -> TypeDef {
        self.defs[id.index()]
    }

    /// Number of registered types, primitives included.
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// Element type and length if `id` is an array type.
    pub fn as_array(&self, id: TypeId) -> Option<(TypeId, u32)> {
        match self.get(id) {
            TypeDef::Array { base, size } => Some((base, size)),
            TypeDef::Primitive(_) => None,
        }
    }

    pub fn is_array(&self, id: TypeId) -> bool {
        self.as_array(id).is_some()
    }

    /// Storage size of a value of this type in bytes.
    ///
    /// Registered types always fit, see [`register_array`](Self::register_array).
    pub fn byte_size(&self, id: TypeId) -> u32 {
        match self.get(id) {
            TypeDef::Primitive(_) => PRIMITIVE_BYTE_SIZE,
            TypeDef::Array { base, size } => size.saturating_mul(self.byte_size(base)),
        }
    }

    /// Render a type for diagnostics and reports.
    pub fn display(&self, id: TypeId) -> TypeDisplay<'_> {
        TypeDisplay { registry: self, id }
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::with_primitives()
    }
}

/// Display adapter returned by [`TypeRegistry::display`].
pub struct TypeDisplay<'a> {
    registry: &'a TypeRegistry,
    id: TypeId,
}

impl fmt::Display for TypeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.registry.get(self.id) {
            TypeDef::Primitive(kind) => write!(f, "{kind}"),
            TypeDef::Array { base, size } => {
                write!(f, "array [{size}] of {}", self.registry.display(base))
            }
        }
    }
}
