//! Interned identifiers.

use std::fmt;

use ustr::Ustr;

/// An interned SPL name.
///
/// Two identifiers with equal spelling share one interned string, so
/// comparison and hashing are pointer-cheap. Used as the key of every
/// symbol table.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier(Ustr);

impl Identifier {
    /// Intern a name.
    pub fn new(name: &str) -> Self {
        Self(Ustr::from(name))
    }

    /// The spelling of this identifier.
    pub fn as_str(&self) -> &'static str {
        self.0.as_str()
    }
}

impl From<&str> for Identifier {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl fmt::Debug for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.as_str())
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
