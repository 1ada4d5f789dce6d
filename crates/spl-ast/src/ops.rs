//! Binary operators.

use std::fmt;

/// Binary operators in SPL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    // Arithmetic
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,

    // Comparison
    /// `=`
    Equ,
    /// `#`
    Neq,
    /// `<`
    Lst,
    /// `<=`
    Lse,
    /// `>`
    Grt,
    /// `>=`
    Gre,
}

impl BinaryOp {
    /// Whether this operator compares integers and yields a boolean.
    pub const fn is_comparison(self) -> bool {
        self.negated().is_some()
    }

    /// Whether this operator combines integers into an integer.
    pub const fn is_arithmetic(self) -> bool {
        !self.is_comparison()
    }

    /// The comparison that holds exactly when this one does not.
    ///
    /// Returns `None` for arithmetic operators.
    pub const fn negated(self) -> Option<BinaryOp> {
        match self {
            BinaryOp::Equ => Some(BinaryOp::Neq),
            BinaryOp::Neq => Some(BinaryOp::Equ),
            BinaryOp::Lst => Some(BinaryOp::Gre),
            BinaryOp::Lse => Some(BinaryOp::Grt),
            BinaryOp::Grt => Some(BinaryOp::Lse),
            BinaryOp::Gre => Some(BinaryOp::Lst),
            BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div => None,
        }
    }

    /// Source spelling of the operator.
    pub const fn as_str(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Equ => "=",
            BinaryOp::Neq => "#",
            BinaryOp::Lst => "<",
            BinaryOp::Lse => "<=",
            BinaryOp::Grt => ">",
            BinaryOp::Gre => ">=",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
