//! Generated label numbering.

use super::Label;

/// Source of fresh `L<n>` labels.
///
/// Passed by value through statement generation and handed from one
/// procedure to the next, so labels are unique across a whole program.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LabelCounter(u32);

impl LabelCounter {
    pub const fn new() -> Self {
        Self(0)
    }

    /// Take the next label.
    pub fn next(self) -> (Label, Self) {
        (Label::Generated(self.0), Self(self.0 + 1))
    }

    /// Number of labels handed out so far.
    pub fn issued(self) -> u32 {
        self.0
    }
}
