//! Assembly output.
//!
//! Code is collected as structured [`AsmLine`]s in an [`Assembly`] and only
//! turned into text at the end, so callers can inspect instructions directly.

mod instruction;
mod labels;
pub mod machine;
mod registers;

use std::fmt;

pub use instruction::{Instruction, Label, Mnemonic, Operand, Register};
pub use labels::LabelCounter;
pub use registers::RegisterStack;

/// One line of assembly source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AsmLine {
    /// An assembler directive such as `.export main`.
    Directive(String),
    Label(Label),
    Instruction(Instruction),
    Blank,
}

impl fmt::Display for AsmLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AsmLine::Directive(text) => write!(f, "\t{text}"),
            AsmLine::Label(label) => write!(f, "{label}:"),
            AsmLine::Instruction(ins) => write!(f, "{ins}"),
            AsmLine::Blank => Ok(()),
        }
    }
}

/// A growing assembly program.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assembly {
    lines: Vec<AsmLine>,
}

impl Assembly {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn directive(&mut self, text: impl Into<String>) {
        self.lines.push(AsmLine::Directive(text.into()));
    }

    pub fn label(&mut self, label: Label) {
        self.lines.push(AsmLine::Label(label));
    }

    pub fn blank(&mut self) {
        self.lines.push(AsmLine::Blank);
    }

    /// Append an instruction.
    pub fn emit(&mut self, mnemonic: Mnemonic, operands: &[Operand]) {
        self.lines.push(AsmLine::Instruction(Instruction {
            mnemonic,
            operands: operands.to_vec(),
        }));
    }

    pub fn lines(&self) -> &[AsmLine] {
        &self.lines
    }

    /// The instructions, without directives and labels.
    pub fn instructions(&self) -> impl Iterator<Item = &Instruction> {
        self.lines.iter().filter_map(|line| match line {
            AsmLine::Instruction(ins) => Some(ins),
            _ => None,
        })
    }

    /// Number of lines, blank ones included.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl fmt::Display for Assembly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
