//! Instructions and their operands.

use std::fmt;

/// A machine register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Register(pub u8);

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0)
    }
}

/// A jump or branch target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    /// Compiler-generated `L<n>`.
    Generated(u32),
    /// A procedure or runtime routine.
    Named(&'static str),
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Generated(n) => write!(f, "L{n}"),
            Label::Named(name) => f.write_str(name),
        }
    }
}

/// Instruction mnemonics used by the code generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mnemonic {
    Add,
    Sub,
    Mul,
    Div,
    Ldw,
    Stw,
    Beq,
    Bne,
    Blt,
    Ble,
    Bgt,
    Bge,
    Bgeu,
    J,
    Jal,
    Jr,
}

impl Mnemonic {
    pub const fn as_str(self) -> &'static str {
        match self {
            Mnemonic::Add => "add",
            Mnemonic::Sub => "sub",
            Mnemonic::Mul => "mul",
            Mnemonic::Div => "div",
            Mnemonic::Ldw => "ldw",
            Mnemonic::Stw => "stw",
            Mnemonic::Beq => "beq",
            Mnemonic::Bne => "bne",
            Mnemonic::Blt => "blt",
            Mnemonic::Ble => "ble",
            Mnemonic::Bgt => "bgt",
            Mnemonic::Bge => "bge",
            Mnemonic::Bgeu => "bgeu",
            Mnemonic::J => "j",
            Mnemonic::Jal => "jal",
            Mnemonic::Jr => "jr",
        }
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An instruction operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Reg(Register),
    Imm(i64),
    Label(Label),
}

impl From<Register> for Operand {
    fn from(reg: Register) -> Self {
        Operand::Reg(reg)
    }
}

impl From<Label> for Operand {
    fn from(label: Label) -> Self {
        Operand::Label(label)
    }
}

impl From<i64> for Operand {
    fn from(value: i64) -> Self {
        Operand::Imm(value)
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Reg(reg) => write!(f, "{reg}"),
            Operand::Imm(value) => write!(f, "{value}"),
            Operand::Label(label) => write!(f, "{label}"),
        }
    }
}

/// One machine instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub mnemonic: Mnemonic,
    pub operands: Vec<Operand>,
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\t{}", self.mnemonic)?;
        for (i, operand) in self.operands.iter().enumerate() {
            let sep = if i == 0 { '\t' } else { ',' };
            write!(f, "{sep}{operand}")?;
        }
        Ok(())
    }
}
