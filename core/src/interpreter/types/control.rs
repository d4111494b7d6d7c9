//! Control flow types: the comparison flag, jumps, and how a run ends

use serde::{Deserialize, Serialize};

/* ===================== Comparison Flag ===================== */

/// Result of the last `cmp`, consumed by conditional jumps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparison {
    None,
    Equal,
    NotEqual,
    Greater,
    Less,
    GreaterOrEqual,
    LessOrEqual,
}

/* ===================== Jumps ===================== */

/// Conditional jump opcodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Jump {
    Eq,
    Ne,
    Gt,
    Lt,
    Ge,
    Le,
}

impl Jump {
    pub fn from_opcode(opcode: &str) -> Option<Self> {
        match opcode {
            "jeq" => Some(Jump::Eq),
            "jne" => Some(Jump::Ne),
            "jgt" => Some(Jump::Gt),
            "jlt" => Some(Jump::Lt),
            "jge" => Some(Jump::Ge),
            "jle" => Some(Jump::Le),
            _ => None,
        }
    }

    /// The flag value this jump is tied to
    pub fn relation(self) -> Comparison {
        match self {
            Jump::Eq => Comparison::Equal,
            Jump::Ne => Comparison::NotEqual,
            Jump::Gt => Comparison::Greater,
            Jump::Lt => Comparison::Less,
            Jump::Ge => Comparison::GreaterOrEqual,
            Jump::Le => Comparison::LessOrEqual,
        }
    }

    /// Whether the jump is taken for the current flag
    ///
    /// Without ordered comparisons a jump fires only on an exact flag match.
    /// With them, jumps test the relation (`jge` fires on greater or equal).
    pub fn fires(self, flag: Comparison, ordered: bool) -> bool {
        if !ordered {
            return flag == self.relation();
        }

        let (gt, lt, eq) = (
            flag == Comparison::Greater,
            flag == Comparison::Less,
            flag == Comparison::Equal,
        );
        match self {
            Jump::Eq => eq,
            Jump::Ne => gt || lt || flag == Comparison::NotEqual,
            Jump::Gt => gt,
            Jump::Lt => lt,
            Jump::Ge => gt || eq || flag == Comparison::GreaterOrEqual,
            Jump::Le => lt || eq || flag == Comparison::LessOrEqual,
        }
    }
}

/* ===================== Instruction Outcome ===================== */

/// What the loop should do after an instruction succeeds
#[derive(Debug, Clone, PartialEq)]
pub enum Control {
    /// Fall through to the next line
    Next,
    /// Continue at this instruction index
    Jump(usize),
    /// Stop the program (`ext`)
    Exit(ExitStatus),
}

/* ===================== Halting ===================== */

/// Value handed to `ext`
#[derive(Debug, Clone, PartialEq)]
pub enum ExitStatus {
    /// Integer status code
    Code(i64),
    /// Any other value: reported on stderr, status 1
    Message(String),
}

impl ExitStatus {
    pub fn code(&self) -> i32 {
        match self {
            ExitStatus::Code(code) => *code as i32,
            ExitStatus::Message(_) => 1,
        }
    }
}

/// How a run finished
#[derive(Debug, Clone, PartialEq)]
pub enum Halt {
    /// Program counter ran past the last instruction
    Completed,
    /// `ext` executed
    Exited(ExitStatus),
}

impl Halt {
    pub fn exit_code(&self) -> i32 {
        match self {
            Halt::Completed => 0,
            Halt::Exited(status) => status.code(),
        }
    }
}
