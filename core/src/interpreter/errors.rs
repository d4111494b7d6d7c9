//! Interpreter error types
//!
//! Errors come in two severities. Fatal errors stop the run and surface as a
//! [`Fatal`] diagnostic. Everything else is recovered per instruction: the run
//! continues and the status register `slx` is set to 1.

use thiserror::Error;

/* ===================== Variable Store ===================== */

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StackError {
    /// Variable exists but was never written
    #[error("no data in variable '{name}'")]
    NoData { name: String },

    #[error("variable '{name}' is not defined")]
    Undefined { name: String },

    #[error("variable '{name}' is reserved")]
    Reserved { name: String },

    #[error("{size}-byte value does not fit the {capacity}-byte allocation of '{name}'")]
    CapacityExceeded {
        name: String,
        capacity: usize,
        size: usize,
    },

    #[error("cannot allocate {requested} bytes for '{name}': {used} of {total} bytes in use")]
    ArenaExhausted {
        name: String,
        requested: usize,
        used: usize,
        total: usize,
    },
}

impl StackError {
    /// Only reading an unwritten variable is recoverable
    pub fn is_fatal(&self) -> bool {
        !matches!(self, StackError::NoData { .. })
    }
}

/* ===================== Execution ===================== */

#[derive(Debug, Error)]
pub enum ExecError {
    /// Malformed instruction or token
    #[error("syntax error: {0}")]
    Syntax(String),

    #[error("label '{0}' does not exist")]
    UnknownLabel(String),

    #[error(transparent)]
    Stack(#[from] StackError),

    #[error("comparison operand types must match ({left} vs {right})")]
    ComparisonTypes {
        left: &'static str,
        right: &'static str,
    },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Recoverable failure while resolving a value or applying an operation
    #[error("{0}")]
    Runtime(String),

    /// `inp` found no more input
    #[error("end of input")]
    EndOfInput,
}

impl ExecError {
    pub fn runtime(message: impl Into<String>) -> Self {
        ExecError::Runtime(message.into())
    }

    pub fn syntax(message: impl Into<String>) -> Self {
        ExecError::Syntax(message.into())
    }

    pub fn is_fatal(&self) -> bool {
        match self {
            ExecError::Syntax(_)
            | ExecError::UnknownLabel(_)
            | ExecError::ComparisonTypes { .. }
            | ExecError::Io(_) => true,
            ExecError::Stack(err) => err.is_fatal(),
            ExecError::Runtime(_) | ExecError::EndOfInput => false,
        }
    }
}

/// A fatal error, tagged with the instruction that raised it
#[derive(Debug, Error)]
#[error("line {}: `{instruction}`: {error}", .line + 1)]
pub struct Fatal {
    /// 0-based instruction index
    pub line: usize,
    pub instruction: String,
    #[source]
    pub error: ExecError,
}
