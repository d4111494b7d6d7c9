//! Virtual Machine state
//!
//! The VM holds all execution state:
//! - program: instructions and labels (read-only)
//! - stack: the variable store
//! - current_line / comparison: program counter and comparison flag
//! - input / output: where `inp` reads and `out` writes

use std::io::{BufRead, Write};

use super::program::Program;
use super::stack::Stack;
use super::types::Comparison;
use crate::config::InterpreterConfig;

pub struct VM<R, W> {
    pub program: Program,

    pub stack: Stack,

    /// Index of the next instruction to execute
    pub current_line: usize,

    /// Flag set by `cmp`, persists until the next `cmp`
    pub comparison: Comparison,

    pub settings: InterpreterConfig,

    pub(crate) input: R,
    pub(crate) output: W,
}

impl<R: BufRead, W: Write> VM<R, W> {
    /// Create a VM for `program`, sizing the store from its `alc` directives
    pub fn new(program: Program, input: R, output: W) -> Self {
        let stack = Stack::new(program.required_size);
        VM {
            program,
            stack,
            current_line: 0,
            comparison: Comparison::None,
            settings: InterpreterConfig::default(),
            input,
            output,
        }
    }

    pub fn with_settings(mut self, settings: InterpreterConfig) -> Self {
        self.settings = settings;
        self
    }

    pub fn output(&self) -> &W {
        &self.output
    }
}

/* ===================== Step Result ===================== */

/// Result of executing one step
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Continue to next step
    Continue,
    /// Execution finished
    Done(super::types::Halt),
}
