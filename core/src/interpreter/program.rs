//! Program builder
//!
//! Turns source lines into an indexed instruction list, a label table, and
//! the arena size the variable store needs. Nothing beyond `lbl` and `alc` is
//! looked at here; malformed instructions surface when they execute.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use super::expressions::allocation_size;
use super::grammar;

/* ===================== Instruction ===================== */

/// One tokenized source line: the opcode followed by its operands
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Instruction(Vec<String>);

impl Instruction {
    pub fn parse(line: &str) -> Self {
        Instruction(grammar::tokenize(line))
    }

    pub fn tokens(&self) -> &[String] {
        &self.0
    }

    pub fn opcode(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(" "))
    }
}

impl<S: Into<String>> FromIterator<S> for Instruction {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Instruction(iter.into_iter().map(Into::into).collect())
    }
}

/* ===================== Program ===================== */

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub instructions: Vec<Instruction>,
    /// Label name -> instruction index. A repeated label keeps its last index.
    pub labels: HashMap<String, usize>,
    /// Sum of every `alc` size in the source, counted once per `alc` line
    pub required_size: usize,
}

impl Program {
    /// Build a program from non-blank, trimmed source lines
    pub fn build<S: AsRef<str>>(lines: &[S]) -> Self {
        let mut program = Program::default();

        for (index, line) in lines.iter().enumerate() {
            let instruction = Instruction::parse(line.as_ref());

            match instruction.tokens() {
                [op, name] if op == "lbl" => {
                    if let Some(previous) = program.labels.insert(name.clone(), index) {
                        tracing::debug!(label = %name, previous, index, "label redefined");
                    }
                }
                [op, _, size] if op == "alc" => {
                    if let Ok(size) = allocation_size(size) {
                        program.required_size = program.required_size.saturating_add(size);
                    }
                }
                _ => {}
            }

            program.instructions.push(instruction);
        }

        tracing::debug!(
            instructions = program.instructions.len(),
            labels = program.labels.len(),
            required_size = program.required_size,
            "program built"
        );

        program
    }

    /// Split raw source text into non-blank, trimmed lines and build
    pub fn from_source(source: &str) -> Self {
        let lines: Vec<&str> = source
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        Self::build(&lines)
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Instruction> {
        self.instructions.get(index)
    }

    /// Instruction index a label points at
    pub fn label(&self, name: &str) -> Option<usize> {
        self.labels.get(name).copied()
    }
}
