//! # 8255 interpreter
//!
//! Source lines become a [`Program`] (instructions, labels, arena size), a
//! [`VM`] holds the variable store and execution state, and
//! [`run_until_done`] drives the fetch-decode-execute loop.
//!
//! ```no_run
//! use lang8255_core::interpreter::{run_until_done, Program, VM};
//!
//! let program = Program::from_source("5 > x\nadd &x 3 > y\nout &y\n");
//! let mut vm = VM::new(program, std::io::stdin().lock(), std::io::stdout());
//! let halt = run_until_done(&mut vm)?;
//! # Ok::<(), lang8255_core::interpreter::Fatal>(())
//! ```

pub mod debug;
pub mod errors;
pub mod exec_loop;
pub mod expressions;
mod grammar;
pub mod operators;
pub mod program;
pub mod stack;
pub mod statements;
pub mod types;
pub mod vm;

#[cfg(test)]
mod tests;

// Re-export commonly used items
pub use errors::{ExecError, Fatal, StackError};
pub use exec_loop::{run_until_done, step};
pub use program::{Instruction, Program};
pub use stack::{Stack, Variable, STATUS_REGISTER};
pub use types::{Comparison, ExitStatus, Halt, Val};
pub use vm::{Step, VM};
