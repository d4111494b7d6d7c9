//! Type definitions for the interpreter
//!
//! - Runtime values (Val)
//! - Control flow (Comparison, Jump, Control, Halt)

pub mod control;
pub mod values;

pub use control::{Comparison, Control, ExitStatus, Halt, Jump};
pub use values::Val;
