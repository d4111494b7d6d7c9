pub mod cli;
pub mod config;
pub mod interpreter;

// Re-export main types
pub use crate::config::Config;
pub use crate::interpreter::{run_until_done, Fatal, Halt, Program, Val, VM};
