//! Tests for the interpreter
//!
//! Organized by component, leaf-first

mod helpers;
mod program_tests;
mod stack_tests;
