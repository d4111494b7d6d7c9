//! Test helpers for interpreter tests
//!
//! Build programs from source and run them against in-memory input/output

use std::io::Cursor;

use crate::config::InterpreterConfig;
use crate::interpreter::{
    run_until_done, Fatal, Halt, Program, Val, STATUS_REGISTER, VM,
};

pub type TestVM = VM<Cursor<Vec<u8>>, Vec<u8>>;

/// A finished run: the result plus the VM for inspecting state
pub struct Run {
    pub result: Result<Halt, Fatal>,
    pub vm: TestVM,
}

impl Run {
    pub fn output(&self) -> String {
        String::from_utf8_lossy(self.vm.output()).into_owned()
    }

    pub fn var(&self, name: &str) -> Option<Val> {
        self.vm.stack.read(name).ok().cloned()
    }

    pub fn status(&self) -> Option<Val> {
        self.var(STATUS_REGISTER)
    }

    pub fn halt(&self) -> &Halt {
        self.result.as_ref().expect("program should not fail")
    }

    pub fn fatal(&self) -> &Fatal {
        self.result.as_ref().expect_err("program should fail")
    }
}

/// Build a program and round-trip it through JSON
pub fn build_program(source: &str) -> Program {
    let program = Program::from_source(source);
    let json = serde_json::to_string(&program).expect("Program serialization failed");
    let restored: Program = serde_json::from_str(&json).expect("Program deserialization failed");
    assert_eq!(restored, program);
    restored
}

/// Build a VM over `input`, ready for `run_until_done()` or `step()`
pub fn build_vm(source: &str, input: &str, settings: InterpreterConfig) -> TestVM {
    VM::new(
        build_program(source),
        Cursor::new(input.as_bytes().to_vec()),
        Vec::new(),
    )
    .with_settings(settings)
}

pub fn run(source: &str) -> Run {
    run_with(source, "", InterpreterConfig::default())
}

pub fn run_with_input(source: &str, input: &str) -> Run {
    run_with(source, input, InterpreterConfig::default())
}

pub fn run_ordered(source: &str) -> Run {
    run_with(
        source,
        "",
        InterpreterConfig {
            ordered_comparisons: true,
            ..InterpreterConfig::default()
        },
    )
}

pub fn run_with(source: &str, input: &str, settings: InterpreterConfig) -> Run {
    let mut vm = build_vm(source, input, settings);
    let result = run_until_done(&mut vm);
    Run { result, vm }
}
