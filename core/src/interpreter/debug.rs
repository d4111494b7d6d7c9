//! Step debugger view
//!
//! In debug mode the VM clears the screen before every instruction, shows the
//! instruction about to run, every variable, and the lines before it, then
//! waits for ENTER. It never changes what the program does.

use std::fmt::Write as _;
use std::io::{self, BufRead, Write};

use super::program::Program;
use super::stack::Stack;
use super::statements::CLEAR_SCREEN;
use super::vm::VM;

const GREEN: &str = "\x1b[32m";
const GRAY: &str = "\x1b[90m";
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

/// Render the debug screen for the instruction at `line`
pub fn render(program: &Program, stack: &Stack, line: usize) -> String {
    let mut screen = String::from(CLEAR_SCREEN);
    let current = program.get(line).map(ToString::to_string).unwrap_or_default();
    let _ = writeln!(screen, "{GREEN}[Execute] {current}{RESET}");

    for (name, var) in stack.iter() {
        let value = var
            .value
            .as_ref()
            .map_or_else(|| "None".to_string(), ToString::to_string);
        let _ = writeln!(screen, "{GRAY}\t[{name}] {value}{RESET}");
    }

    let _ = writeln!(screen, "\n{GRAY}[Stepped]");
    for instruction in program.instructions.iter().take(line) {
        let _ = writeln!(screen, "\t{instruction}");
    }

    let _ = write!(screen, "\n{YELLOW}Press [ENTER] to step.{RESET}");
    screen
}

/// Show the debug screen and block until a line (or EOF) arrives on input
pub fn pause<R: BufRead, W: Write>(vm: &mut VM<R, W>) -> io::Result<()> {
    let screen = render(&vm.program, &vm.stack, vm.current_line);
    vm.output.write_all(screen.as_bytes())?;
    vm.output.flush()?;

    let mut discard = String::new();
    vm.input.read_line(&mut discard)?;
    Ok(())
}
