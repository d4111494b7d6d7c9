//! Core execution loop
//!
//! `step` fetches the instruction at the program counter, executes it, then
//! records the outcome in the status register and moves the counter.
//!
//! ## Function Organization
//! 1. run_until_done() - Top-level driver (calls step repeatedly)
//! 2. step() - One fetch-decode-execute cycle

use std::io::{BufRead, Write};

use tracing::{debug, trace};

use super::debug::pause;
use super::errors::{ExecError, Fatal};
use super::stack::STATUS_REGISTER;
use super::statements::execute;
use super::types::{Control, Halt, Val};
use super::vm::{Step, VM};

/* ===================== Public API ===================== */

/// Run the VM until the program halts
///
/// Returns how the program ended, or the fatal error that stopped it.
pub fn run_until_done<R: BufRead, W: Write>(vm: &mut VM<R, W>) -> Result<Halt, Fatal> {
    let halt = loop {
        match step(vm)? {
            Step::Continue => continue,
            Step::Done(halt) => break halt,
        }
    };

    vm.output.flush().map_err(|error| Fatal {
        line: vm.current_line,
        instruction: String::new(),
        error: error.into(),
    })?;

    Ok(halt)
}

/// Execute one instruction
///
/// Status register: 0 after success, 1 after a recovered failure. Taken
/// jumps, fatal errors and `ext` leave it untouched.
pub fn step<R: BufRead, W: Write>(vm: &mut VM<R, W>) -> Result<Step, Fatal> {
    let line = vm.current_line;

    // Clone the instruction so handlers can borrow the VM mutably
    let Some(instruction) = vm.program.get(line).cloned() else {
        debug!(line, "program completed");
        return Ok(Step::Done(Halt::Completed));
    };

    let fatal = |error: ExecError| Fatal {
        line,
        instruction: instruction.to_string(),
        error,
    };

    if vm.settings.debug {
        pause(vm).map_err(|error| fatal(error.into()))?;
    }

    trace!(line, %instruction, "execute");

    let (status, next) = match execute(vm, &instruction) {
        Ok(Control::Next) => (0, line + 1),
        Ok(Control::Jump(target)) => {
            trace!(line, target, "jump");
            vm.current_line = target;
            return Ok(Step::Continue);
        }
        Ok(Control::Exit(status)) => {
            debug!(line, ?status, "program exited");
            return Ok(Step::Done(Halt::Exited(status)));
        }
        Err(error) if !error.is_fatal() => {
            debug!(line, %instruction, %error, "instruction failed");
            (1, line + 1)
        }
        Err(error) => return Err(fatal(error)),
    };

    vm.stack
        .write_reserved(STATUS_REGISTER, Val::Int(status))
        .map_err(|error| fatal(error.into()))?;
    vm.current_line = next;

    Ok(Step::Continue)
}
