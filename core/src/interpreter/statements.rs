//! Instruction handlers
//!
//! `execute` matches an instruction on its opcode and token shape and runs
//! the matching handler. A shape that matches nothing is a syntax error.

use std::io::{BufRead, Write};

use super::errors::ExecError;
use super::expressions::{allocation_size, resolve_value, variable_name};
use super::operators::{self, ArithOp, CastType};
use super::program::Instruction;
use super::types::{Control, ExitStatus, Jump, Val};
use super::vm::VM;

/// Control sequence that clears the terminal and homes the cursor
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/* ===================== Dispatch ===================== */

pub fn execute<R: BufRead, W: Write>(
    vm: &mut VM<R, W>,
    instruction: &Instruction,
) -> Result<Control, ExecError> {
    let tokens: Vec<&str> = instruction.tokens().iter().map(String::as_str).collect();

    match tokens.as_slice() {
        ["out", value] => execute_out(vm, value),
        ["lbl", _] => Ok(Control::Next),
        ["ext", value] => execute_ext(vm, value),
        ["cls"] => execute_cls(vm),
        ["alc", name, size] => execute_alc(vm, name, size),
        ["inp", prompt, ">", name] => execute_inp(vm, prompt, name),
        [op @ ("add" | "sub" | "mul" | "div" | "pow"), left, right, ">", name] => {
            let op = ArithOp::from_opcode(op).ok_or_else(|| ExecError::syntax(*op))?;
            execute_arith(vm, op, left, right, name)
        }
        ["cst", name, target @ ("STRING" | "INTEGER")] => {
            let target = CastType::from_keyword(target).ok_or_else(|| ExecError::syntax(*target))?;
            execute_cst(vm, name, target)
        }
        ["cmp", left, right] => execute_cmp(vm, left, right),
        [op @ ("jeq" | "jne" | "jgt" | "jlt" | "jge" | "jle"), label] => {
            let jump = Jump::from_opcode(op).ok_or_else(|| ExecError::syntax(*op))?;
            execute_jump(vm, jump, label)
        }
        ["drp", name] => execute_drp(vm, name),
        [value, ">", name] => execute_assign(vm, value, name),
        _ => Err(ExecError::syntax(format!("unrecognized instruction '{}'", instruction))),
    }
}

/* ===================== Handlers ===================== */

fn execute_out<R: BufRead, W: Write>(vm: &mut VM<R, W>, value: &str) -> Result<Control, ExecError> {
    let value = resolve_value(value, &vm.stack)?;
    writeln!(vm.output, "{}", value)?;
    Ok(Control::Next)
}

fn execute_ext<R: BufRead, W: Write>(vm: &mut VM<R, W>, value: &str) -> Result<Control, ExecError> {
    let status = match resolve_value(value, &vm.stack)? {
        Val::Int(code) => ExitStatus::Code(code),
        other => ExitStatus::Message(other.to_string()),
    };
    Ok(Control::Exit(status))
}

fn execute_cls<R: BufRead, W: Write>(vm: &mut VM<R, W>) -> Result<Control, ExecError> {
    vm.output.write_all(CLEAR_SCREEN.as_bytes())?;
    vm.output.flush()?;
    Ok(Control::Next)
}

fn execute_alc<R: BufRead, W: Write>(
    vm: &mut VM<R, W>,
    name: &str,
    size: &str,
) -> Result<Control, ExecError> {
    let name = variable_name(name)?;
    let size = allocation_size(size)?;
    vm.stack.allocate(name, size)?;
    Ok(Control::Next)
}

fn execute_inp<R: BufRead, W: Write>(
    vm: &mut VM<R, W>,
    prompt: &str,
    name: &str,
) -> Result<Control, ExecError> {
    let Val::Str(prompt) = resolve_value(prompt, &vm.stack)? else {
        return Err(ExecError::runtime("argument to inp must be a STRING"));
    };
    let name = variable_name(name)?;

    write!(vm.output, "{}", prompt)?;
    vm.output.flush()?;

    let mut line = String::new();
    if vm.input.read_line(&mut line)? == 0 {
        return Err(ExecError::EndOfInput);
    }
    let line = line.strip_suffix('\n').unwrap_or(&line);
    let line = line.strip_suffix('\r').unwrap_or(line);

    vm.stack.write(name, Val::Str(line.to_string()))?;
    Ok(Control::Next)
}

fn execute_arith<R: BufRead, W: Write>(
    vm: &mut VM<R, W>,
    op: ArithOp,
    left: &str,
    right: &str,
    name: &str,
) -> Result<Control, ExecError> {
    let name = variable_name(name)?;
    let left = resolve_value(left, &vm.stack)?;
    let right = resolve_value(right, &vm.stack)?;
    let result = operators::apply(op, left, right)?;
    vm.stack.write(name, result)?;
    Ok(Control::Next)
}

fn execute_cst<R: BufRead, W: Write>(
    vm: &mut VM<R, W>,
    name: &str,
    target: CastType,
) -> Result<Control, ExecError> {
    let name = variable_name(name)?;
    let value = vm.stack.read(name)?.clone();
    vm.stack.write(name, operators::cast(value, target)?)?;
    Ok(Control::Next)
}

fn execute_cmp<R: BufRead, W: Write>(
    vm: &mut VM<R, W>,
    left: &str,
    right: &str,
) -> Result<Control, ExecError> {
    let left = resolve_value(left, &vm.stack)?;
    let right = resolve_value(right, &vm.stack)?;
    vm.comparison = operators::compare(&left, &right, vm.settings.ordered_comparisons)?;
    Ok(Control::Next)
}

fn execute_jump<R: BufRead, W: Write>(
    vm: &mut VM<R, W>,
    jump: Jump,
    label: &str,
) -> Result<Control, ExecError> {
    if !jump.fires(vm.comparison, vm.settings.ordered_comparisons) {
        return Ok(Control::Next);
    }
    vm.program
        .label(label)
        .map(Control::Jump)
        .ok_or_else(|| ExecError::UnknownLabel(label.to_string()))
}

fn execute_drp<R: BufRead, W: Write>(vm: &mut VM<R, W>, name: &str) -> Result<Control, ExecError> {
    let name = variable_name(name)?;
    vm.stack.drop_variable(name)?;
    Ok(Control::Next)
}

fn execute_assign<R: BufRead, W: Write>(
    vm: &mut VM<R, W>,
    value: &str,
    name: &str,
) -> Result<Control, ExecError> {
    let name = variable_name(name)?;
    let value = resolve_value(value, &vm.stack)?;
    vm.stack.write(name, value)?;
    Ok(Control::Next)
}
