//! Arithmetic, casts, and comparison on runtime values
//!
//! All failures here are recoverable (`ExecError::Runtime`) except the
//! operand type check of ordered comparisons.

use super::errors::ExecError;
use super::types::{Comparison, Val};

/* ===================== Arithmetic ===================== */

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl ArithOp {
    pub fn from_opcode(opcode: &str) -> Option<Self> {
        match opcode {
            "add" => Some(ArithOp::Add),
            "sub" => Some(ArithOp::Sub),
            "mul" => Some(ArithOp::Mul),
            "div" => Some(ArithOp::Div),
            "pow" => Some(ArithOp::Pow),
            _ => None,
        }
    }

    pub fn opcode(self) -> &'static str {
        match self {
            ArithOp::Add => "add",
            ArithOp::Sub => "sub",
            ArithOp::Mul => "mul",
            ArithOp::Div => "div",
            ArithOp::Pow => "pow",
        }
    }
}

/// Apply an arithmetic opcode
pub fn apply(op: ArithOp, left: Val, right: Val) -> Result<Val, ExecError> {
    match op {
        ArithOp::Add => add(left, right),
        ArithOp::Sub => numeric(op, &left, &right, i64::checked_sub, |a, b| a - b),
        ArithOp::Mul => mul(left, right),
        ArithOp::Div => div(&left, &right),
        ArithOp::Pow => pow(&left, &right),
    }
}

fn add(left: Val, right: Val) -> Result<Val, ExecError> {
    match (left, right) {
        (Val::Str(mut a), Val::Str(b)) => {
            a.push_str(&b);
            Ok(Val::Str(a))
        }
        (a, b) => numeric(ArithOp::Add, &a, &b, i64::checked_add, |a, b| a + b),
    }
}

fn mul(left: Val, right: Val) -> Result<Val, ExecError> {
    match (left, right) {
        (Val::Str(s), Val::Int(n)) | (Val::Int(n), Val::Str(s)) => repeat(&s, n),
        (a, b) => numeric(ArithOp::Mul, &a, &b, i64::checked_mul, |a, b| a * b),
    }
}

fn repeat(s: &str, count: i64) -> Result<Val, ExecError> {
    let count = usize::try_from(count).unwrap_or(0);
    let too_large = || ExecError::runtime("repeated string is too large");
    let total = s.len().checked_mul(count).ok_or_else(too_large)?;

    let mut repeated = String::new();
    repeated.try_reserve_exact(total).map_err(|_| too_large())?;
    for _ in 0..count {
        repeated.push_str(s);
    }
    Ok(Val::Str(repeated))
}

fn div(left: &Val, right: &Val) -> Result<Val, ExecError> {
    let (a, b) = floats(ArithOp::Div, left, right)?;
    if b == 0.0 {
        return Err(ExecError::runtime("division by zero"));
    }
    Ok(Val::Float(a / b))
}

fn pow(left: &Val, right: &Val) -> Result<Val, ExecError> {
    if let (Val::Int(base), Val::Int(exp)) = (left, right) {
        if *exp >= 0 {
            return u32::try_from(*exp)
                .ok()
                .and_then(|exp| base.checked_pow(exp))
                .map(Val::Int)
                .ok_or_else(overflow);
        }
    }

    let (base, exp) = floats(ArithOp::Pow, left, right)?;
    if base == 0.0 && exp < 0.0 {
        return Err(ExecError::runtime("zero cannot be raised to a negative power"));
    }
    let result = base.powf(exp);
    if result.is_nan() && !base.is_nan() && !exp.is_nan() {
        return Err(ExecError::runtime("result is not a real number"));
    }
    Ok(Val::Float(result))
}

fn numeric(
    op: ArithOp,
    left: &Val,
    right: &Val,
    int_op: fn(i64, i64) -> Option<i64>,
    float_op: fn(f64, f64) -> f64,
) -> Result<Val, ExecError> {
    if let (Val::Int(a), Val::Int(b)) = (left, right) {
        return int_op(*a, *b).map(Val::Int).ok_or_else(overflow);
    }
    let (a, b) = floats(op, left, right)?;
    Ok(Val::Float(float_op(a, b)))
}

fn floats(op: ArithOp, left: &Val, right: &Val) -> Result<(f64, f64), ExecError> {
    match (left.as_f64(), right.as_f64()) {
        (Some(a), Some(b)) => Ok((a, b)),
        _ => Err(ExecError::runtime(format!(
            "unsupported operand types for {}: {} and {}",
            op.opcode(),
            left.type_name(),
            right.type_name()
        ))),
    }
}

fn overflow() -> ExecError {
    ExecError::runtime("integer overflow")
}

/* ===================== Casts ===================== */

/// Target of a `cst` instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastType {
    Integer,
    String,
}

impl CastType {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "INTEGER" => Some(CastType::Integer),
            "STRING" => Some(CastType::String),
            _ => None,
        }
    }
}

pub fn cast(value: Val, target: CastType) -> Result<Val, ExecError> {
    match (target, value) {
        (CastType::String, Val::Str(s)) => Ok(Val::Str(s)),
        (CastType::String, other) => Ok(Val::Str(other.to_string())),
        (CastType::Integer, Val::Int(i)) => Ok(Val::Int(i)),
        (CastType::Integer, Val::Float(f)) => {
            if !f.is_finite() {
                return Err(ExecError::runtime(format!("cannot convert {} to INTEGER", f)));
            }
            let truncated = f.trunc();
            if truncated < i64::MIN as f64 || truncated >= i64::MAX as f64 {
                return Err(overflow());
            }
            Ok(Val::Int(truncated as i64))
        }
        (CastType::Integer, Val::Str(s)) => parse_integer(&s).map(Val::Int),
    }
}

/// Parse trimmed, optionally signed decimal digits
fn parse_integer(text: &str) -> Result<i64, ExecError> {
    let trimmed = text.trim();
    let digits = trimmed.strip_prefix(&['+', '-'][..]).unwrap_or(trimmed);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ExecError::runtime(format!(
            "invalid literal for INTEGER: '{}'",
            text
        )));
    }
    trimmed.parse().map_err(|_| overflow())
}

/* ===================== Comparison ===================== */

/// Compute the comparison flag for `cmp`
///
/// By default any two values are either `Equal` or `NotEqual`; the ordered
/// flags are never produced. With `ordered` set, unequal values of the same
/// type yield `Greater` or `Less`, and unequal values of different types are
/// rejected.
pub fn compare(left: &Val, right: &Val, ordered: bool) -> Result<Comparison, ExecError> {
    if left == right {
        return Ok(Comparison::Equal);
    }
    if !ordered {
        return Ok(Comparison::NotEqual);
    }
    if !left.same_type(right) {
        return Err(ExecError::ComparisonTypes {
            left: left.type_name(),
            right: right.type_name(),
        });
    }

    let ordering = match (left, right) {
        (Val::Int(a), Val::Int(b)) => a.partial_cmp(b),
        (Val::Float(a), Val::Float(b)) => a.partial_cmp(b),
        (Val::Str(a), Val::Str(b)) => a.partial_cmp(b),
        _ => None,
    };

    Ok(match ordering {
        Some(std::cmp::Ordering::Greater) => Comparison::Greater,
        Some(std::cmp::Ordering::Less) => Comparison::Less,
        // NaN operands are unordered
        _ => Comparison::NotEqual,
    })
}
