//! Runtime value types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Runtime value type
///
/// Tokens decide the variant: `5` is an `Int`, `"5"` is a `Str`. `Float` only
/// comes out of arithmetic (true division, negative powers, float operands).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "t", content = "v")]
pub enum Val {
    Int(i64),
    Float(f64),
    Str(String),
}

impl Val {
    /// Type name as used in diagnostics and `cst`
    pub fn type_name(&self) -> &'static str {
        match self {
            Val::Int(_) => "INTEGER",
            Val::Float(_) => "FLOAT",
            Val::Str(_) => "STRING",
        }
    }

    /// Number of bytes the value occupies in a sized variable
    pub fn encoded_len(&self) -> usize {
        match self {
            Val::Str(s) => s.len(),
            other => other.to_string().len(),
        }
    }

    /// Numeric view, promoting integers
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Val::Int(i) => Some(*i as f64),
            Val::Float(f) => Some(*f),
            Val::Str(_) => None,
        }
    }

    /// True when both values carry the same variant
    pub fn same_type(&self, other: &Val) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

/// Integers and floats compare numerically; strings only equal strings.
impl PartialEq for Val {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Val::Int(a), Val::Int(b)) => a == b,
            (Val::Str(a), Val::Str(b)) => a == b,
            (Val::Str(_), _) | (_, Val::Str(_)) => false,
            (a, b) => a.as_f64() == b.as_f64(),
        }
    }
}

impl fmt::Display for Val {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Val::Int(i) => write!(f, "{}", i),
            Val::Float(v) => f.write_str(&format_float(*v)),
            Val::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Val {
    fn from(v: i64) -> Self {
        Val::Int(v)
    }
}

impl From<f64> for Val {
    fn from(v: f64) -> Self {
        Val::Float(v)
    }
}

impl From<&str> for Val {
    fn from(v: &str) -> Self {
        Val::Str(v.to_string())
    }
}

impl From<String> for Val {
    fn from(v: String) -> Self {
        Val::Str(v)
    }
}

/// Render a float the way scripts expect to see it: always with a fractional
/// part or exponent (`4.0`, `3.5`, `1e+20`, `1.5e-07`).
pub fn format_float(v: f64) -> String {
    if v.is_nan() {
        return "nan".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let sci = format!("{:e}", v);
    let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if !(-4..16).contains(&exponent) {
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!("{}e{}{:02}", mantissa, sign, exponent.abs());
    }

    let plain = v.to_string();
    if plain.contains('.') {
        plain
    } else {
        format!("{}.0", plain)
    }
}
