//! Value resolution
//!
//! Turns operand tokens into runtime values:
//! - `&name` reads a variable
//! - `-?[0-9]+` is an integer literal
//! - `"..."` is a string: `$name` placeholders are substituted first, then
//!   backslash escapes are decoded
//!
//! Anything else is a syntax error.

use super::errors::ExecError;
use super::grammar::{self, Rule, Segment};
use super::stack::Stack;
use super::types::Val;

/// Resolve an operand token to a value
pub fn resolve_value(token: &str, stack: &Stack) -> Result<Val, ExecError> {
    if let Some(name) = token.strip_prefix('&') {
        if name.is_empty() {
            return Err(ExecError::syntax("'&' must be followed by a variable name"));
        }
        return Ok(stack.read(name)?.clone());
    }

    if grammar::matches(Rule::integer_literal, token) {
        return token
            .parse::<i64>()
            .map(Val::Int)
            .map_err(|_| ExecError::runtime(format!("integer literal {} is out of range", token)));
    }

    if token.len() > 1 && token.starts_with('"') && token.ends_with('"') {
        let body = interpolate(token.trim_matches('"'), stack)?;
        return Ok(Val::Str(unescape(&body)?));
    }

    Err(ExecError::syntax(format!("invalid value '{}'", token)))
}

/// Name of the variable a destination token refers to (`&name` or `name`)
pub fn variable_name(token: &str) -> Result<&str, ExecError> {
    grammar::capture(Rule::variable_name, Rule::name, token)
        .ok_or_else(|| ExecError::syntax(format!("invalid variable name '{}'", token)))
}

/// Byte count of an allocation token (`:[N]`)
pub fn allocation_size(token: &str) -> Result<usize, ExecError> {
    grammar::capture(Rule::allocation_size, Rule::size, token)
        .and_then(|digits| digits.parse().ok())
        .ok_or_else(|| ExecError::syntax(format!("invalid allocation size '{}'", token)))
}

/// Replace every `$name` with the display form of that variable
pub fn interpolate(body: &str, stack: &Stack) -> Result<String, ExecError> {
    let mut out = String::with_capacity(body.len());
    for segment in grammar::template(body) {
        match segment {
            Segment::Text(text) => out.push_str(text),
            Segment::Placeholder(name) => out.push_str(&stack.read(name)?.to_string()),
        }
    }
    Ok(out)
}

/// Decode backslash escapes
///
/// Every character stands for its own code point, so only the escapes
/// themselves change: `\n \t \r \a \b \f \v \\ \' \"`, octal `\ooo`, and
/// `\xhh \uhhhh \Uhhhhhhhh`. Unknown escapes are kept as written.
pub fn unescape(text: &str) -> Result<String, ExecError> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        let Some(escape) = chars.next() else {
            return Err(ExecError::runtime("\\ at end of string"));
        };

        match escape {
            '\n' => {}
            '\\' => out.push('\\'),
            '\'' => out.push('\''),
            '"' => out.push('"'),
            'a' => out.push('\x07'),
            'b' => out.push('\x08'),
            'f' => out.push('\x0c'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'v' => out.push('\x0b'),
            '0'..='7' => {
                let mut code = escape.to_digit(8).unwrap_or(0);
                for _ in 0..2 {
                    match chars.peek().and_then(|d| d.to_digit(8)) {
                        Some(digit) => {
                            code = code * 8 + digit;
                            chars.next();
                        }
                        None => break,
                    }
                }
                out.push(to_char(code)?);
            }
            'x' => out.push(to_char(read_hex(&mut chars, 2, escape)?)?),
            'u' => out.push(to_char(read_hex(&mut chars, 4, escape)?)?),
            'U' => out.push(to_char(read_hex(&mut chars, 8, escape)?)?),
            'N' => return Err(ExecError::runtime("named unicode escapes are not supported")),
            other => {
                out.push('\\');
                out.push(other);
            }
        }
    }

    Ok(out)
}

fn read_hex(
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
    digits: usize,
    escape: char,
) -> Result<u32, ExecError> {
    let mut code = 0u32;
    for _ in 0..digits {
        let digit = chars
            .next_if(|c| c.is_ascii_hexdigit())
            .and_then(|c| c.to_digit(16))
            .ok_or_else(|| ExecError::runtime(format!("truncated \\{} escape", escape)))?;
        code = code * 16 + digit;
    }
    Ok(code)
}

fn to_char(code: u32) -> Result<char, ExecError> {
    char::from_u32(code)
        .ok_or_else(|| ExecError::runtime(format!("illegal unicode character {:#x}", code)))
}
