//! Command-line syntax for values, entries and constraints.
//!
//! Values are written as `kind:literal` (`int32:4`, `string:EU`,
//! `blob:00ff`) or as a bare literal whose kind is inferred:
//!
//! | Literal | Kind |
//! |---------|------|
//! | `true`, `false` | bool |
//! | integer fitting `i32` | int32 |
//! | larger non-negative integer | int64 |
//! | decimal with a `.` | float |
//! | anything else | string |
//!
//! An integer literal that fits neither `i32` nor `u64` (for example
//! `-5000000000`) is rejected rather than read as a string; `int64` only
//! holds non-negative values.
//!
//! Entries are `Key=value`; constraints are `Key <op> value` with the
//! operator separated by whitespace (`Slots >= 2`, `Mode eq string:ctf`).

use sessionseek::{Comparator, FilterConstraint, PropertyEntry, SessionSeekError, TypedValue};
use thiserror::Error;

/// Errors from parsing command-line expressions.
#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("'{expr}' is missing a {part}")]
    MissingPart { expr: String, part: &'static str },

    #[error("'{literal}' is not a valid {kind} literal")]
    InvalidLiteral { kind: &'static str, literal: String },

    #[error(transparent)]
    Comparator(#[from] SessionSeekError),
}

impl ParseError {
    fn missing(expr: &str, part: &'static str) -> Self {
        ParseError::MissingPart {
            expr: expr.to_string(),
            part,
        }
    }

    fn literal(kind: &'static str, literal: &str) -> Self {
        ParseError::InvalidLiteral {
            kind,
            literal: literal.to_string(),
        }
    }
}

/// Parses a value, honoring an explicit `kind:` prefix.
pub fn parse_value(text: &str) -> Result<TypedValue, ParseError> {
    if let Some((kind, literal)) = text.split_once(':') {
        if let Some(value) = parse_explicit(kind, literal)? {
            return Ok(value);
        }
    }
    infer_value(text)
}

fn parse_explicit(kind: &str, literal: &str) -> Result<Option<TypedValue>, ParseError> {
    let value = match kind.to_ascii_lowercase().as_str() {
        "bool" => TypedValue::Bool(
            literal
                .parse()
                .map_err(|_| ParseError::literal("bool", literal))?,
        ),
        // Bytes are stored widened, like PropertyEntry::byte.
        "byte" => TypedValue::from(
            literal
                .parse::<u8>()
                .map_err(|_| ParseError::literal("byte", literal))?,
        ),
        "int" | "int32" => TypedValue::Int32(
            literal
                .parse()
                .map_err(|_| ParseError::literal("int32", literal))?,
        ),
        "int64" => TypedValue::Int64(
            literal
                .parse()
                .map_err(|_| ParseError::literal("int64", literal))?,
        ),
        "float" => TypedValue::Float(
            literal
                .parse()
                .map_err(|_| ParseError::literal("float", literal))?,
        ),
        "double" => TypedValue::Double(
            literal
                .parse()
                .map_err(|_| ParseError::literal("double", literal))?,
        ),
        "string" | "str" => TypedValue::String(literal.to_string()),
        "blob" => TypedValue::Blob(parse_hex(literal)?),
        "empty" if literal.is_empty() => TypedValue::Empty,
        "empty" => return Err(ParseError::literal("empty", literal)),
        _ => return Ok(None),
    };
    Ok(Some(value))
}

fn parse_hex(literal: &str) -> Result<Vec<u8>, ParseError> {
    if literal.len() % 2 != 0 || !literal.is_ascii() {
        return Err(ParseError::literal("blob", literal));
    }
    (0..literal.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&literal[i..i + 2], 16)
                .map_err(|_| ParseError::literal("blob", literal))
        })
        .collect()
}

fn infer_value(text: &str) -> Result<TypedValue, ParseError> {
    match text {
        "true" => return Ok(TypedValue::Bool(true)),
        "false" => return Ok(TypedValue::Bool(false)),
        _ => {}
    }
    if let Ok(n) = text.parse::<i32>() {
        return Ok(TypedValue::Int32(n));
    }
    if let Ok(n) = text.parse::<u64>() {
        return Ok(TypedValue::Int64(n));
    }
    if is_integer_literal(text) {
        return Err(ParseError::literal("integer", text));
    }
    if text.contains('.') {
        if let Ok(f) = text.parse::<f32>() {
            return Ok(TypedValue::Float(f));
        }
    }
    Ok(TypedValue::String(text.to_string()))
}

/// Returns `true` for an optionally signed run of ASCII digits.
fn is_integer_literal(text: &str) -> bool {
    let digits = text.strip_prefix(['-', '+']).unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Parses `Key=value` into an entry.
pub fn parse_entry(expr: &str) -> Result<PropertyEntry, ParseError> {
    let (key, value) = expr
        .split_once('=')
        .ok_or_else(|| ParseError::missing(expr, "'=' separator"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(ParseError::missing(expr, "key"));
    }
    Ok(PropertyEntry::new(key, parse_value(value.trim())?))
}

/// Parses `Key <op> value` into a constraint.
pub fn parse_constraint(expr: &str) -> Result<FilterConstraint, ParseError> {
    let (key, rest) = split_word(expr).ok_or_else(|| ParseError::missing(expr, "key"))?;
    let (op, value) = split_word(rest).ok_or_else(|| ParseError::missing(expr, "comparator"))?;
    if value.is_empty() {
        return Err(ParseError::missing(expr, "value"));
    }
    let op: Comparator = op.parse()?;
    Ok(FilterConstraint::new(key, op, parse_value(value)?))
}

/// Splits off the first whitespace-delimited word, returning it and the
/// trimmed remainder.
fn split_word(text: &str) -> Option<(&str, &str)> {
    let text = text.trim_start();
    if text.is_empty() {
        return None;
    }
    match text.find(char::is_whitespace) {
        Some(at) => Some((&text[..at], text[at..].trim())),
        None => Some((text, "")),
    }
}
