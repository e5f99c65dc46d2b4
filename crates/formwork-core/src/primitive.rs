//! # Primitive Field Types
//!
//! The closed set of primitive type constructors a field may declare:
//! `Text`, `Number`, `Boolean` and `Date`. Each has a zero value (used when
//! a field gets neither input nor default) and a coercion (applied to literal
//! defaults). Supplied input data is never coerced.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DateError;
use crate::temporal;
use crate::value::Value;

/// A primitive type constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Primitive {
    Text,
    Number,
    Boolean,
    Date,
}

impl Primitive {
    /// All primitives, in declaration order.
    pub const ALL: [Primitive; 4] = [Self::Text, Self::Number, Self::Boolean, Self::Date];

    pub fn name(self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Number => "Number",
            Self::Boolean => "Boolean",
            Self::Date => "Date",
        }
    }

    /// The value a field of this type takes when nothing else applies.
    ///
    /// The zero date is the Unix epoch, so zero-built instances are
    /// reproducible.
    pub fn zero(self) -> Value {
        match self {
            Self::Text => Value::Text(String::new()),
            Self::Number => Value::Number(0.0),
            Self::Boolean => Value::Bool(false),
            Self::Date => Value::Date(temporal::epoch()),
        }
    }

    /// Apply this constructor to a literal.
    ///
    /// Inputs with no reading in the target type produce `Null`.
    pub fn coerce(self, value: &Value) -> Value {
        match self {
            Self::Text => Value::Text(coerce_text(value)),
            Self::Number => coerce_number(value).map_or(Value::Null, Value::Number),
            Self::Boolean => Value::Bool(value.is_truthy()),
            Self::Date => coerce_date(value).map_or(Value::Null, Value::Date),
        }
    }

    /// Like [`coerce`](Self::coerce) for dates, but keeps the reason a
    /// literal could not be read.
    pub fn date_from(value: &Value) -> Result<DateTime<Utc>, DateError> {
        match value {
            Value::Date(d) => Ok(*d),
            Value::Number(ms) => temporal::from_epoch_millis(*ms),
            Value::Text(s) => temporal::parse_date(s),
            other => Err(DateError::Unsupported(other.kind())),
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn coerce_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_text(*n),
        Value::Text(s) => s.clone(),
        Value::Date(d) => temporal::to_iso8601(d),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Null => Some(0.0),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Number(n) => Some(*n),
        Value::Text(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Some(0.0)
            } else {
                parse_number(trimmed)
            }
        }
        Value::Date(d) => Some(temporal::epoch_millis(d)),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Shortest round-trip rendering, switching to exponent form (`1e+21`,
/// `1.5e-7`) outside `[1e-6, 1e21)`. Negative zero renders as `0`.
fn number_text(n: f64) -> String {
    if n == 0.0 {
        return "0".to_string();
    }
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let abs = n.abs();
    if (1e-6..1e21).contains(&abs) {
        return n.to_string();
    }

    let exp = format!("{n:e}");
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
        _ => exp,
    }
}

/// Parse trimmed, non-empty numeric text.
///
/// Accepts decimal and exponent forms, `Infinity` with an optional sign, and
/// unsigned `0x`/`0o`/`0b` integers. Rust's own spellings such as `inf` and
/// `nan` are not numbers here. Radix integers wider than 128 bits are
/// unparsable.
fn parse_number(text: &str) -> Option<f64> {
    match text {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = text.strip_prefix(prefix) {
            return u128::from_str_radix(digits, radix).ok().map(|n| n as f64);
        }
    }

    if text
        .bytes()
        .any(|b| b.is_ascii_alphabetic() && !matches!(b, b'e' | b'E'))
    {
        return None;
    }
    text.parse().ok()
}

fn coerce_date(value: &Value) -> Option<DateTime<Utc>> {
    Primitive::date_from(value).ok()
}
