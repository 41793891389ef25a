//! Conversion of raw environment strings into typed configuration values.
//!
//! Each [`FieldKind`] has exactly one coercion rule. A rejected value yields
//! `None`; the caller attaches the key and variable name to the error.

use figment::value::Value;
use serde::Serialize;
use std::fmt;

/// Semantic type of a leaf configuration field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Base-10 integer
    Integer,
    /// Boolean token
    Boolean,
    /// Ordered list of strings
    Sequence,
    /// Verbatim string
    String,
}

impl FieldKind {
    /// Classify a default value produced by serializing the config tree.
    ///
    /// Returns `None` for dictionaries (not leaves) and empty values.
    pub const fn of(value: &Value) -> Option<Self> {
        match value {
            Value::Num(..) => Some(Self::Integer),
            Value::Bool(..) => Some(Self::Boolean),
            Value::Array(..) => Some(Self::Sequence),
            Value::String(..) | Value::Char(..) => Some(Self::String),
            Value::Dict(..) | Value::Empty(..) => None,
        }
    }

    /// Coerce a raw string into a value of this kind
    pub fn coerce(self, raw: &str) -> Option<Value> {
        match self {
            Self::Integer => parse_integer(raw).map(Value::from),
            Self::Boolean => parse_bool(raw).map(Value::from),
            Self::Sequence => Some(Value::from(
                split_sequence(raw)
                    .into_iter()
                    .map(Value::from)
                    .collect::<Vec<_>>(),
            )),
            Self::String => Some(Value::from(raw)),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Sequence => "sequence",
            Self::String => "string",
        };
        f.write_str(name)
    }
}

/// Parse a base-10 integer, tolerating surrounding whitespace
pub fn parse_integer(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}

/// Parse a boolean token.
///
/// Accepts `1`, `t`, `T`, `TRUE`, `true`, `True` and their false
/// counterparts `0`, `f`, `F`, `FALSE`, `false`, `False`.
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim() {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// Split a comma-separated list into trimmed items.
///
/// Empty items between commas are kept; a blank value is an empty list.
pub fn split_sequence(raw: &str) -> Vec<String> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    raw.split(',').map(|item| item.trim().to_string()).collect()
}
