//! Runtime value type for the expression language.
//!
//! There are five kinds of value. Only versions, strings and string arrays can
//! be written as literals; nil is what an unbound identifier evaluates to, and
//! booleans only come out of the comparison and logical operators.

use std::fmt;

use crate::error::EvalError;
use crate::version::Version;

/// An expression runtime value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Nil,
    Version(Version),
    Bool(bool),
    Str(String),
    List(Vec<String>),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("nil"),
            Value::Version(v) => write!(f, "{v}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Str(s) => write!(f, "{s:?}"),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, s) in items.iter().enumerate() {
                    if i != 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{s:?}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl Value {
    /// Coerce to boolean.
    ///
    /// Nil is false and any version (`0` included) is true; only the presence
    /// of a tool matters, not its version. Returns `None` for strings and
    /// string arrays, which have no truth value.
    pub fn truthiness(&self) -> Option<bool> {
        match self {
            Value::Nil => Some(false),
            Value::Version(_) => Some(true),
            Value::Bool(b) => Some(*b),
            Value::Str(_) | Value::List(_) => None,
        }
    }

    /// View as an operand of a comparison: nil or a version.
    ///
    /// The outer `Option` is `None` if the value cannot be compared; the inner
    /// one is `None` for nil. `Option`'s ordering puts `None` below every
    /// `Some`, which is exactly the nil-below-any-version rule.
    pub fn as_comparable(&self) -> Option<Option<&Version>> {
        match self {
            Value::Nil => Some(None),
            Value::Version(v) => Some(Some(v)),
            Value::Bool(_) | Value::Str(_) | Value::List(_) => None,
        }
    }

    /// Name of the type, as used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Version(_) => "version",
            Value::Bool(_) => "boolean",
            Value::Str(_) => "string",
            Value::List(_) => "string array",
        }
    }

    /// Convert a final result into the arguments it contributes.
    ///
    /// A string is one argument and a string array is zero or more; anything
    /// else is not a legal result.
    pub fn into_args(self) -> Result<Vec<String>, EvalError> {
        match self {
            Value::Str(s) => Ok(vec![s]),
            Value::List(items) => Ok(items),
            other => Err(EvalError::ResultType {
                found: other.type_name(),
            }),
        }
    }
}

impl From<Version> for Value {
    fn from(v: Version) -> Self {
        Value::Version(v)
    }
}

impl From<Option<Version>> for Value {
    fn from(v: Option<Version>) -> Self {
        v.map_or(Value::Nil, Value::Version)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Value::List(items)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
