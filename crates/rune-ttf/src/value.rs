//! Loosely typed host values for positional entry points.

use crate::color::Color;
use crate::error::{Result, TtfError};

/// A value as handed over by a dynamic host.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Nil,
    Bool(bool),
    Int(i64),
    Str(String),
    Array(Vec<Value>),
}

impl Value {
    /// Host truthiness: only `Nil` and `false` are false.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Nil | Value::Bool(false))
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "bool",
            Value::Int(_) => "integer",
            Value::Str(_) => "string",
            Value::Array(_) => "array",
        }
    }

    pub fn as_str(&self) -> Result<&str> {
        match self {
            Value::Str(s) => Ok(s),
            other => Err(wrong_type(other, "string")),
        }
    }

    pub fn as_int(&self) -> Result<i64> {
        match self {
            Value::Int(n) => Ok(*n),
            other => Err(wrong_type(other, "integer")),
        }
    }

    /// `[r, g, b]`; extra entries are ignored.
    pub fn as_color(&self) -> Result<Color> {
        let Value::Array(items) = self else {
            return Err(wrong_type(self, "array"));
        };
        let channels = items
            .iter()
            .take(3)
            .map(Value::as_int)
            .collect::<Result<Vec<_>>>()?;
        Color::try_from(channels.as_slice())
    }
}

fn wrong_type(value: &Value, expected: &str) -> TtfError {
    TtfError::argument(format!(
        "wrong argument type {} (expected {expected})",
        value.type_name()
    ))
}

/// Fail unless at least `required` positional arguments were given.
pub(crate) fn check_arity(args: &[Value], required: usize) -> Result<()> {
    if args.len() < required {
        return Err(TtfError::argument(format!(
            "wrong number of arguments ({} for {required})",
            args.len()
        )));
    }
    Ok(())
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Color> for Value {
    fn from(c: Color) -> Self {
        Value::Array(vec![
            Value::Int(c.r.into()),
            Value::Int(c.g.into()),
            Value::Int(c.b.into()),
        ])
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Nil, Into::into)
    }
}
