//! The [`Value`] tagged union: the seven TOML value variants.

#[cfg(test)]
#[path = "./value_tests.rs"]
mod tests;

use std::fmt;

pub use crate::array::Array;
pub use crate::table::Table;
use crate::time::Datetime;

/// A parsed TOML value.
#[derive(Clone, PartialEq)]
pub enum Value {
    /// A boolean
    Bool(bool),
    /// A signed 64-bit integer
    Integer(i64),
    /// A binary64 float
    Float(f64),
    /// UTF-8 text
    String(String),
    /// An RFC 3339 instant
    Datetime(Datetime),
    /// An array
    Array(Array),
    /// A table
    Table(Table),
}

impl Value {
    /// Gets the type of the value as a string, as used in diagnostics.
    pub fn type_str(&self) -> &'static str {
        match self {
            Value::Bool(..) => "boolean",
            Value::Integer(..) => "integer",
            Value::Float(..) => "float",
            Value::String(..) => "string",
            Value::Datetime(..) => "datetime",
            Value::Array(..) => "array",
            Value::Table(..) => "table",
        }
    }

    /// Returns a `bool` if this is a boolean value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns an `i64` if this is an integer value.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns an `f64` if this is a float value.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns a borrowed string if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the instant if this is a datetime value.
    pub fn as_datetime(&self) -> Option<Datetime> {
        match self {
            Value::Datetime(dt) => Some(*dt),
            _ => None,
        }
    }

    /// Returns a borrowed array if this is an array value.
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Returns a borrowed table if this is a table value.
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Value::Table(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Array> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_table_mut(&mut self) -> Option<&mut Table> {
        match self {
            Value::Table(t) => Some(t),
            _ => None,
        }
    }

    /// Looks up a key if this is a table. Missing keys and non-tables yield
    /// `None`, so lookups chain without panicking.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_table()?.get(key)
    }

    /// Indexes an element if this is an array.
    pub fn at(&self, index: usize) -> Option<&Value> {
        self.as_array()?.get(index)
    }

    /// Encodes a byte sequence as a base64 string value.
    pub fn binary(bytes: &[u8]) -> Value {
        use base64::Engine as _;
        Value::String(base64::engine::general_purpose::STANDARD.encode(bytes))
    }

    /// Emptiness per scalar kind: false, zero number, empty string, empty
    /// sequence, empty mapping. Datetimes are never empty.
    pub(crate) fn is_empty_value(&self) -> bool {
        match self {
            Value::Bool(b) => !b,
            Value::Integer(i) => *i == 0,
            Value::Float(f) => *f == 0.0,
            Value::String(s) => s.is_empty(),
            Value::Datetime(..) => false,
            Value::Array(a) => a.is_empty(),
            Value::Table(t) => t.is_empty(),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Datetime> for Value {
    fn from(dt: Datetime) -> Self {
        Value::Datetime(dt)
    }
}

impl From<Array> for Value {
    fn from(a: Array) -> Self {
        Value::Array(a)
    }
}

impl From<Table> for Value {
    fn from(t: Table) -> Self {
        Value::Table(t)
    }
}

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Value::Array(Array::from(values))
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => b.fmt(f),
            Value::Integer(i) => i.fmt(f),
            Value::Float(v) => v.fmt(f),
            Value::String(s) => s.fmt(f),
            Value::Datetime(dt) => dt.fmt(f),
            Value::Array(a) => a.fmt(f),
            Value::Table(t) => t.fmt(f),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Value {
    fn serialize<S>(&self, ser: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Value::Bool(b) => ser.serialize_bool(*b),
            Value::Integer(i) => ser.serialize_i64(*i),
            Value::Float(f) => ser.serialize_f64(*f),
            Value::String(s) => ser.serialize_str(s),
            Value::Datetime(dt) => dt.serialize(ser),
            Value::Array(a) => a.serialize(ser),
            Value::Table(t) => t.serialize(ser),
        }
    }
}
