//! Leaf values stored in a table.
//!
//! A table does not constrain its leaves: any cell may hold an integer, a
//! float, text, a boolean or null. Numeric capability is checked at runtime
//! by the operations that need it (sums, means, arithmetic), which fail with
//! [`TableError::Type`] on anything else.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Result, TableError};
use crate::nested::Nested;

/// Dynamic leaf value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    Int(i64),
    Float(f64),
    Text(String),
    Bool(bool),
    #[default]
    Null,
}

/// Enumerates the kinds of [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Int,
    Float,
    Text,
    Bool,
    Null,
}

impl ValueKind {
    /// Lower-case name of the kind.
    pub fn as_str(self) -> &'static str {
        match self {
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::Text => "text",
            ValueKind::Bool => "bool",
            ValueKind::Null => "null",
        }
    }
}

impl Value {
    /// Returns the [`ValueKind`] of the contained value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::Text(_) => ValueKind::Text,
            Value::Bool(_) => ValueKind::Bool,
            Value::Null => ValueKind::Null,
        }
    }

    /// Human readable label for the contained value.
    pub fn type_name(&self) -> &'static str {
        self.kind().as_str()
    }

    /// `true` for `Int` and `Float`.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Numeric view; `None` for non-numeric leaves.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::Int(i) => Some(i as f64),
            Value::Float(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Value::Int(i) => Some(i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Value::Bool(b) => Some(b),
            _ => None,
        }
    }

    /// Numeric addition. `Int + Int` stays an integer unless it overflows,
    /// in which case the result is promoted to `Float`.
    ///
    /// # Examples
    ///
    /// ```
    /// use varplus_core::Value;
    ///
    /// assert_eq!(Value::Int(2).checked_add(&Value::Int(3)).unwrap(), Value::Int(5));
    /// assert_eq!(Value::Int(2).checked_add(&Value::Float(0.5)).unwrap(), Value::Float(2.5));
    /// assert!(Value::from("a").checked_add(&Value::Int(1)).is_err());
    /// ```
    pub fn checked_add(&self, other: &Value) -> Result<Value> {
        if let (Value::Int(a), Value::Int(b)) = (self, other) {
            return Ok(a
                .checked_add(*b)
                .map(Value::Int)
                .unwrap_or(Value::Float(*a as f64 + *b as f64)));
        }
        match (self.as_f64(), other.as_f64()) {
            (Some(a), Some(b)) => Ok(Value::Float(a + b)),
            _ => Err(Self::unsupported("+", self, other)),
        }
    }

    /// Numeric multiplication with the same promotion rules as
    /// [`checked_add`](Self::checked_add).
    pub fn checked_mul(&self, other: &Value) -> Result<Value> {
        if let (Value::Int(a), Value::Int(b)) = (self, other) {
            return Ok(a
                .checked_mul(*b)
                .map(Value::Int)
                .unwrap_or(Value::Float(*a as f64 * *b as f64)));
        }
        match (self.as_f64(), other.as_f64()) {
            (Some(a), Some(b)) => Ok(Value::Float(a * b)),
            _ => Err(Self::unsupported("*", self, other)),
        }
    }

    /// Total order between comparable leaves.
    ///
    /// Numbers compare with numbers, text with text and booleans with
    /// booleans. Nulls, NaN and mixed kinds are incomparable.
    pub fn compare(&self, other: &Value) -> Result<Ordering> {
        let ordering = match (self, other) {
            (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
            (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
            (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
            _ => match (self.as_f64(), other.as_f64()) {
                (Some(a), Some(b)) => a.partial_cmp(&b),
                _ => None,
            },
        };
        ordering.ok_or_else(|| {
            TableError::type_error(format!(
                "cannot compare {} with {}",
                self.type_name(),
                other.type_name()
            ))
        })
    }

    /// Equality where `Int` and `Float` compare by numeric value.
    pub fn loose_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Int(_), Value::Float(_)) | (Value::Float(_), Value::Int(_)) => {
                self.as_f64() == other.as_f64()
            }
            _ => self == other,
        }
    }

    fn unsupported(op: &str, lhs: &Value, rhs: &Value) -> TableError {
        TableError::type_error(format!(
            "unsupported operand kinds for {op}: {} and {}",
            lhs.type_name(),
            rhs.type_name()
        ))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{i}"),
            // keep a fractional marker so integral floats read back as floats
            Value::Float(x) if x.is_finite() && x.fract() == 0.0 && x.abs() < 1e16 => {
                write!(f, "{x:.1}")
            }
            Value::Float(x) if x.is_finite() && x.fract() == 0.0 => write!(f, "{x:e}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Text(s) => f.write_str(s),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Null => f.write_str("null"),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v.into())
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v.into())
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(x) => serializer.serialize_f64(*x),
            Value::Text(s) => serializer.serialize_str(s),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Null => serializer.serialize_unit(),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        match Nested::deserialize(deserializer)? {
            Nested::Leaf(value) => Ok(value),
            Nested::List(_) => Err(serde::de::Error::invalid_type(
                serde::de::Unexpected::Seq,
                &"a scalar leaf",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_overflow_promotes() {
        let sum = Value::Int(i64::MAX).checked_add(&Value::Int(1)).unwrap();
        assert!(matches!(sum, Value::Float(_)));
        let product = Value::Int(i64::MAX).checked_mul(&Value::Int(2)).unwrap();
        assert!(matches!(product, Value::Float(_)));
    }

    #[test]
    fn test_non_numeric_arithmetic_is_type_error() {
        let err = Value::Null.checked_mul(&Value::Int(2)).unwrap_err();
        assert!(err.is_type());
        assert!(Value::Bool(true).checked_add(&Value::Int(1)).is_err());
    }

    #[test]
    fn test_compare_mixed_numbers() {
        assert_eq!(
            Value::Int(2).compare(&Value::Float(2.5)).unwrap(),
            Ordering::Less
        );
        assert_eq!(
            Value::from("b").compare(&Value::from("a")).unwrap(),
            Ordering::Greater
        );
        assert!(Value::Int(1).compare(&Value::from("1")).is_err());
        assert!(Value::Null.compare(&Value::Null).is_err());
        assert!(Value::Float(f64::NAN).compare(&Value::Int(0)).is_err());
    }

    #[test]
    fn test_loose_eq() {
        assert!(Value::Int(1).loose_eq(&Value::Float(1.0)));
        assert!(!Value::Int(1).loose_eq(&Value::from("1")));
        assert_ne!(Value::Int(1), Value::Float(1.0));
    }

    #[test]
    fn test_display_keeps_float_marker() {
        assert_eq!(Value::Float(2.0).to_string(), "2.0");
        assert_eq!(Value::Float(2.5).to_string(), "2.5");
        assert_eq!(Value::Float(1e20).to_string(), "1e20");
        assert_eq!(Value::Int(-3).to_string(), "-3");
        assert_eq!(Value::Null.to_string(), "null");
    }

    #[test]
    fn test_json_leaf_roundtrip() {
        for value in [
            Value::Int(7),
            Value::Float(2.0),
            Value::from("x"),
            Value::Bool(false),
            Value::Null,
        ] {
            let text = serde_json::to_string(&value).unwrap();
            let back: Value = serde_json::from_str(&text).unwrap();
            assert_eq!(back, value);
        }
        assert!(serde_json::from_str::<Value>("[1]").is_err());
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some(3)), Value::Int(3));
    }
}
