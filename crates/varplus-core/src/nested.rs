//! Nested-container representation of a table.
//!
//! [`Nested`] is the logical form of a table: a list whose items are either
//! all leaves or all lists of identical shape. It is what literal
//! construction accepts, what row access returns, and what JSON interchange
//! carries. [`NdArray`](crate::NdArray) stores the same content as a flat
//! row-major buffer and converts at the boundary.
//!
//! # Examples
//!
//! ```
//! use varplus_core::{Nested, Value};
//!
//! let nested = Nested::from([[1, 2, 3], [4, 5, 6]]);
//! assert_eq!(nested.shape().unwrap().as_slice(), &[2, 3]);
//!
//! let leaf = Nested::from("label");
//! assert_eq!(leaf.as_leaf(), Some(&Value::from("label")));
//! ```

use std::fmt;

use serde::de::{self, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smallvec::smallvec;

use crate::error::{Result, TableError};
use crate::types::{shape_size, Shape};
use crate::value::Value;

/// A leaf or a list of nested items.
#[derive(Debug, Clone, PartialEq)]
pub enum Nested {
    Leaf(Value),
    List(Vec<Nested>),
}

impl Nested {
    pub fn is_leaf(&self) -> bool {
        matches!(self, Nested::Leaf(_))
    }

    pub fn as_leaf(&self) -> Option<&Value> {
        match self {
            Nested::Leaf(v) => Some(v),
            Nested::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Nested]> {
        match self {
            Nested::Leaf(_) => None,
            Nested::List(items) => Some(items),
        }
    }

    /// Validate rectangularity and return the shape.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::Shape`] if:
    /// - `self` is a bare leaf
    /// - leaves and lists are mixed at one nesting level
    /// - sibling lists have different shapes
    pub fn shape(&self) -> Result<Shape> {
        match self {
            Nested::Leaf(v) => Err(TableError::shape(format!(
                "expected a list, got a {} leaf",
                v.type_name()
            ))),
            Nested::List(items) => list_shape(items, 0),
        }
    }

    /// Move every leaf into `out` in row-major order.
    pub(crate) fn flatten_into(self, out: &mut Vec<Value>) {
        match self {
            Nested::Leaf(v) => out.push(v),
            Nested::List(items) => {
                for item in items {
                    item.flatten_into(out);
                }
            }
        }
    }

    /// Rebuild the nested form of `data` laid out with `shape`.
    ///
    /// The flat sequence is cut into `shape[0]` groups of
    /// `product(shape[1..])` leaves, recursing until rank 1.
    pub(crate) fn from_flat(data: &[Value], shape: &[usize]) -> Nested {
        match shape {
            [] => Nested::Leaf(data.first().cloned().unwrap_or_default()),
            [_] => Nested::List(data.iter().cloned().map(Nested::Leaf).collect()),
            [outer, inner @ ..] => {
                let chunk = shape_size(inner);
                Nested::List(
                    (0..*outer)
                        .map(|i| Nested::from_flat(&data[i * chunk..(i + 1) * chunk], inner))
                        .collect(),
                )
            }
        }
    }

    fn write_pretty(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        match self {
            Nested::Leaf(v) => write!(f, "{v}"),
            Nested::List(items) if items.is_empty() => f.write_str("[]"),
            Nested::List(items) if items[0].is_leaf() => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    item.write_pretty(f, indent)?;
                }
                f.write_str("]")
            }
            Nested::List(items) => {
                f.write_str("[\n")?;
                for (i, item) in items.iter().enumerate() {
                    write!(f, "{:width$}", "", width = indent + 2)?;
                    item.write_pretty(f, indent + 2)?;
                    if i + 1 < items.len() {
                        f.write_str(",")?;
                    }
                    f.write_str("\n")?;
                }
                write!(f, "{:width$}]", "", width = indent)
            }
        }
    }
}

fn list_shape(items: &[Nested], depth: usize) -> Result<Shape> {
    let mut shape: Shape = smallvec![items.len()];
    let Some(first) = items.first() else {
        return Ok(shape);
    };
    match first {
        Nested::Leaf(_) => {
            if items.iter().any(|item| !item.is_leaf()) {
                return Err(TableError::shape(format!(
                    "leaves and lists mixed at depth {depth}"
                )));
            }
        }
        Nested::List(children) => {
            let inner = list_shape(children, depth + 1)?;
            for item in &items[1..] {
                let Nested::List(children) = item else {
                    return Err(TableError::shape(format!(
                        "leaves and lists mixed at depth {depth}"
                    )));
                };
                let other = list_shape(children, depth + 1)?;
                if other != inner {
                    return Err(TableError::shape(format!(
                        "inconsistent dimensions at depth {}: {:?} vs {:?}",
                        depth + 1,
                        inner.as_slice(),
                        other.as_slice()
                    )));
                }
            }
            shape.extend(inner);
        }
    }
    Ok(shape)
}

impl fmt::Display for Nested {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_pretty(f, 0)
    }
}

impl From<Value> for Nested {
    fn from(v: Value) -> Self {
        Nested::Leaf(v)
    }
}

macro_rules! leaf_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Nested {
                fn from(v: $ty) -> Self {
                    Nested::Leaf(Value::from(v))
                }
            }
        )*
    };
}

leaf_from!(i64, i32, u32, f64, f32, bool, &str, String);

impl<T: Into<Nested>> From<Vec<T>> for Nested {
    fn from(items: Vec<T>) -> Self {
        Nested::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Nested>, const N: usize> From<[T; N]> for Nested {
    fn from(items: [T; N]) -> Self {
        Nested::List(items.into_iter().map(Into::into).collect())
    }
}

impl TryFrom<serde_json::Value> for Nested {
    type Error = TableError;

    fn try_from(json: serde_json::Value) -> Result<Self> {
        use serde_json::Value as Json;
        Ok(match json {
            Json::Null => Nested::Leaf(Value::Null),
            Json::Bool(b) => Nested::Leaf(Value::Bool(b)),
            Json::Number(n) => Nested::Leaf(match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            }),
            Json::String(s) => Nested::Leaf(Value::Text(s)),
            Json::Array(items) => Nested::List(
                items
                    .into_iter()
                    .map(Nested::try_from)
                    .collect::<Result<Vec<_>>>()?,
            ),
            Json::Object(_) => {
                return Err(TableError::type_error(
                    "JSON objects cannot be table leaves",
                ))
            }
        })
    }
}

impl Serialize for Nested {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Nested::Leaf(v) => v.serialize(serializer),
            Nested::List(items) => serializer.collect_seq(items),
        }
    }
}

struct NestedVisitor;

impl<'de> Visitor<'de> for NestedVisitor {
    type Value = Nested;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number, string, boolean, null or list")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<Nested, E> {
        Ok(Nested::Leaf(Value::Bool(v)))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Nested, E> {
        Ok(Nested::Leaf(Value::Int(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Nested, E> {
        Ok(Nested::Leaf(match i64::try_from(v) {
            Ok(i) => Value::Int(i),
            Err(_) => Value::Float(v as f64),
        }))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Nested, E> {
        Ok(Nested::Leaf(Value::Float(v)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Nested, E> {
        Ok(Nested::Leaf(Value::Text(v.to_owned())))
    }

    fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<Nested, E> {
        Ok(Nested::Leaf(Value::Text(v)))
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<Nested, E> {
        Ok(Nested::Leaf(Value::Null))
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<Nested, E> {
        Ok(Nested::Leaf(Value::Null))
    }

    fn visit_some<D: Deserializer<'de>>(self, d: D) -> std::result::Result<Nested, D::Error> {
        Nested::deserialize(d)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<Nested, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element::<Nested>()? {
            items.push(item);
        }
        Ok(Nested::List(items))
    }
}

impl<'de> Deserialize<'de> for Nested {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(NestedVisitor)
    }
}
