//! # NdArray - Trait Implementations
//!
//! This module contains trait implementations for `NdArray`.
//!
//! ## Implemented Traits
//!
//! - `Index` / `IndexMut` (panicking counterparts of `get` / `get_mut`)
//! - `Debug`
//! - `Display` (nested pretty form)
//! - `TryFrom<Nested>` / `From<NdArray> for Nested`

use std::fmt;

use super::types::NdArray;
use crate::error::TableError;
use crate::nested::Nested;
use crate::value::Value;

impl std::ops::Index<&[usize]> for NdArray {
    type Output = Value;
    fn index(&self, index: &[usize]) -> &Self::Output {
        match self.get(index) {
            Ok(value) => value,
            Err(e) => panic!("{e}"),
        }
    }
}

impl std::ops::IndexMut<&[usize]> for NdArray {
    fn index_mut(&mut self, index: &[usize]) -> &mut Self::Output {
        match self.get_mut(index) {
            Ok(value) => value,
            Err(e) => panic!("{e}"),
        }
    }
}

impl fmt::Debug for NdArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NdArray")
            .field("shape", &self.shape())
            .field("ndim", &self.ndim())
            .field("data", &self.data)
            .finish()
    }
}

impl fmt::Display for NdArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_nested(), f)
    }
}

impl TryFrom<Nested> for NdArray {
    type Error = TableError;

    fn try_from(nested: Nested) -> Result<Self, Self::Error> {
        NdArray::from_nested(nested)
    }
}

impl From<NdArray> for Nested {
    fn from(table: NdArray) -> Self {
        table.to_nested()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_operators() {
        let mut table = NdArray::from_nested([[1, 2], [3, 4]]).unwrap();
        assert_eq!(table[&[1, 1][..]], Value::Int(4));
        table[&[0, 0][..]] = Value::from("corner");
        assert_eq!(table.get(&[0, 0]).unwrap(), &Value::from("corner"));
    }

    #[test]
    #[should_panic(expected = "Index error")]
    fn test_index_out_of_bounds_panics() {
        let table = NdArray::from_nested([1, 2]).unwrap();
        let _ = &table[&[5][..]];
    }

    #[test]
    fn test_display_matches_nested() {
        let table = NdArray::from_nested([[1, 2], [3, 4]]).unwrap();
        assert_eq!(table.to_string(), Nested::from([[1, 2], [3, 4]]).to_string());
    }

    #[test]
    fn test_debug_names_shape() {
        let table = NdArray::from_nested([1]).unwrap();
        let debug = format!("{table:?}");
        assert!(debug.starts_with("NdArray"));
        assert!(debug.contains("shape: [1]"));
    }

    #[test]
    fn test_nested_conversions() {
        let nested = Nested::from([["a", "b"]]);
        let table = NdArray::try_from(nested.clone()).unwrap();
        assert_eq!(table.shape(), &[1, 2]);
        assert_eq!(Nested::from(table), nested);
    }
}
