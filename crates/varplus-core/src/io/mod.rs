//! Serialization adapters
//!
//! Conversions between [`NdArray`] and its interchange forms: flat leaf
//! lists, the [`Nested`] container, the [`ArrayRecord`] dictionary, JSON
//! text and files, and CSV text.

mod csv;
mod json;
pub mod record;

pub use record::ArrayRecord;

use crate::dense::NdArray;
use crate::nested::Nested;
use crate::value::Value;

impl NdArray {
    /// Row-major copy of every leaf
    ///
    /// Round-trips with [`from_flat`](NdArray::from_flat).
    ///
    /// # Examples
    ///
    /// ```
    /// use varplus_core::{NdArray, Value};
    ///
    /// let table = NdArray::from_nested([[1, 2], [3, 4]]).unwrap();
    /// let flat = table.to_flat_vec();
    /// assert_eq!(flat, (1..=4).map(Value::from).collect::<Vec<_>>());
    /// assert_eq!(NdArray::from_flat(flat, table.shape()).unwrap(), table);
    /// ```
    pub fn to_flat_vec(&self) -> Vec<Value> {
        self.data.clone()
    }

    /// Deep copy in nested-container form
    ///
    /// Zero-length inner axes have no leaves to carry them, so a `(0, 3)`
    /// table comes back as the empty list.
    pub fn to_nested(&self) -> Nested {
        Nested::from_flat(&self.data, &self.shape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_nested_three_axes() {
        let table = NdArray::from_nested([[[1, 2]], [[3, 4]]]).unwrap();
        assert_eq!(table.to_nested(), Nested::from([[[1, 2]], [[3, 4]]]));
    }

    #[test]
    fn test_to_nested_is_detached() {
        let mut table = NdArray::from_nested([1, 2]).unwrap();
        let snapshot = table.to_nested();
        table.fill(0);
        assert_eq!(snapshot, Nested::from([1, 2]));
    }
}
