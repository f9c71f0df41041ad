//! Element-wise operations on tables
//!
//! Every operation visits the leaves in row-major order and returns a table
//! of the same shape, except [`NdArray::fill`] which works in place.

use super::types::NdArray;
use crate::error::{Result, TableError};
use crate::value::Value;

impl NdArray {
    /// Apply a function to every leaf, returning a new table
    ///
    /// # Examples
    ///
    /// ```
    /// use varplus_core::{NdArray, Value};
    ///
    /// let table = NdArray::from_nested([[1, 2], [3, 4]]).unwrap();
    /// let labels = table.apply(|v| Value::from(format!("#{v}")));
    /// assert_eq!(labels.get(&[1, 0]).unwrap(), &Value::from("#3"));
    /// ```
    pub fn apply<F>(&self, f: F) -> Self
    where
        F: Fn(&Value) -> Value,
    {
        Self::from_parts(self.shape.clone(), self.data.iter().map(f).collect())
    }

    /// Apply a fallible function to every leaf
    ///
    /// Stops at the first error in row-major order.
    pub fn try_apply<F>(&self, f: F) -> Result<Self>
    where
        F: Fn(&Value) -> Result<Value>,
    {
        let data = self.data.iter().map(f).collect::<Result<Vec<_>>>()?;
        Ok(Self::from_parts(self.shape.clone(), data))
    }

    /// Substitute leaves through a lookup table
    ///
    /// A leaf equal to a key is replaced by the paired value; numeric keys
    /// match by value, so `1` matches `1.0`. Leaves without a matching key
    /// are kept. The first matching pair wins.
    ///
    /// # Examples
    ///
    /// ```
    /// use varplus_core::{NdArray, Value};
    ///
    /// let table = NdArray::from_nested([1, 2, 3]).unwrap();
    /// let mapped = table.map_values(&[
    ///     (Value::Float(1.0), Value::from("one")),
    ///     (Value::Int(3), Value::from("three")),
    /// ]);
    /// assert_eq!(mapped.to_flat_vec(), vec![
    ///     Value::from("one"),
    ///     Value::Int(2),
    ///     Value::from("three"),
    /// ]);
    /// ```
    pub fn map_values(&self, mapping: &[(Value, Value)]) -> Self {
        self.apply(|v| {
            mapping
                .iter()
                .find(|(key, _)| key.loose_eq(v))
                .map_or_else(|| v.clone(), |(_, mapped)| mapped.clone())
        })
    }

    /// Set every leaf to `value` in place
    pub fn fill(&mut self, value: impl Into<Value>) {
        let value = value.into();
        self.data.iter_mut().for_each(|x| *x = value.clone());
    }

    /// Leafwise numeric addition of two equally shaped tables
    ///
    /// # Errors
    ///
    /// - [`TableError::Shape`] if the shapes differ
    /// - [`TableError::Type`] if a pair of leaves is not numeric
    ///
    /// # Examples
    ///
    /// ```
    /// use varplus_core::NdArray;
    ///
    /// let a = NdArray::from_nested([[1, 2], [3, 4]]).unwrap();
    /// let b = NdArray::from_nested([[10, 20], [30, 40]]).unwrap();
    /// assert_eq!(a.add(&b).unwrap(), NdArray::from_nested([[11, 22], [33, 44]]).unwrap());
    /// ```
    pub fn add(&self, other: &NdArray) -> Result<Self> {
        if !self.same_shape(other) {
            return Err(TableError::shape(format!(
                "cannot add tables of shapes {:?} and {:?}",
                self.shape(),
                other.shape()
            )));
        }
        let data = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(a, b)| a.checked_add(b))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_parts(self.shape.clone(), data))
    }

    /// Multiply every leaf by a numeric scalar
    ///
    /// # Errors
    ///
    /// Returns [`TableError::Type`] if the scalar or any leaf is not numeric.
    ///
    /// # Examples
    ///
    /// ```
    /// use varplus_core::{NdArray, Value};
    ///
    /// let table = NdArray::from_nested([1, 2, 3]).unwrap();
    /// let scaled = table.multiply_scalar(2.5).unwrap();
    /// assert_eq!(scaled.first(), Some(&Value::Float(2.5)));
    /// ```
    pub fn multiply_scalar(&self, scalar: impl Into<Value>) -> Result<Self> {
        let scalar = scalar.into();
        self.try_apply(|v| v.checked_mul(&scalar))
    }
}
