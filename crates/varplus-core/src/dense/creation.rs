//! Table creation from an explicit shape and fill value

use smallvec::SmallVec;

use super::functions::checked_size;
use super::types::NdArray;
use crate::error::{Result, TableError};
use crate::value::Value;

impl NdArray {
    /// Create a table of the given shape with every leaf set to `fill`
    ///
    /// # Errors
    ///
    /// Returns [`TableError::Shape`] if `shape` is empty or its product
    /// overflows `usize`.
    ///
    /// # Examples
    ///
    /// ```
    /// use varplus_core::{NdArray, Value};
    ///
    /// let table = NdArray::create(&[3, 4, 5], 0).unwrap();
    /// assert_eq!(table.size(), 60);
    ///
    /// let labels = NdArray::create(&[2], "n/a").unwrap();
    /// assert_eq!(labels.get(&[1]).unwrap(), &Value::from("n/a"));
    ///
    /// assert!(NdArray::create(&[], 0).unwrap_err().is_shape());
    /// ```
    pub fn create(shape: &[usize], fill: impl Into<Value>) -> Result<Self> {
        if shape.is_empty() {
            return Err(TableError::shape("shape cannot be empty"));
        }
        let total = checked_size(shape)?;
        Ok(Self::from_parts(
            SmallVec::from_slice(shape),
            vec![fill.into(); total],
        ))
    }

    /// Alias of [`create`](Self::create)
    pub fn full(shape: &[usize], value: impl Into<Value>) -> Result<Self> {
        Self::create(shape, value)
    }

    /// Create a table of integer zeros
    pub fn zeros(shape: &[usize]) -> Result<Self> {
        Self::create(shape, 0)
    }

    /// Create a table of integer ones
    pub fn ones(shape: &[usize]) -> Result<Self> {
        Self::create(shape, 1)
    }

    /// One-axis table of `length` copies of `fill`
    pub fn create_1d(length: usize, fill: impl Into<Value>) -> Self {
        Self::from_parts(SmallVec::from_slice(&[length]), vec![fill.into(); length])
    }

    /// `rows x cols` table of `fill`
    ///
    /// Fails with [`TableError::Shape`] if `rows * cols` overflows.
    pub fn create_2d(rows: usize, cols: usize, fill: impl Into<Value>) -> Result<Self> {
        Self::create(&[rows, cols], fill)
    }

    /// `depth x rows x cols` table of `fill`
    pub fn create_3d(
        depth: usize,
        rows: usize,
        cols: usize,
        fill: impl Into<Value>,
    ) -> Result<Self> {
        Self::create(&[depth, rows, cols], fill)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeros_and_ones() {
        let zeros = NdArray::zeros(&[2, 3]).unwrap();
        assert!(zeros.iter().all(|v| *v == Value::Int(0)));
        let ones = NdArray::ones(&[4]).unwrap();
        assert!(ones.iter().all(|v| *v == Value::Int(1)));
        assert_eq!(ones.shape(), &[4]);
    }

    #[test]
    fn test_create_with_zero_axis() {
        let table = NdArray::create(&[2, 0, 3], Value::Null).unwrap();
        assert_eq!(table.shape(), &[2, 0, 3]);
        assert_eq!(table.size(), 0);
    }

    #[test]
    fn test_create_rejects_overflowing_shape() {
        assert!(NdArray::create(&[usize::MAX, 2], 0).unwrap_err().is_shape());
        assert!(NdArray::create_2d(usize::MAX, 2, 0).unwrap_err().is_shape());
        assert!(NdArray::create_3d(2, usize::MAX, 2, 0).unwrap_err().is_shape());
        // a zero axis keeps the product in range
        assert_eq!(NdArray::create(&[usize::MAX, 0], 0).unwrap().size(), 0);
    }

    #[test]
    fn test_fixed_rank_factories() {
        assert_eq!(NdArray::create_1d(5, 1.5).shape(), &[5]);
        assert_eq!(NdArray::create_2d(3, 4, 0).unwrap().shape(), &[3, 4]);
        let cube = NdArray::create_3d(2, 3, 4, "x").unwrap();
        assert_eq!(cube.shape(), &[2, 3, 4]);
        assert_eq!(cube.get(&[1, 2, 3]).unwrap(), &Value::from("x"));
    }

    #[test]
    fn test_full_matches_create() {
        assert_eq!(
            NdArray::full(&[2, 2], true).unwrap(),
            NdArray::create(&[2, 2], true).unwrap()
        );
    }
}
