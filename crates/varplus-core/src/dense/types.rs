//! Table type definition and basic accessors
//!
//! This module defines the core `NdArray` type and provides construction and
//! accessor methods. Transformations are organized in sibling modules.

use smallvec::SmallVec;

use super::functions::checked_size;
use crate::error::{Result, TableError};
use crate::nested::Nested;
use crate::types::{row_major_strides, shape_size, Shape};
use crate::value::Value;

/// Dense N-dimensional table of dynamic values
///
/// Leaves are stored in one flat row-major buffer next to the shape
/// descriptor, so the last index varies fastest when iterating and no
/// per-level allocation is needed. The shape always has at least one axis.
///
/// Cloning produces a fully independent table.
///
/// # Examples
///
/// ```
/// use varplus_core::NdArray;
///
/// let table = NdArray::from_nested([[1, 2, 3], [4, 5, 6]]).unwrap();
/// assert_eq!(table.shape(), &[2, 3]);
/// assert_eq!(table.ndim(), 2);
/// assert_eq!(table.size(), 6);
/// ```
#[derive(Clone, PartialEq)]
pub struct NdArray {
    pub(crate) shape: Shape,
    /// Row-major leaves; `data.len() == shape_size(&shape)`
    pub(crate) data: Vec<Value>,
}

impl NdArray {
    /// Build a table from a nested literal, validating rectangularity
    ///
    /// # Errors
    ///
    /// Returns [`TableError::Shape`] for jagged input, leaves mixed with
    /// lists on one level, or a bare leaf.
    ///
    /// # Examples
    ///
    /// ```
    /// use varplus_core::NdArray;
    ///
    /// let table = NdArray::from_nested([[1, 2], [3, 4]]).unwrap();
    /// assert_eq!(table.shape(), &[2, 2]);
    ///
    /// let jagged = NdArray::from_nested(vec![vec![1, 2], vec![3]]);
    /// assert!(jagged.unwrap_err().is_shape());
    ///
    /// let empty = NdArray::from_nested(Vec::<i64>::new()).unwrap();
    /// assert_eq!(empty.shape(), &[0]);
    /// ```
    pub fn from_nested(nested: impl Into<Nested>) -> Result<Self> {
        let nested = nested.into();
        let shape = nested.shape()?;
        let mut data = Vec::with_capacity(shape_size(&shape));
        nested.flatten_into(&mut data);
        Ok(Self { shape, data })
    }

    /// Deep copy of another table
    pub fn from_array(other: &NdArray) -> Self {
        other.clone()
    }

    /// Create a table from row-major leaves with the given shape
    ///
    /// # Errors
    ///
    /// Returns [`TableError::Shape`] if `shape` is empty or its product does
    /// not match the number of leaves.
    ///
    /// # Examples
    ///
    /// ```
    /// use varplus_core::{NdArray, Value};
    ///
    /// let leaves: Vec<Value> = (1..=6).map(Value::from).collect();
    /// let table = NdArray::from_flat(leaves, &[2, 3]).unwrap();
    /// assert_eq!(table.get(&[1, 0]).unwrap(), &Value::Int(4));
    /// ```
    pub fn from_flat(data: Vec<Value>, shape: &[usize]) -> Result<Self> {
        if shape.is_empty() {
            return Err(TableError::shape("shape cannot be empty"));
        }
        let total = checked_size(shape)?;
        if data.len() != total {
            return Err(TableError::shape(format!(
                "data size {} doesn't match shape {:?} (size {})",
                data.len(),
                shape,
                total
            )));
        }
        Ok(Self {
            shape: SmallVec::from_slice(shape),
            data,
        })
    }

    /// Internal constructor for results whose shape is known to be consistent
    pub(crate) fn from_parts(shape: Shape, data: Vec<Value>) -> Self {
        debug_assert!(!shape.is_empty());
        debug_assert_eq!(shape_size(&shape), data.len());
        Self { shape, data }
    }

    /// The `(0,)` table
    pub fn empty() -> Self {
        Self::from_parts(SmallVec::from_slice(&[0]), Vec::new())
    }

    /// Number of axes
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Alias of [`ndim`](Self::ndim)
    pub fn rank(&self) -> usize {
        self.ndim()
    }

    /// Extent of every axis
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Owned copy of the shape
    pub fn shape_vec(&self) -> Vec<usize> {
        self.shape.to_vec()
    }

    /// Total number of leaves (0 if any axis is empty)
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Total number of leaves
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the table has zero leaves
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Length of the first axis
    pub fn rows(&self) -> usize {
        self.shape[0]
    }

    /// Row-major strides of this table
    pub fn strides(&self) -> Shape {
        row_major_strides(&self.shape)
    }

    /// Check if two tables have the same shape
    pub fn same_shape(&self, other: &Self) -> bool {
        self.shape == other.shape
    }

    /// Leaves in row-major order
    pub fn as_slice(&self) -> &[Value] {
        &self.data
    }

    /// Consume the table, returning its row-major leaves
    pub fn into_vec(self) -> Vec<Value> {
        self.data
    }

    /// Iterate over all leaves in row-major order
    ///
    /// # Examples
    ///
    /// ```
    /// use varplus_core::NdArray;
    ///
    /// let table = NdArray::from_nested([[1, 2], [3, 4]]).unwrap();
    /// let ints: Vec<i64> = table.iter().filter_map(|v| v.as_i64()).collect();
    /// assert_eq!(ints, vec![1, 2, 3, 4]);
    /// ```
    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.data.iter()
    }

    /// Mutable iteration over all leaves in row-major order
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Value> {
        self.data.iter_mut()
    }

    /// Fill the table with values produced from each multi-dimensional index
    ///
    /// # Examples
    ///
    /// ```
    /// use varplus_core::{NdArray, Value};
    ///
    /// let mut table = NdArray::zeros(&[2, 3]).unwrap();
    /// table.fill_with(|idx| Value::Int((idx[0] * 10 + idx[1]) as i64));
    /// assert_eq!(table.get(&[1, 2]).unwrap(), &Value::Int(12));
    /// ```
    pub fn fill_with<F>(&mut self, mut f: F)
    where
        F: FnMut(&[usize]) -> Value,
    {
        let mut index = vec![0; self.ndim()];
        for linear in 0..self.data.len() {
            super::functions::unravel(linear, &self.shape, &mut index);
            self.data[linear] = f(&index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_nested_three_dims() {
        let table = NdArray::from_nested([[[1, 2], [3, 4]], [[5, 6], [7, 8]]]).unwrap();
        assert_eq!(table.shape(), &[2, 2, 2]);
        assert_eq!(table.size(), 8);
        assert_eq!(table.as_slice()[7], Value::Int(8));
    }

    #[test]
    fn test_from_array_is_independent() {
        let a = NdArray::from_nested([[1, 2], [3, 4]]).unwrap();
        let mut b = NdArray::from_array(&a);
        b.set(&[0, 0], Value::Int(99)).unwrap();
        assert_eq!(a.get(&[0, 0]).unwrap(), &Value::Int(1));
        assert_eq!(b.get(&[0, 0]).unwrap(), &Value::Int(99));
    }

    #[test]
    fn test_from_flat_validates() {
        assert!(NdArray::from_flat(vec![Value::Null; 5], &[2, 3])
            .unwrap_err()
            .is_shape());
        assert!(NdArray::from_flat(vec![], &[]).unwrap_err().is_shape());
        let zero = NdArray::from_flat(vec![], &[3, 0]).unwrap();
        assert_eq!(zero.shape(), &[3, 0]);
        assert!(zero.is_empty());
    }

    #[test]
    fn test_from_flat_rejects_overflowing_shape() {
        // the unchecked product wraps to zero and would match an empty buffer
        let huge = [1usize << (usize::BITS - 1), 2];
        assert!(NdArray::from_flat(vec![], &huge).unwrap_err().is_shape());
    }

    #[test]
    fn test_empty_table() {
        let table = NdArray::empty();
        assert_eq!(table.shape(), &[0]);
        assert_eq!(table.ndim(), 1);
        assert_eq!(table.size(), 0);
        assert_eq!(table.rows(), 0);
    }

    #[test]
    fn test_leaf_only_input_rejected() {
        assert!(NdArray::from_nested(3).unwrap_err().is_shape());
    }
}
