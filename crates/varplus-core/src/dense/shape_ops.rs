//! Shape manipulation operations on tables
//!
//! This module provides flatten, reshape, transpose/permute and
//! squeeze/unsqueeze. Every operation returns a new, independent table and
//! preserves row-major leaf order where the axis order is unchanged.

use smallvec::SmallVec;

use super::functions::{checked_size, unravel};
use super::types::NdArray;
use crate::error::{Result, TableError};
use crate::types::Shape;

impl NdArray {
    /// Flatten to one axis in row-major order
    ///
    /// # Examples
    ///
    /// ```
    /// use varplus_core::{NdArray, Value};
    ///
    /// let table = NdArray::from_nested([[1, 2, 3], [4, 5, 6]]).unwrap();
    /// let flat = table.flatten();
    /// assert_eq!(flat.shape(), &[6]);
    /// assert_eq!(flat.to_flat_vec(), (1..=6).map(Value::from).collect::<Vec<_>>());
    /// ```
    pub fn flatten(&self) -> Self {
        Self::from_parts(SmallVec::from_slice(&[self.size()]), self.data.clone())
    }

    /// Reshape the table to a new shape
    ///
    /// The leaves keep their row-major order: the flat sequence is cut into
    /// `new_shape[0]` groups of `product(new_shape[1..])`, recursively.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::Shape`] if `new_shape` is empty or its product
    /// differs from [`size`](Self::size).
    ///
    /// # Examples
    ///
    /// ```
    /// use varplus_core::NdArray;
    ///
    /// let table = NdArray::from_nested([1, 2, 3, 4, 5, 6]).unwrap();
    /// let grid = table.reshape(&[2, 3]).unwrap();
    /// assert_eq!(grid, NdArray::from_nested([[1, 2, 3], [4, 5, 6]]).unwrap());
    ///
    /// assert!(table.reshape(&[4, 2]).unwrap_err().is_shape());
    /// ```
    pub fn reshape(&self, new_shape: &[usize]) -> Result<Self> {
        if new_shape.is_empty() {
            return Err(TableError::shape("cannot reshape to an empty shape"));
        }
        let new_size = checked_size(new_shape)?;
        if new_size != self.size() {
            return Err(TableError::shape(format!(
                "cannot reshape size {} from {:?} to {:?} (size {})",
                self.size(),
                self.shape(),
                new_shape,
                new_size
            )));
        }
        tracing::debug!(from = ?self.shape(), to = ?new_shape, "reshape");
        Ok(Self::from_parts(
            SmallVec::from_slice(new_shape),
            self.data.clone(),
        ))
    }

    /// Swap the two axes of a two-dimensional table
    ///
    /// `result[j][i] == self[i][j]`; applying it twice gives back the input.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::DimensionMismatch`] unless the table has exactly
    /// two axes.
    ///
    /// # Examples
    ///
    /// ```
    /// use varplus_core::NdArray;
    ///
    /// let table = NdArray::from_nested([[1, 2, 3], [4, 5, 6]]).unwrap();
    /// let t = table.transpose().unwrap();
    /// assert_eq!(t, NdArray::from_nested([[1, 4], [2, 5], [3, 6]]).unwrap());
    /// assert_eq!(t.transpose().unwrap(), table);
    /// ```
    pub fn transpose(&self) -> Result<Self> {
        if self.ndim() != 2 {
            return Err(TableError::dimension(format!(
                "transpose only works on 2D tables, got {} dimensions",
                self.ndim()
            )));
        }
        self.permute(&[1, 0])
    }

    /// Permute the axes of the table
    ///
    /// Axis `i` of the result is axis `axes[i]` of `self`.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::DimensionMismatch`] if `axes` is not a
    /// permutation of `0..ndim`.
    ///
    /// # Examples
    ///
    /// ```
    /// use varplus_core::NdArray;
    ///
    /// let table = NdArray::zeros(&[2, 3, 4]).unwrap();
    /// let permuted = table.permute(&[2, 0, 1]).unwrap();
    /// assert_eq!(permuted.shape(), &[4, 2, 3]);
    /// ```
    pub fn permute(&self, axes: &[usize]) -> Result<Self> {
        let rank = self.ndim();
        if axes.len() != rank {
            return Err(TableError::dimension(format!(
                "permutation length {} does not match table rank {}",
                axes.len(),
                rank
            )));
        }
        let mut seen = vec![false; rank];
        for &axis in axes {
            if axis >= rank {
                return Err(TableError::dimension(format!(
                    "invalid axis {axis} for rank {rank}"
                )));
            }
            if seen[axis] {
                return Err(TableError::dimension(format!(
                    "duplicate axis {axis} in permutation"
                )));
            }
            seen[axis] = true;
        }

        let src_strides = self.strides();
        let new_shape: Shape = axes.iter().map(|&a| self.shape[a]).collect();
        let mut index = vec![0; rank];
        let data = (0..self.size())
            .map(|linear| {
                unravel(linear, &new_shape, &mut index);
                let offset: usize = index
                    .iter()
                    .zip(axes)
                    .map(|(&i, &a)| i * src_strides[a])
                    .sum();
                self.data[offset].clone()
            })
            .collect();
        Ok(Self::from_parts(new_shape, data))
    }

    /// Remove all axes of length 1
    ///
    /// A table whose axes all have length 1 becomes shape `(1,)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use varplus_core::NdArray;
    ///
    /// let table = NdArray::zeros(&[1, 3, 1, 5, 1]).unwrap();
    /// assert_eq!(table.squeeze().shape(), &[3, 5]);
    /// ```
    pub fn squeeze(&self) -> Self {
        let mut new_shape: Shape = self.shape.iter().copied().filter(|&s| s != 1).collect();
        if new_shape.is_empty() {
            new_shape.push(1);
        }
        Self::from_parts(new_shape, self.data.clone())
    }

    /// Insert an axis of length 1 at position `axis`
    ///
    /// # Errors
    ///
    /// Returns [`TableError::DimensionMismatch`] if `axis > ndim`.
    ///
    /// # Examples
    ///
    /// ```
    /// use varplus_core::NdArray;
    ///
    /// let table = NdArray::zeros(&[3, 5]).unwrap();
    /// assert_eq!(table.unsqueeze(1).unwrap().shape(), &[3, 1, 5]);
    /// assert_eq!(table.unsqueeze(2).unwrap().shape(), &[3, 5, 1]);
    /// ```
    pub fn unsqueeze(&self, axis: usize) -> Result<Self> {
        if axis > self.ndim() {
            return Err(TableError::dimension(format!(
                "axis {} out of bounds for unsqueeze of rank {}",
                axis,
                self.ndim()
            )));
        }
        let mut new_shape = self.shape.clone();
        new_shape.insert(axis, 1);
        Ok(Self::from_parts(new_shape, self.data.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::shape_size;
    use crate::value::Value;

    fn counting(shape: &[usize]) -> NdArray {
        let leaves = (0..shape_size(shape) as i64).map(Value::Int).collect();
        NdArray::from_flat(leaves, shape).unwrap()
    }

    #[test]
    fn test_reshape_identity() {
        let table = counting(&[2, 3, 4]);
        assert_eq!(table.reshape(&[2, 3, 4]).unwrap(), table);
    }

    #[test]
    fn test_reshape_rejects_empty_shape() {
        let table = counting(&[1]);
        assert!(table.reshape(&[]).unwrap_err().is_shape());
    }

    #[test]
    fn test_reshape_rejects_overflowing_shape() {
        let table = counting(&[3]);
        let err = table.reshape(&[usize::MAX, 3]).unwrap_err();
        assert!(err.is_shape());
        assert!(err.to_string().contains("overflows"));
        assert!(table.reshape(&[usize::MAX / 2 + 1, 2, 0]).unwrap_err().is_shape());
    }

    #[test]
    fn test_reshape_nested_layout() {
        let table = counting(&[12]).reshape(&[2, 3, 2]).unwrap();
        assert_eq!(table.get(&[1, 0, 1]).unwrap(), &Value::Int(7));
        assert_eq!(table.get(&[0, 2, 0]).unwrap(), &Value::Int(4));
    }

    #[test]
    fn test_reshape_zero_size() {
        let table = NdArray::empty();
        assert_eq!(table.reshape(&[0, 5]).unwrap().shape(), &[0, 5]);
        assert!(table.reshape(&[1]).unwrap_err().is_shape());
    }

    #[test]
    fn test_transpose_rank_checked() {
        assert!(counting(&[4]).transpose().unwrap_err().is_dimension_mismatch());
        assert!(counting(&[2, 2, 2])
            .transpose()
            .unwrap_err()
            .is_dimension_mismatch());
    }

    #[test]
    fn test_permute_values() {
        let table = counting(&[2, 3, 4]);
        let permuted = table.permute(&[2, 0, 1]).unwrap();
        for i in 0..2 {
            for j in 0..3 {
                for k in 0..4 {
                    assert_eq!(
                        permuted.get(&[k, i, j]).unwrap(),
                        table.get(&[i, j, k]).unwrap()
                    );
                }
            }
        }
    }

    #[test]
    fn test_permute_validation() {
        let table = counting(&[2, 3]);
        assert!(table.permute(&[0]).unwrap_err().is_dimension_mismatch());
        assert!(table.permute(&[0, 0]).unwrap_err().is_dimension_mismatch());
        assert!(table.permute(&[0, 2]).unwrap_err().is_dimension_mismatch());
    }

    #[test]
    fn test_squeeze_all_ones() {
        let table = counting(&[1, 1]);
        assert_eq!(table.squeeze().shape(), &[1]);
    }

    #[test]
    fn test_unsqueeze_out_of_range() {
        assert!(counting(&[3]).unsqueeze(2).unwrap_err().is_dimension_mismatch());
    }
}
