//! Indexing and selection operations on tables
//!
//! This module provides element access, row access, multi-axis slicing and
//! index-array selection along one axis.

use smallvec::SmallVec;

use super::functions::gather;
use super::types::NdArray;
use crate::error::{Result, TableError};
use crate::nested::Nested;
use crate::types::{shape_size, AxisSlice, Shape};
use crate::value::Value;

impl NdArray {
    /// Flat offset of a full-length index, validating every position
    pub(crate) fn offset(&self, index: &[usize]) -> Result<usize> {
        if index.len() > self.ndim() {
            return Err(TableError::index(format!(
                "cannot index further at dimension {}: table has {} dimensions",
                self.ndim(),
                self.ndim()
            )));
        }
        if index.len() < self.ndim() {
            return Err(TableError::dimension(format!(
                "expected {} indices, got {}",
                self.ndim(),
                index.len()
            )));
        }
        self.prefix_offset(index)
    }

    /// Flat offset of the first leaf under `prefix`
    fn prefix_offset(&self, prefix: &[usize]) -> Result<usize> {
        let strides = self.strides();
        let mut offset = 0;
        for (axis, &idx) in prefix.iter().enumerate() {
            if idx >= self.shape[axis] {
                return Err(TableError::index(format!(
                    "index {} out of bounds for dimension {} with size {}",
                    idx, axis, self.shape[axis]
                )));
            }
            offset += idx * strides[axis];
        }
        Ok(offset)
    }

    /// Get the leaf at a full-length index
    ///
    /// # Errors
    ///
    /// - [`TableError::DimensionMismatch`] if fewer indices than axes are given
    /// - [`TableError::Index`] if a position is out of range or more indices
    ///   than axes are given
    ///
    /// # Examples
    ///
    /// ```
    /// use varplus_core::{NdArray, Value};
    ///
    /// let table = NdArray::from_nested([[1, 2], [3, 4]]).unwrap();
    /// assert_eq!(table.get(&[0, 1]).unwrap(), &Value::Int(2));
    /// assert!(table.get(&[2, 0]).unwrap_err().is_index());
    /// assert!(table.get(&[0, 0, 0]).unwrap_err().is_index());
    /// ```
    pub fn get(&self, index: &[usize]) -> Result<&Value> {
        let offset = self.offset(index)?;
        Ok(&self.data[offset])
    }

    /// Mutable access to the leaf at a full-length index
    pub fn get_mut(&mut self, index: &[usize]) -> Result<&mut Value> {
        let offset = self.offset(index)?;
        Ok(&mut self.data[offset])
    }

    /// Replace the leaf at a full-length index
    ///
    /// The index is validated before anything is written.
    ///
    /// # Examples
    ///
    /// ```
    /// use varplus_core::{NdArray, Value};
    ///
    /// let mut table = NdArray::zeros(&[2, 2]).unwrap();
    /// table.set(&[1, 0], 5).unwrap();
    /// assert_eq!(table.get(&[1, 0]).unwrap(), &Value::Int(5));
    /// assert!(table.set(&[1, 2], 5).is_err());
    /// ```
    pub fn set(&mut self, index: &[usize], value: impl Into<Value>) -> Result<()> {
        let offset = self.offset(index)?;
        self.data[offset] = value.into();
        Ok(())
    }

    /// Row access: the sub-structure under an index prefix
    ///
    /// A prefix shorter than [`ndim`](Self::ndim) returns the remaining axes
    /// as a [`Nested`] list; a full-length prefix returns the leaf.
    ///
    /// # Examples
    ///
    /// ```
    /// use varplus_core::{NdArray, Nested};
    ///
    /// let table = NdArray::from_nested([[1, 2, 3], [4, 5, 6]]).unwrap();
    /// assert_eq!(table.get_nested(&[1]).unwrap(), Nested::from([4, 5, 6]));
    /// assert_eq!(table.get_nested(&[1, 2]).unwrap(), Nested::from(6));
    /// ```
    pub fn get_nested(&self, prefix: &[usize]) -> Result<Nested> {
        if prefix.len() > self.ndim() {
            return Err(TableError::index(format!(
                "cannot index further at dimension {}",
                self.ndim()
            )));
        }
        let start = self.prefix_offset(prefix)?;
        let rest = &self.shape[prefix.len()..];
        if rest.is_empty() {
            return Ok(Nested::Leaf(self.data[start].clone()));
        }
        let block = shape_size(rest);
        Ok(Nested::from_flat(&self.data[start..start + block], rest))
    }

    /// Row `i` of the first axis as a new table
    ///
    /// For a one-axis table the row is a single leaf, returned as shape `(1,)`.
    pub fn row(&self, i: usize) -> Result<Self> {
        let start = self.prefix_offset(&[i])?;
        let rest: Shape = if self.ndim() > 1 {
            SmallVec::from_slice(&self.shape[1..])
        } else {
            SmallVec::from_slice(&[1])
        };
        let block = shape_size(&rest);
        Ok(Self::from_parts(
            rest,
            self.data[start..start + block].to_vec(),
        ))
    }

    /// First leaf in row-major order
    pub fn first(&self) -> Option<&Value> {
        self.data.first()
    }

    /// Last leaf in row-major order
    pub fn last(&self) -> Option<&Value> {
        self.data.last()
    }

    /// Slice the table axis by axis
    ///
    /// Axes beyond `spec` are kept whole. [`AxisSlice::Index`] removes its
    /// axis; if every axis is removed the single leaf comes back as shape
    /// `(1,)`.
    ///
    /// # Errors
    ///
    /// - [`TableError::DimensionMismatch`] if `spec` names more axes than exist
    /// - [`TableError::Index`] for an out-of-range index or a zero step
    ///
    /// # Examples
    ///
    /// ```
    /// use varplus_core::{AxisSlice, NdArray};
    ///
    /// let table = NdArray::from_nested([[1, 2, 3, 4], [5, 6, 7, 8], [9, 10, 11, 12]]).unwrap();
    ///
    /// let block = table.slice(&[(0..2).into(), (1..3).into()]).unwrap();
    /// assert_eq!(block, NdArray::from_nested([[2, 3], [6, 7]]).unwrap());
    ///
    /// let column = table.slice(&[AxisSlice::Full, AxisSlice::Index(0)]).unwrap();
    /// assert_eq!(column, NdArray::from_nested([1, 5, 9]).unwrap());
    ///
    /// let strided = table.slice(&[AxisSlice::stepped(0, 3, 2)]).unwrap();
    /// assert_eq!(strided.shape(), &[2, 4]);
    /// ```
    pub fn slice(&self, spec: &[AxisSlice]) -> Result<Self> {
        if spec.len() > self.ndim() {
            return Err(TableError::dimension(format!(
                "slice names {} axes but the table has {}",
                spec.len(),
                self.ndim()
            )));
        }

        let mut selection = Vec::with_capacity(self.ndim());
        let mut new_shape = Shape::new();
        for (axis, &len) in self.shape.iter().enumerate() {
            let axis_spec = spec.get(axis).copied().unwrap_or(AxisSlice::Full);
            let (positions, keep) = axis_spec.resolve(axis, len)?;
            if keep {
                new_shape.push(positions.len());
            }
            selection.push(positions);
        }
        if new_shape.is_empty() {
            new_shape.push(1);
        }

        let data = gather(&self.data, &self.shape, &selection);
        Ok(Self::from_parts(new_shape, data))
    }

    /// Select positions along one axis, in the given order
    ///
    /// # Errors
    ///
    /// Returns [`TableError::DimensionMismatch`] for an invalid axis and
    /// [`TableError::Index`] for an out-of-range position.
    ///
    /// # Examples
    ///
    /// ```
    /// use varplus_core::NdArray;
    ///
    /// let table = NdArray::from_nested([[1, 2, 3], [4, 5, 6]]).unwrap();
    /// let picked = table.select_indices(&[2, 0], 1).unwrap();
    /// assert_eq!(picked, NdArray::from_nested([[3, 1], [6, 4]]).unwrap());
    /// ```
    pub fn select_indices(&self, indices: &[usize], axis: usize) -> Result<Self> {
        self.check_axis(axis)?;
        if let Some(&bad) = indices.iter().find(|&&i| i >= self.shape[axis]) {
            return Err(TableError::index(format!(
                "index {} out of bounds for axis {} with size {}",
                bad, axis, self.shape[axis]
            )));
        }

        let selection: Vec<Vec<usize>> = self
            .shape
            .iter()
            .enumerate()
            .map(|(d, &len)| {
                if d == axis {
                    indices.to_vec()
                } else {
                    (0..len).collect()
                }
            })
            .collect();

        let mut new_shape = self.shape.clone();
        new_shape[axis] = indices.len();
        let data = gather(&self.data, &self.shape, &selection);
        Ok(Self::from_parts(new_shape, data))
    }

    /// Contiguous `[start, end)` range along one axis
    pub(crate) fn select_range(&self, axis: usize, start: usize, end: usize) -> Result<Self> {
        let indices: Vec<usize> = (start..end).collect();
        self.select_indices(&indices, axis)
    }

    pub(crate) fn check_axis(&self, axis: usize) -> Result<()> {
        if axis >= self.ndim() {
            return Err(TableError::dimension(format!(
                "axis {} out of bounds for {}-dimensional table",
                axis,
                self.ndim()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> NdArray {
        NdArray::from_nested([[1, 2, 3, 4], [5, 6, 7, 8], [9, 10, 11, 12]]).unwrap()
    }

    #[test]
    fn test_get_requires_full_index() {
        let table = grid();
        assert!(table.get(&[1]).unwrap_err().is_dimension_mismatch());
        assert_eq!(table.get(&[2, 3]).unwrap(), &Value::Int(12));
    }

    #[test]
    fn test_set_is_atomic_on_error() {
        let mut table = grid();
        let before = table.clone();
        assert!(table.set(&[3, 0], 0).unwrap_err().is_index());
        assert!(table.set(&[0, 4], 0).unwrap_err().is_index());
        assert_eq!(table, before);
    }

    #[test]
    fn test_get_nested_prefixes() {
        let cube = NdArray::create(&[2, 2, 2], 0).unwrap();
        assert_eq!(
            cube.get_nested(&[]).unwrap(),
            Nested::from([[[0, 0], [0, 0]], [[0, 0], [0, 0]]])
        );
        assert_eq!(cube.get_nested(&[1]).unwrap(), Nested::from([[0, 0], [0, 0]]));
        assert!(cube.get_nested(&[0, 0, 0, 0]).unwrap_err().is_index());
        assert!(cube.get_nested(&[2]).unwrap_err().is_index());
    }

    #[test]
    fn test_row_access() {
        let table = grid();
        assert_eq!(table.row(1).unwrap(), NdArray::from_nested([5, 6, 7, 8]).unwrap());
        let line = NdArray::from_nested([7, 8]).unwrap();
        assert_eq!(line.row(1).unwrap().as_slice(), &[Value::Int(8)]);
        assert!(table.row(3).is_err());
    }

    #[test]
    fn test_slice_all_indices_wraps_leaf() {
        let table = grid();
        let leaf = table
            .slice(&[AxisSlice::Index(1), AxisSlice::Index(2)])
            .unwrap();
        assert_eq!(leaf.shape(), &[1]);
        assert_eq!(leaf.as_slice(), &[Value::Int(7)]);
    }

    #[test]
    fn test_slice_partial_spec_passes_rest_through() {
        let table = grid();
        let rows = table.slice(&[(1..).into()]).unwrap();
        assert_eq!(rows.shape(), &[2, 4]);
        assert_eq!(rows.first(), Some(&Value::Int(5)));
        assert_eq!(table.slice(&[]).unwrap(), table);
    }

    #[test]
    fn test_slice_clamps_and_rejects() {
        let table = grid();
        let clamped = table.slice(&[(2..10).into()]).unwrap();
        assert_eq!(clamped.shape(), &[1, 4]);
        let empty = table.slice(&[(3..3).into()]).unwrap();
        assert_eq!(empty.shape(), &[0, 4]);
        assert!(table
            .slice(&[AxisSlice::Full, AxisSlice::Full, AxisSlice::Full])
            .unwrap_err()
            .is_dimension_mismatch());
        assert!(table.slice(&[AxisSlice::Index(5)]).unwrap_err().is_index());
    }

    #[test]
    fn test_select_indices_invalid_axis() {
        let table = grid();
        assert!(table.select_indices(&[0], 2).unwrap_err().is_dimension_mismatch());
        assert!(table.select_indices(&[4], 1).unwrap_err().is_index());
    }
}
