//! Table combining and splitting operations
//!
//! This module provides operations for combining several tables
//! (concatenate, stack) and splitting one table into contiguous parts.

use super::types::NdArray;
use crate::error::{Result, TableError};
use crate::types::{shape_size, SplitSpec};

impl NdArray {
    /// Concatenate `other` after `self` along an existing axis.
    ///
    /// Along axis 0 this is sequence concatenation of the top-level children;
    /// along a deeper axis the matching sub-blocks are joined pairwise.
    ///
    /// # Errors
    ///
    /// - [`TableError::DimensionMismatch`] if the ranks differ or `axis` is out
    ///   of bounds
    /// - [`TableError::Shape`] if any extent other than `axis` differs
    ///
    /// # Examples
    ///
    /// ```
    /// use varplus_core::NdArray;
    ///
    /// let a = NdArray::from_nested([[1, 2], [3, 4]]).unwrap();
    /// let b = NdArray::from_nested([[5, 6]]).unwrap();
    ///
    /// let rows = a.concatenate(&b, 0).unwrap();
    /// assert_eq!(rows, NdArray::from_nested([[1, 2], [3, 4], [5, 6]]).unwrap());
    ///
    /// let c = NdArray::from_nested([[7], [8]]).unwrap();
    /// let cols = a.concatenate(&c, 1).unwrap();
    /// assert_eq!(cols, NdArray::from_nested([[1, 2, 7], [3, 4, 8]]).unwrap());
    /// ```
    pub fn concatenate(&self, other: &NdArray, axis: usize) -> Result<Self> {
        Self::concat_refs(&[self, other], axis)
    }

    /// Concatenate any number of tables along an existing axis.
    ///
    /// # Errors
    ///
    /// Same as [`concatenate`](Self::concatenate), plus [`TableError::Shape`]
    /// for an empty list.
    ///
    /// # Examples
    ///
    /// ```
    /// use varplus_core::NdArray;
    ///
    /// let parts = vec![NdArray::ones(&[1, 3]).unwrap(); 4];
    /// let joined = NdArray::concatenate_all(&parts, 0).unwrap();
    /// assert_eq!(joined.shape(), &[4, 3]);
    /// ```
    pub fn concatenate_all(tables: &[NdArray], axis: usize) -> Result<Self> {
        let refs: Vec<&NdArray> = tables.iter().collect();
        Self::concat_refs(&refs, axis)
    }

    fn concat_refs(tables: &[&NdArray], axis: usize) -> Result<Self> {
        let Some(first) = tables.first() else {
            return Err(TableError::shape("cannot concatenate an empty table list"));
        };
        let rank = first.ndim();
        if axis >= rank {
            return Err(TableError::dimension(format!(
                "axis {axis} out of bounds for rank {rank}"
            )));
        }

        for (i, table) in tables.iter().enumerate().skip(1) {
            if table.ndim() != rank {
                return Err(TableError::dimension(format!(
                    "table {} has rank {}, expected {}",
                    i,
                    table.ndim(),
                    rank
                )));
            }
            for (dim, (&s1, &s2)) in first.shape.iter().zip(table.shape.iter()).enumerate() {
                if dim != axis && s1 != s2 {
                    return Err(TableError::shape(format!(
                        "shape mismatch at dimension {dim}: {s1} vs {s2}"
                    )));
                }
            }
        }

        let mut result_shape = first.shape.clone();
        result_shape[axis] = tables.iter().map(|t| t.shape[axis]).sum();

        // Each outer position contributes one contiguous block per operand
        let outer = shape_size(&first.shape[..axis]);
        let inner = shape_size(&first.shape[axis + 1..]);
        let mut data = Vec::with_capacity(shape_size(&result_shape));
        for o in 0..outer {
            for table in tables {
                let block = table.shape[axis] * inner;
                data.extend_from_slice(&table.data[o * block..(o + 1) * block]);
            }
        }

        tracing::debug!(
            operands = tables.len(),
            axis,
            shape = ?result_shape.as_slice(),
            "concatenate"
        );
        Ok(Self::from_parts(result_shape, data))
    }

    /// Stack `self` and `others` along a new axis.
    ///
    /// Every operand must share one shape; the result has one more axis,
    /// inserted at `axis`, whose positions are the operands in order.
    ///
    /// # Errors
    ///
    /// - [`TableError::Shape`] if the shapes differ
    /// - [`TableError::DimensionMismatch`] if `axis > ndim`
    ///
    /// # Examples
    ///
    /// ```
    /// use varplus_core::NdArray;
    ///
    /// let a = NdArray::from_nested([1, 2]).unwrap();
    /// let b = NdArray::from_nested([3, 4]).unwrap();
    ///
    /// let stacked = a.stack(&[b.clone()], 0).unwrap();
    /// assert_eq!(stacked, NdArray::from_nested([[1, 2], [3, 4]]).unwrap());
    ///
    /// let columns = a.stack(&[b], 1).unwrap();
    /// assert_eq!(columns, NdArray::from_nested([[1, 3], [2, 4]]).unwrap());
    /// ```
    pub fn stack(&self, others: &[NdArray], axis: usize) -> Result<Self> {
        let mut tables = Vec::with_capacity(others.len() + 1);
        tables.push(self.clone());
        tables.extend_from_slice(others);
        Self::stack_all(&tables, axis)
    }

    /// Stack any number of equally shaped tables along a new axis.
    ///
    /// # Errors
    ///
    /// Same as [`stack`](Self::stack), plus [`TableError::Shape`] for an empty
    /// list.
    pub fn stack_all(tables: &[NdArray], axis: usize) -> Result<Self> {
        let Some(first) = tables.first() else {
            return Err(TableError::shape("cannot stack an empty table list"));
        };
        if axis > first.ndim() {
            return Err(TableError::dimension(format!(
                "axis {} out of bounds for result rank {}",
                axis,
                first.ndim() + 1
            )));
        }
        for (i, table) in tables.iter().enumerate().skip(1) {
            if !table.same_shape(first) {
                return Err(TableError::shape(format!(
                    "table {} has shape {:?}, expected {:?}",
                    i,
                    table.shape(),
                    first.shape()
                )));
            }
        }

        // Stack by first unsqueezing each table, then concatenating
        let unsqueezed = tables
            .iter()
            .map(|t| t.unsqueeze(axis))
            .collect::<Result<Vec<_>>>()?;
        Self::concatenate_all(&unsqueezed, axis)
    }

    /// Split the table into contiguous parts along an axis.
    ///
    /// [`SplitSpec::Sections`] cuts the axis into equal parts;
    /// [`SplitSpec::Indices`] cuts it at the given positions, producing one
    /// more part than there are cuts. Empty parts are kept, so concatenating
    /// the parts always gives back the original.
    ///
    /// # Errors
    ///
    /// - [`TableError::DimensionMismatch`] if `axis` is out of bounds
    /// - [`TableError::Shape`] for zero sections, an axis length that is not
    ///   divisible by the section count, or cut positions that descend or
    ///   exceed the axis length
    ///
    /// # Examples
    ///
    /// ```
    /// use varplus_core::NdArray;
    ///
    /// let table = NdArray::from_nested([1, 2, 3, 4, 5, 6]).unwrap();
    ///
    /// let halves = table.split(2, 0).unwrap();
    /// assert_eq!(halves[1], NdArray::from_nested([4, 5, 6]).unwrap());
    ///
    /// let parts = table.split([1, 4], 0).unwrap();
    /// let sizes: Vec<usize> = parts.iter().map(|p| p.size()).collect();
    /// assert_eq!(sizes, vec![1, 3, 2]);
    ///
    /// assert!(table.split(4, 0).unwrap_err().is_shape());
    /// ```
    pub fn split(&self, spec: impl Into<SplitSpec>, axis: usize) -> Result<Vec<Self>> {
        self.check_axis(axis)?;
        let bounds = spec.into().boundaries(self.shape[axis])?;
        bounds
            .windows(2)
            .map(|w| self.select_range(axis, w[0], w[1]))
            .collect()
    }
}
