//! Padding and rotation

use smallvec::SmallVec;

use super::functions::{checked_size, unravel};
use super::types::NdArray;
use crate::error::{Result, TableError};
use crate::types::{row_major_strides, Shape};
use crate::value::Value;

impl NdArray {
    /// Pad every axis with `amount` copies of `fill` on both sides
    ///
    /// A one-axis table gains `amount` leaves at each end; a two-axis table
    /// gains an `amount`-wide border. Higher ranks are padded the same way on
    /// every axis.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::Shape`] if a padded axis or the padded size
    /// overflows `usize`.
    ///
    /// # Examples
    ///
    /// ```
    /// use varplus_core::NdArray;
    ///
    /// let line = NdArray::from_nested([1, 2]).unwrap();
    /// assert_eq!(line.pad(1, 0).unwrap(), NdArray::from_nested([0, 1, 2, 0]).unwrap());
    ///
    /// let grid = NdArray::from_nested([[5]]).unwrap();
    /// assert_eq!(
    ///     grid.pad(1, 0).unwrap(),
    ///     NdArray::from_nested([[0, 0, 0], [0, 5, 0], [0, 0, 0]]).unwrap()
    /// );
    /// ```
    pub fn pad(&self, amount: usize, fill: impl Into<Value>) -> Result<Self> {
        let widths = vec![(amount, amount); self.ndim()];
        self.padded(&widths, fill.into())
    }

    /// Pad each axis independently with `(before, after)` copies of `fill`
    ///
    /// # Errors
    ///
    /// - [`TableError::DimensionMismatch`] if `widths` does not have one entry
    ///   per axis
    /// - [`TableError::Shape`] if a padded axis or the padded size overflows
    ///
    /// # Examples
    ///
    /// ```
    /// use varplus_core::NdArray;
    ///
    /// let grid = NdArray::from_nested([[1, 2], [3, 4]]).unwrap();
    /// let padded = grid.pad_width(&[(0, 1), (2, 0)], "-").unwrap();
    /// assert_eq!(padded.shape(), &[3, 4]);
    /// assert_eq!(padded.get(&[1, 3]).unwrap().as_i64(), Some(4));
    /// ```
    pub fn pad_width(&self, widths: &[(usize, usize)], fill: impl Into<Value>) -> Result<Self> {
        if widths.len() != self.ndim() {
            return Err(TableError::dimension(format!(
                "pad width length {} does not match table rank {}",
                widths.len(),
                self.ndim()
            )));
        }
        self.padded(widths, fill.into())
    }

    fn padded(&self, widths: &[(usize, usize)], fill: Value) -> Result<Self> {
        let new_shape = self
            .shape
            .iter()
            .zip(widths)
            .map(|(&dim, &(before, after))| {
                dim.checked_add(before)
                    .and_then(|d| d.checked_add(after))
                    .ok_or_else(|| {
                        TableError::shape(format!(
                            "padding axis of length {dim} by ({before}, {after}) overflows"
                        ))
                    })
            })
            .collect::<Result<Shape>>()?;
        let dst_strides = row_major_strides(&new_shape);
        let mut data = vec![fill; checked_size(&new_shape)?];

        // Copy original data to the interior
        let mut index = vec![0; self.ndim()];
        for (linear, value) in self.data.iter().enumerate() {
            unravel(linear, &self.shape, &mut index);
            let offset: usize = index
                .iter()
                .zip(widths)
                .zip(dst_strides.iter())
                .map(|((&i, &(before, _)), &stride)| (i + before) * stride)
                .sum();
            data[offset] = value.clone();
        }
        Ok(Self::from_parts(new_shape, data))
    }

    /// Rotate a two-axis table a quarter turn clockwise
    ///
    /// A `(rows, cols)` table becomes `(cols, rows)` with
    /// `result[j][rows - 1 - i] == self[i][j]`. Four turns give back the
    /// input.
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
    /// let grid = NdArray::from_nested([[1, 2, 3], [4, 5, 6]]).unwrap();
    /// let turned = grid.rotate_90().unwrap();
    /// assert_eq!(turned, NdArray::from_nested([[4, 1], [5, 2], [6, 3]]).unwrap());
    /// ```
    pub fn rotate_90(&self) -> Result<Self> {
        if self.ndim() != 2 {
            return Err(TableError::dimension(format!(
                "rotation only works on 2D tables, got {} dimensions",
                self.ndim()
            )));
        }
        let (rows, cols) = (self.shape[0], self.shape[1]);
        let mut data = Vec::with_capacity(self.size());
        for r in 0..cols {
            for c in 0..rows {
                data.push(self.data[(rows - 1 - c) * cols + r].clone());
            }
        }
        Ok(Self::from_parts(SmallVec::from_slice(&[cols, rows]), data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_zero_amount_is_copy() {
        let grid = NdArray::from_nested([[1, 2], [3, 4]]).unwrap();
        assert_eq!(grid.pad(0, Value::Null).unwrap(), grid);
    }

    #[test]
    fn test_pad_three_axes() {
        let cube = NdArray::create(&[1, 1, 1], 9).unwrap();
        let padded = cube.pad(1, 0).unwrap();
        assert_eq!(padded.shape(), &[3, 3, 3]);
        assert_eq!(padded.get(&[1, 1, 1]).unwrap(), &Value::Int(9));
        assert_eq!(padded.count_if(|v| *v == Value::Int(0)), 26);
    }

    #[test]
    fn test_pad_width_rank_checked() {
        let line = NdArray::from_nested([1, 2]).unwrap();
        assert!(line
            .pad_width(&[(1, 1), (1, 1)], 0)
            .unwrap_err()
            .is_dimension_mismatch());
        let padded = line.pad_width(&[(2, 0)], Value::Null).unwrap();
        assert_eq!(padded.as_slice(), &[Value::Null, Value::Null, Value::Int(1), Value::Int(2)]);
    }

    #[test]
    fn test_pad_rejects_overflowing_width() {
        let line = NdArray::from_nested([1, 2]).unwrap();
        assert!(line.pad(usize::MAX, 0).unwrap_err().is_shape());
        assert!(line
            .pad_width(&[(usize::MAX - 2, 1)], 0)
            .unwrap_err()
            .is_shape());
        let grid = NdArray::create(&[1, 1], 0).unwrap();
        assert!(grid.pad(usize::MAX / 4, 0).unwrap_err().is_shape());
    }

    #[test]
    fn test_pad_empty_axis() {
        let empty = NdArray::empty();
        assert_eq!(empty.pad(2, 7).unwrap(), NdArray::from_nested([7, 7, 7, 7]).unwrap());
    }

    #[test]
    fn test_rotate_square() {
        let grid = NdArray::from_nested([[1, 2], [3, 4]]).unwrap();
        let turned = grid.rotate_90().unwrap();
        assert_eq!(turned, NdArray::from_nested([[3, 1], [4, 2]]).unwrap());
    }

    #[test]
    fn test_rotate_requires_two_axes() {
        assert!(NdArray::from_nested([1, 2])
            .unwrap()
            .rotate_90()
            .unwrap_err()
            .is_dimension_mismatch());
    }
}
