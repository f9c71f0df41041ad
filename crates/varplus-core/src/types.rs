//! Core type definitions for varplus tables.
//!
//! This module defines the small vocabulary shared by every table operation:
//!
//! - Type aliases for dimensions ([`Axis`], [`Rank`], [`Shape`])
//! - Per-axis slice descriptors ([`AxisSlice`])
//! - Split descriptors ([`SplitSpec`])
//! - Row-major shape helpers ([`shape_size`], [`row_major_strides`])
//!
//! # Examples
//!
//! ```
//! use varplus_core::{row_major_strides, shape_size, AxisSlice};
//!
//! assert_eq!(shape_size(&[2, 3, 4]), 24);
//! assert_eq!(row_major_strides(&[2, 3, 4]).as_slice(), &[12, 4, 1]);
//!
//! // Ranges convert into slice descriptors
//! let spec: AxisSlice = (1..3).into();
//! assert_eq!(spec, AxisSlice::range(1, 3));
//! ```

use std::ops::{Range, RangeFrom, RangeFull, RangeTo};

use smallvec::{smallvec, SmallVec};

use crate::error::{Result, TableError};

/// Type alias for an axis index.
///
/// Zero-indexed from the outermost nesting level.
pub type Axis = usize;

/// Type alias for the number of axes of a table.
pub type Rank = usize;

/// Shape type using SmallVec to avoid heap allocation for common cases.
///
/// Tables rarely exceed six axes; higher ranks spill to the heap.
pub type Shape = SmallVec<[usize; 6]>;

/// Total number of leaves described by `shape`.
///
/// Any zero-length axis makes the total zero. The product of the remaining
/// axes must fit in `usize`; see [`checked_shape_size`] for untrusted shapes.
pub fn shape_size(shape: &[usize]) -> usize {
    if shape.contains(&0) {
        return 0;
    }
    shape.iter().product()
}

/// Like [`shape_size`], but `None` when the product overflows `usize`.
pub fn checked_shape_size(shape: &[usize]) -> Option<usize> {
    if shape.contains(&0) {
        return Some(0);
    }
    shape.iter().try_fold(1usize, |acc, &dim| acc.checked_mul(dim))
}

/// Row-major (C order) strides for `shape`: the last axis varies fastest.
pub fn row_major_strides(shape: &[usize]) -> Shape {
    let mut strides: Shape = smallvec![1; shape.len()];
    for i in (0..shape.len().saturating_sub(1)).rev() {
        // saturates only for zero-size shapes, whose strides are never used
        strides[i] = strides[i + 1].saturating_mul(shape[i + 1]);
    }
    strides
}

/// Selection applied to a single axis by [`NdArray::slice`](crate::NdArray::slice).
///
/// # Variants
///
/// - `Full`: keep every position of the axis
/// - `Range`: half-open `[start, stop)` with a positive `step`; missing bounds
///   default to the axis ends and bounds past the end are clamped
/// - `Index`: pick one position and drop the axis from the result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisSlice {
    /// Keep the whole axis
    Full,
    /// Keep a strided half-open range
    Range {
        start: Option<usize>,
        stop: Option<usize>,
        step: usize,
    },
    /// Keep one position and eliminate the axis
    Index(usize),
}

impl AxisSlice {
    /// Half-open range `[start, stop)` with unit step.
    pub fn range(start: usize, stop: usize) -> Self {
        AxisSlice::Range {
            start: Some(start),
            stop: Some(stop),
            step: 1,
        }
    }

    /// Half-open range `[start, stop)` taking every `step`-th position.
    pub fn stepped(start: usize, stop: usize, step: usize) -> Self {
        AxisSlice::Range {
            start: Some(start),
            stop: Some(stop),
            step,
        }
    }

    /// Resolve against an axis of length `len`.
    ///
    /// Returns the selected positions and whether the axis survives.
    pub(crate) fn resolve(&self, axis: Axis, len: usize) -> Result<(Vec<usize>, bool)> {
        match *self {
            AxisSlice::Full => Ok(((0..len).collect(), true)),
            AxisSlice::Range { start, stop, step } => {
                if step == 0 {
                    return Err(TableError::index(format!(
                        "slice step cannot be zero (axis {axis})"
                    )));
                }
                let start = start.unwrap_or(0).min(len);
                let stop = stop.unwrap_or(len).min(len);
                Ok(((start..stop.max(start)).step_by(step).collect(), true))
            }
            AxisSlice::Index(index) => {
                if index >= len {
                    return Err(TableError::index(format!(
                        "index {index} out of bounds for axis {axis} with size {len}"
                    )));
                }
                Ok((vec![index], false))
            }
        }
    }
}

impl From<usize> for AxisSlice {
    fn from(index: usize) -> Self {
        AxisSlice::Index(index)
    }
}

impl From<Range<usize>> for AxisSlice {
    fn from(range: Range<usize>) -> Self {
        AxisSlice::range(range.start, range.end)
    }
}

impl From<RangeFrom<usize>> for AxisSlice {
    fn from(range: RangeFrom<usize>) -> Self {
        AxisSlice::Range {
            start: Some(range.start),
            stop: None,
            step: 1,
        }
    }
}

impl From<RangeTo<usize>> for AxisSlice {
    fn from(range: RangeTo<usize>) -> Self {
        AxisSlice::Range {
            start: None,
            stop: Some(range.end),
            step: 1,
        }
    }
}

impl From<RangeFull> for AxisSlice {
    fn from(_: RangeFull) -> Self {
        AxisSlice::Full
    }
}

/// How [`NdArray::split`](crate::NdArray::split) cuts an axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitSpec {
    /// Number of equal parts; the axis length must be divisible by it
    Sections(usize),
    /// Non-decreasing cut positions producing `len + 1` contiguous parts
    Indices(Vec<usize>),
}

impl SplitSpec {
    /// Part boundaries `[0, c1, ..., ck, len]` for an axis of length `len`.
    pub(crate) fn boundaries(&self, len: usize) -> Result<Vec<usize>> {
        match self {
            SplitSpec::Sections(0) => Err(TableError::shape("cannot split into 0 sections")),
            SplitSpec::Sections(parts) => {
                if len % parts != 0 {
                    return Err(TableError::shape(format!(
                        "cannot split {len} items into {parts} equal parts"
                    )));
                }
                let chunk = len / parts;
                Ok((0..=*parts).map(|i| i * chunk).collect())
            }
            SplitSpec::Indices(cuts) => {
                let mut bounds = Vec::with_capacity(cuts.len() + 2);
                bounds.push(0);
                for &cut in cuts {
                    let prev = *bounds.last().unwrap_or(&0);
                    if cut < prev {
                        return Err(TableError::shape(format!(
                            "split indices must be ascending, got {cut} after {prev}"
                        )));
                    }
                    if cut > len {
                        return Err(TableError::shape(format!(
                            "split index {cut} exceeds axis length {len}"
                        )));
                    }
                    bounds.push(cut);
                }
                bounds.push(len);
                Ok(bounds)
            }
        }
    }
}

impl From<usize> for SplitSpec {
    fn from(parts: usize) -> Self {
        SplitSpec::Sections(parts)
    }
}

impl From<Vec<usize>> for SplitSpec {
    fn from(cuts: Vec<usize>) -> Self {
        SplitSpec::Indices(cuts)
    }
}

impl From<&[usize]> for SplitSpec {
    fn from(cuts: &[usize]) -> Self {
        SplitSpec::Indices(cuts.to_vec())
    }
}

impl<const N: usize> From<[usize; N]> for SplitSpec {
    fn from(cuts: [usize; N]) -> Self {
        SplitSpec::Indices(cuts.to_vec())
    }
}
