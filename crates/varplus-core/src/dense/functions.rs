//! Index arithmetic shared by the table operations

use crate::error::{Result, TableError};
use crate::types::{checked_shape_size, row_major_strides};
use crate::value::Value;

/// Leaf count of a caller-supplied shape, rejecting products past `usize`.
pub(crate) fn checked_size(shape: &[usize]) -> Result<usize> {
    checked_shape_size(shape)
        .ok_or_else(|| TableError::shape(format!("shape {shape:?} product overflows")))
}

/// Convert a linear row-major position into a multi-dimensional index.
pub(crate) fn unravel(linear: usize, shape: &[usize], index: &mut [usize]) {
    let mut remaining = linear;
    for d in (0..shape.len()).rev() {
        index[d] = remaining % shape[d];
        remaining /= shape[d];
    }
}

/// Collect the leaves addressed by one list of positions per axis.
///
/// Positions are visited in row-major order of the selection, so the result
/// is laid out for a table whose shape is the selection lengths.
pub(crate) fn gather(data: &[Value], shape: &[usize], selection: &[Vec<usize>]) -> Vec<Value> {
    debug_assert_eq!(shape.len(), selection.len());
    let total: usize = selection.iter().map(Vec::len).product();
    let mut out = Vec::with_capacity(total);
    if total == 0 {
        return out;
    }

    let strides = row_major_strides(shape);
    let mut cursor = vec![0usize; selection.len()];
    loop {
        let offset: usize = cursor
            .iter()
            .zip(selection)
            .zip(strides.iter())
            .map(|((&c, positions), &stride)| positions[c] * stride)
            .sum();
        out.push(data[offset].clone());

        // Odometer step: last axis fastest
        let mut axis = selection.len();
        loop {
            if axis == 0 {
                return out;
            }
            axis -= 1;
            cursor[axis] += 1;
            if cursor[axis] < selection[axis].len() {
                break;
            }
            cursor[axis] = 0;
        }
    }
}
