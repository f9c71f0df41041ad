//! Dictionary form of a table
//!
//! [`ArrayRecord`] is the structured representation used for JSON
//! interchange: `{"data": <nested>, "shape": [..], "ndim": n, "size": n}`.
//! Only `data` is authoritative; the other fields are informational and are
//! recomputed whenever a table is rebuilt from a record.

use serde::{Deserialize, Serialize};

use crate::dense::NdArray;
use crate::error::Result;
use crate::nested::Nested;

/// Serializable snapshot of a table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayRecord {
    /// Leaves in nested-container form
    pub data: Nested,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<Vec<usize>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ndim: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<usize>,
}

impl ArrayRecord {
    /// Record carrying only `data`; annotations are filled in on rebuild
    pub fn from_data(data: impl Into<Nested>) -> Self {
        Self {
            data: data.into(),
            shape: None,
            ndim: None,
            size: None,
        }
    }

    /// Check the informational fields against a rebuilt table
    fn is_stale(&self, table: &NdArray) -> bool {
        let size_differs = self.size.is_some_and(|s| s != table.size());
        // zero-size inner axes carry no leaves, so their extents cannot survive
        let layout_checked = !(table.is_empty() && self.size.unwrap_or(0) == 0);
        let shape_differs = layout_checked
            && (self.shape.as_deref().is_some_and(|s| s != table.shape())
                || self.ndim.is_some_and(|n| n != table.ndim()));
        size_differs || shape_differs
    }
}

impl NdArray {
    /// Structured snapshot with every annotation filled in
    ///
    /// # Examples
    ///
    /// ```
    /// use varplus_core::NdArray;
    ///
    /// let record = NdArray::zeros(&[2, 3]).unwrap().to_record();
    /// assert_eq!(record.shape, Some(vec![2, 3]));
    /// assert_eq!(record.ndim, Some(2));
    /// assert_eq!(record.size, Some(6));
    /// ```
    pub fn to_record(&self) -> ArrayRecord {
        ArrayRecord {
            data: self.to_nested(),
            shape: Some(self.shape_vec()),
            ndim: Some(self.ndim()),
            size: Some(self.size()),
        }
    }

    /// Rebuild a table from `record.data`
    ///
    /// Stale `shape`, `ndim` or `size` annotations are ignored with a
    /// warning.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::Shape`](crate::TableError::Shape) if `data` is
    /// not rectangular.
    pub fn from_record(mut record: ArrayRecord) -> Result<Self> {
        let data = std::mem::replace(&mut record.data, Nested::List(Vec::new()));
        let table = NdArray::from_nested(data)?;
        if record.is_stale(&table) {
            tracing::warn!(
                recorded_shape = ?record.shape,
                recorded_size = ?record.size,
                actual_shape = ?table.shape(),
                "record annotations disagree with data; using data"
            );
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_round_trip() {
        let table = NdArray::from_nested([["a", "b"], ["c", "d"]]).unwrap();
        assert_eq!(NdArray::from_record(table.to_record()).unwrap(), table);
    }

    #[test]
    fn test_stale_annotations_ignored() {
        let record = ArrayRecord {
            data: Nested::from([1, 2, 3]),
            shape: Some(vec![7, 7]),
            ndim: Some(2),
            size: Some(49),
        };
        assert!(record.is_stale(&NdArray::from_nested([1, 2, 3]).unwrap()));
        let table = NdArray::from_record(record).unwrap();
        assert_eq!(table.shape(), &[3]);
    }

    #[test]
    fn test_data_only_record() {
        let record = ArrayRecord::from_data([[1, 2]]);
        assert!(!record.is_stale(&NdArray::from_nested([[1, 2]]).unwrap()));
        assert_eq!(NdArray::from_record(record).unwrap().shape(), &[1, 2]);
    }

    #[test]
    fn test_zero_size_inner_axes_not_stale() {
        let record = NdArray::create(&[0, 3], 0).unwrap().to_record();
        let rebuilt = NdArray::from_nested(record.data.clone()).unwrap();
        assert_eq!(rebuilt.shape(), &[0]);
        assert!(!record.is_stale(&rebuilt));
    }

    #[test]
    fn test_jagged_record_rejected() {
        let record = ArrayRecord::from_data(vec![vec![1], vec![2, 3]]);
        assert!(NdArray::from_record(record).unwrap_err().is_shape());
    }
}
