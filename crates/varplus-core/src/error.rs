//! Error types for table operations
//!
//! Every fallible operation in varplus-core returns [`Result<T>`], whose error
//! side is a [`TableError`]. The variants form a small taxonomy:
//!
//! - **`Shape`**: size or shape mismatch (construction, reshape, concatenate,
//!   stack, split)
//! - **`DimensionMismatch`**: wrong number of axes, or an axis argument that
//!   does not exist
//! - **`Index`**: out-of-range position or over-long index path
//! - **`Type`**: non-numeric or mutually incomparable leaves
//! - **`Domain`**: reductions that are undefined on an empty table
//! - **`Json`**, **`Csv`**, **`Io`**: interchange boundary failures
//!
//! # Examples
//!
//! ```
//! use varplus_core::{NdArray, TableError};
//!
//! let table = NdArray::zeros(&[2, 3]).unwrap();
//! let err = table.reshape(&[7]).unwrap_err();
//! assert!(err.is_shape());
//! assert!(matches!(err, TableError::Shape(_)));
//! ```

use thiserror::Error;

/// Top-level error type for all table operations
#[derive(Error, Debug)]
pub enum TableError {
    /// Shape or size mismatch
    #[error("Shape error: {0}")]
    Shape(String),

    /// Rank or axis mismatch
    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// Position outside the table
    #[error("Index error: {0}")]
    Index(String),

    /// Leaf of the wrong kind for the operation
    #[error("Type error: {0}")]
    Type(String),

    /// Operation undefined for the given table
    #[error("Domain error: {0}")]
    Domain(String),

    /// JSON encoding or decoding failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV encoding or decoding failure
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Filesystem failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TableError {
    pub(crate) fn shape(msg: impl Into<String>) -> Self {
        TableError::Shape(msg.into())
    }

    pub(crate) fn dimension(msg: impl Into<String>) -> Self {
        TableError::DimensionMismatch(msg.into())
    }

    pub(crate) fn index(msg: impl Into<String>) -> Self {
        TableError::Index(msg.into())
    }

    pub(crate) fn type_error(msg: impl Into<String>) -> Self {
        TableError::Type(msg.into())
    }

    pub(crate) fn domain(msg: impl Into<String>) -> Self {
        TableError::Domain(msg.into())
    }

    /// `true` for [`TableError::Shape`]
    pub fn is_shape(&self) -> bool {
        matches!(self, TableError::Shape(_))
    }

    /// `true` for [`TableError::DimensionMismatch`]
    pub fn is_dimension_mismatch(&self) -> bool {
        matches!(self, TableError::DimensionMismatch(_))
    }

    /// `true` for [`TableError::Index`]
    pub fn is_index(&self) -> bool {
        matches!(self, TableError::Index(_))
    }

    /// `true` for [`TableError::Type`]
    pub fn is_type(&self) -> bool {
        matches!(self, TableError::Type(_))
    }

    /// `true` for [`TableError::Domain`]
    pub fn is_domain(&self) -> bool {
        matches!(self, TableError::Domain(_))
    }
}

/// Result alias used throughout varplus-core
pub type Result<T> = std::result::Result<T, TableError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_prefixes() {
        assert_eq!(
            TableError::shape("bad").to_string(),
            "Shape error: bad"
        );
        assert_eq!(
            TableError::dimension("rank 3").to_string(),
            "Dimension mismatch: rank 3"
        );
        assert_eq!(TableError::domain("empty").to_string(), "Domain error: empty");
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: TableError = io.into();
        assert!(matches!(err, TableError::Io(_)));
        assert!(!err.is_shape());
    }

    #[test]
    fn test_predicates_are_exclusive() {
        let err = TableError::type_error("text");
        assert!(err.is_type());
        assert!(!err.is_domain());
        assert!(!err.is_index());
        assert!(!err.is_dimension_mismatch());
    }
}
