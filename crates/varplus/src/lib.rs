//! # varplus - Multidimensional Tables
//!
//! This is the **meta crate** that re-exports the varplus components for
//! convenient access.
//!
//! ## Quick Start
//!
//! ```
//! use varplus::prelude::*;
//!
//! let table = NdArray::from_nested([[1, 2, 3, 4], [5, 6, 7, 8], [9, 10, 11, 12]])?;
//! let doubled = table.multiply_scalar(2)?;
//! assert_eq!(doubled.flatten().sum()?, Value::Int(156));
//!
//! let turned = doubled.reshape(&[4, 3])?.transpose()?;
//! assert_eq!(turned.shape(), &[3, 4]);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Components
//!
//! ### Tables ([`core`])
//!
//! `NdArray`, dynamic `Value` leaves, the `Nested` form, structural
//! transforms and JSON/CSV interchange.
//!
//! ```
//! use varplus::core::{NdArray, SplitSpec};
//!
//! let table = NdArray::from_nested([1, 2, 3, 4, 5]).unwrap();
//! let parts = table.split(SplitSpec::Indices(vec![2]), 0).unwrap();
//! assert_eq!(parts[1].size(), 3);
//! ```
//!
//! ## Features
//!
//! - `tracing`: enable [`core::tracing_support::init_tracing`]

pub use varplus_core as core;

pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! # Example
    //!
    //! ```
    //! use varplus::prelude::*;
    //!
    //! let table = NdArray::create(&[2, 2], Value::Null).unwrap();
    //! assert_eq!(table.size(), 4);
    //! ```

    pub use crate::core::tracing_support::{init_tracing, TracingConfig, TracingFormat};
    pub use crate::core::{
        ArrayRecord, AxisSlice, NdArray, Nested, Result, SplitSpec, TableError, Value, ValueKind,
    };
}
