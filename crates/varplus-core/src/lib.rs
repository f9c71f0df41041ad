//! # varplus-core
//!
//! Multidimensional tables of dynamic values for VarPlus.
//!
//! This crate provides the building blocks for working with rectangular,
//! arbitrarily nested tables whose leaves may be integers, floats, text,
//! booleans or nulls:
//!
//! - **Dense table representation** ([`NdArray`]) stored as a flat row-major
//!   buffer plus a shape descriptor
//! - **Dynamic leaves** ([`Value`]) with integer-preserving arithmetic
//! - **Nested form** ([`Nested`]) for literals, row access and JSON
//! - **Structural transforms**: reshape, flatten, transpose/permute,
//!   slice, concatenate, split, stack, pad and rotate
//! - **Interchange**: flat leaves, records, JSON text and files, CSV text
//!
//! ## Memory Layout
//!
//! Leaves are stored in row-major (C) order: the last index varies fastest.
//! Every operation except `set`, `fill`, `fill_with` and mutable iteration
//! returns a new, independent table.
//!
//! ## Quick Start
//!
//! ```
//! use varplus_core::{NdArray, Value};
//!
//! let table = NdArray::from_nested([[1, 2, 3], [4, 5, 6]]).unwrap();
//! assert_eq!(table.shape(), &[2, 3]);
//! assert_eq!(table.ndim(), 2);
//! assert_eq!(table.get(&[1, 2]).unwrap(), &Value::Int(6));
//!
//! let flat = table.flatten();
//! assert_eq!(flat.shape(), &[6]);
//! ```
//!
//! ## Shape Operations
//!
//! ```
//! use varplus_core::{AxisSlice, NdArray};
//!
//! let table = NdArray::from_nested([1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]).unwrap();
//! let grid = table.reshape(&[3, 4]).unwrap();
//!
//! let transposed = grid.transpose().unwrap();
//! assert_eq!(transposed.shape(), &[4, 3]);
//!
//! let corner = grid.slice(&[AxisSlice::range(0, 2), AxisSlice::range(0, 2)]).unwrap();
//! assert_eq!(corner, NdArray::from_nested([[1, 2], [5, 6]]).unwrap());
//!
//! let parts = grid.split(3, 0).unwrap();
//! assert_eq!(NdArray::concatenate_all(&parts, 0).unwrap(), grid);
//! ```
//!
//! ## Reductions
//!
//! ```
//! use varplus_core::{NdArray, Value};
//!
//! let table = NdArray::from_nested([[1, 2], [3, 4]]).unwrap();
//! let doubled = table.multiply_scalar(2).unwrap();
//! assert_eq!(doubled.sum().unwrap(), Value::Int(20));
//! assert_eq!(doubled.mean().unwrap(), 5.0);
//! assert_eq!(doubled.max().unwrap(), Value::Int(8));
//! ```
//!
//! ## Error Handling
//!
//! Operations return [`Result<T>`] with a [`TableError`] that names the kind
//! of failure:
//!
//! ```
//! use varplus_core::NdArray;
//!
//! let table = NdArray::zeros(&[2, 3]).unwrap();
//! assert!(table.reshape(&[7]).unwrap_err().is_shape());
//! assert!(NdArray::zeros(&[2]).unwrap().transpose().unwrap_err().is_dimension_mismatch());
//! assert!(table.get(&[5, 0]).unwrap_err().is_index());
//! ```
//!
//! ## Features
//!
//! - `tracing`: install a `tracing-subscriber` formatter through
//!   [`tracing_support::init_tracing`]

pub mod dense;
pub mod error;
pub mod io;
pub mod nested;
pub mod tracing_support;
pub mod types;
pub mod value;


pub use dense::NdArray;
pub use error::{Result, TableError};
pub use io::ArrayRecord;
pub use nested::Nested;
pub use types::{checked_shape_size, row_major_strides, shape_size, Axis, AxisSlice, Rank, Shape, SplitSpec};
pub use value::{Value, ValueKind};
