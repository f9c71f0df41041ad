//! Dense table implementation and operations
//!
//! This module provides the `NdArray` table organized into functional
//! sub-modules for better maintainability.

// Core type definition
pub mod types;

// Operation modules (organized by functionality)
mod combining;
mod comparison;
mod creation;
mod elementwise;
mod indexing;
mod manipulation;
mod shape_ops;
mod statistics;

// Supporting modules
pub mod traits;
pub(crate) mod functions;

// Re-export the main type
pub use types::NdArray;
