#![deny(missing_docs)]
//! Image file input/output.

/// Error types for the io module.
pub mod error;

/// High-level functions to read and write images.
pub mod functional;

pub use crate::error::IoError;
