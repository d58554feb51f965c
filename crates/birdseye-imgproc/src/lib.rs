#![deny(missing_docs)]
//! Image processing operations used to resample perspective camera frames.

/// utilities for interpolation.
pub mod interpolation;

/// utilities to run row-wise operations in parallel.
pub mod parallel;

/// image geometric transforms.
pub mod warp;
