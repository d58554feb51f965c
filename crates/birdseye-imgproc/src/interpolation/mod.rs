//! Pixel interpolation methods for image transformations.
//!
//! - **Nearest**: fastest, uses the nearest pixel value
//! - **Bilinear**: smooth linear interpolation between the four adjacent pixels

mod bilinear;

/// Grid generation and coordinate mapping utilities.
pub mod grid;

mod interpolate;
mod nearest;

pub use interpolate::{interpolate_pixel, InterpolationMode};
