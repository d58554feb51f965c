//! Perspective transforms: solving a homography from four point correspondences and
//! resampling an image through it.
//!
//! # Examples
//!
//! Mapping a horizontal band of an image onto the whole frame:
//!
//! ```
//! use birdseye_imgproc::warp::{get_perspective_transform, transform_point};
//!
//! let src = [[0.0, 4.0], [8.0, 4.0], [8.0, 2.0], [0.0, 2.0]];
//! let dst = [[0.0, 4.0], [8.0, 4.0], [8.0, 0.0], [0.0, 0.0]];
//! let m = get_perspective_transform(&src, &dst).unwrap();
//!
//! let (x, y) = transform_point(8.0, 2.0, &m);
//! assert!((x - 8.0).abs() < 1e-9 && y.abs() < 1e-9);
//! ```

mod homography;
mod perspective;

pub use homography::get_perspective_transform;
pub use perspective::{invert_perspective_transform, transform_point, warp_perspective};
