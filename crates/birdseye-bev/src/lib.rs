#![deny(missing_docs)]
//! Bird's-eye-view (BEV) reprojection of the ground plane in front of a camera.
//!
//! The [`transform`] module derives, from the camera pitch, its height above the ground
//! and a look-ahead distance, the image row where the visible ground ends and the
//! homography that stretches the ground region onto the whole frame. The [`resample`]
//! module warps frames through that homography and [`pipeline`] ties everything together
//! for one camera frame at a time.
//!
//! ```
//! use birdseye_bev::{transform::compute_transform, BevParams, CameraModel};
//! use birdseye_image::ImageSize;
//!
//! let size = ImageSize { width: 640, height: 480 };
//! let params = BevParams::new(-90.0, 1.5, 10.0);
//! let bev = compute_transform(&CameraModel::default(), size, &params).unwrap();
//!
//! assert!((bev.top_row - 302.354).abs() < 1e-3);
//! ```

/// Pinhole camera model with the field-of-view and pitch conventions.
pub mod camera;

/// Error types for the bev module.
pub mod error;

/// Ground area covered by the BEV output and on-screen distance measurement.
pub mod footprint;

/// Device orientation from rotation-vector samples.
pub mod orientation;

/// Per-frame processing of camera images.
pub mod pipeline;

/// Resampling of images through a BEV transform.
pub mod resample;

/// Operator settings and configuration files.
pub mod settings;

/// The BEV homography builder.
pub mod transform;

pub use crate::camera::CameraModel;
pub use crate::error::BevError;
pub use crate::footprint::{BevFootprint, Measurement};
pub use crate::orientation::{Orientation, OrientationState};
pub use crate::pipeline::{BevFrame, BevProcessor};
pub use crate::settings::{BevConfig, BevSettings, Interpolation};
pub use crate::transform::{BevParams, BevTransform, TopRowClamp};
