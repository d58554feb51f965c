use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, BevError};

/// The pinhole camera conventions used to build the BEV transform.
///
/// The focal length is not stored: it is derived from the vertical field of view and the
/// height of the frame being processed, so the same model serves any resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraModel {
    /// Vertical field of view in degrees.
    pub fov_y_deg: f64,
    /// Offset added to the sensor pitch to obtain the optical-axis depression, in degrees.
    pub pitch_offset_deg: f64,
}

impl CameraModel {
    /// Vertical field of view of the reference phone camera.
    pub const DEFAULT_FOV_Y_DEG: f64 = 60.0;

    /// Offset from the rotation-vector sensor pitch convention to the optical axis.
    pub const DEFAULT_PITCH_OFFSET_DEG: f64 = 90.0;

    /// Create a camera model from its field of view and pitch offset, both in degrees.
    pub fn new(fov_y_deg: f64, pitch_offset_deg: f64) -> Self {
        Self {
            fov_y_deg,
            pitch_offset_deg,
        }
    }

    /// Check that the model describes a usable pinhole camera.
    ///
    /// # Errors
    ///
    /// The field of view must lie in (0, 180) degrees and the pitch offset must be finite.
    pub fn validate(&self) -> Result<(), BevError> {
        ensure_finite("fov_y_deg", self.fov_y_deg)?;
        ensure_finite("pitch_offset_deg", self.pitch_offset_deg)?;
        if self.fov_y_deg <= 0.0 || self.fov_y_deg >= 180.0 {
            return Err(BevError::InvalidCameraModel(format!(
                "vertical field of view must be in (0, 180) degrees, got {}",
                self.fov_y_deg
            )));
        }
        Ok(())
    }

    /// Vertical field of view in radians.
    pub fn fov_y_rad(&self) -> f64 {
        self.fov_y_deg.to_radians()
    }

    /// Focal length in pixels for a frame `image_height` pixels tall.
    ///
    /// `f = h / (2 * tan(fov_y / 2))`
    pub fn focal_length_px(&self, image_height: f64) -> f64 {
        image_height / (2.0 * (self.fov_y_rad() / 2.0).tan())
    }

    /// Horizontal field of view in radians for a frame with the given width/height ratio.
    pub fn fov_x_rad(&self, aspect_ratio: f64) -> f64 {
        2.0 * ((self.fov_y_rad() / 2.0).tan() * aspect_ratio).atan()
    }

    /// Depression of the optical axis below the horizon, in radians, for a sensor pitch.
    pub fn optical_axis_pitch_rad(&self, pitch_deg: f64) -> f64 {
        (pitch_deg + self.pitch_offset_deg).to_radians()
    }
}

impl Default for CameraModel {
    fn default() -> Self {
        Self::new(Self::DEFAULT_FOV_Y_DEG, Self::DEFAULT_PITCH_OFFSET_DEG)
    }
}
