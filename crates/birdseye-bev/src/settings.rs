use std::path::Path;

use birdseye_imgproc::interpolation::InterpolationMode;
use serde::{Deserialize, Serialize};

use crate::camera::CameraModel;
use crate::error::{ensure_finite, BevError};
use crate::orientation::Orientation;
use crate::transform::BevParams;

/// Operator-controlled inputs of the transform, passed explicitly to every frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BevSettings {
    /// Height of the camera above the ground in meters.
    pub camera_height_m: f64,
    /// Farthest ground distance shown in the BEV output, in meters.
    pub look_ahead_m: f64,
}

impl BevSettings {
    /// Range offered to the operator for the camera height, in meters.
    pub const CAMERA_HEIGHT_RANGE_M: (f64, f64) = (0.5, 20.0);

    /// Range offered to the operator for the look-ahead distance, in meters.
    pub const LOOK_AHEAD_RANGE_M: (f64, f64) = (5.0, 30.0);

    /// Create settings, clamping both values into their operator ranges.
    pub fn new(camera_height_m: f64, look_ahead_m: f64) -> Self {
        let mut settings = Self::default();
        settings.set_camera_height(camera_height_m);
        settings.set_look_ahead(look_ahead_m);
        settings
    }

    /// Set the camera height, clamped into [`Self::CAMERA_HEIGHT_RANGE_M`].
    pub fn set_camera_height(&mut self, camera_height_m: f64) {
        let (lo, hi) = Self::CAMERA_HEIGHT_RANGE_M;
        if !camera_height_m.is_nan() {
            self.camera_height_m = camera_height_m.clamp(lo, hi);
        }
    }

    /// Set the look-ahead distance, clamped into [`Self::LOOK_AHEAD_RANGE_M`].
    pub fn set_look_ahead(&mut self, look_ahead_m: f64) {
        let (lo, hi) = Self::LOOK_AHEAD_RANGE_M;
        if !look_ahead_m.is_nan() {
            self.look_ahead_m = look_ahead_m.clamp(lo, hi);
        }
    }

    /// Combine with the device orientation into the parameters of one frame.
    pub fn params(&self, orientation: &Orientation) -> BevParams {
        BevParams::new(
            orientation.pitch_deg,
            self.camera_height_m,
            self.look_ahead_m,
        )
        .with_roll(orientation.roll_deg)
    }

    /// Check the values can be fed to the transform.
    pub fn validate(&self) -> Result<(), BevError> {
        ensure_finite("camera_height_m", self.camera_height_m)?;
        if self.look_ahead_m.is_nan() || self.look_ahead_m <= 0.0 {
            return Err(BevError::InvalidLookAhead(self.look_ahead_m));
        }
        ensure_finite("look_ahead_m", self.look_ahead_m)?;
        Ok(())
    }
}

impl Default for BevSettings {
    fn default() -> Self {
        Self {
            camera_height_m: 1.5,
            look_ahead_m: 10.0,
        }
    }
}

/// Interpolation used to resample frames.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interpolation {
    /// Bilinear interpolation.
    #[default]
    Bilinear,
    /// Nearest neighbor interpolation.
    Nearest,
}

impl From<Interpolation> for InterpolationMode {
    fn from(interpolation: Interpolation) -> Self {
        match interpolation {
            Interpolation::Bilinear => InterpolationMode::Bilinear,
            Interpolation::Nearest => InterpolationMode::Nearest,
        }
    }
}

/// Configuration of a BEV processor, loadable from JSON.
///
/// Every field is optional in the file and falls back to its default.
///
/// ```
/// use birdseye_bev::BevConfig;
///
/// let config = BevConfig::from_json_str(
///     r#"{ "camera": { "fov_y_deg": 70.0 }, "settings": { "look_ahead_m": 20.0 } }"#,
/// ).unwrap();
///
/// assert_eq!(config.camera.fov_y_deg, 70.0);
/// assert_eq!(config.camera.pitch_offset_deg, 90.0);
/// assert_eq!(config.settings.camera_height_m, 1.5);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BevConfig {
    /// Camera conventions.
    pub camera: CameraModel,
    /// Initial operator settings.
    pub settings: BevSettings,
    /// Resampling interpolation.
    pub interpolation: Interpolation,
}

impl BevConfig {
    /// Parse and validate a configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, BevError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, BevError> {
        let path = path.as_ref();
        log::debug!("loading bev config from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Check the camera model and the settings.
    pub fn validate(&self) -> Result<(), BevError> {
        self.camera.validate()?;
        self.settings.validate()
    }
}
