use birdseye_image::Image;
use birdseye_imgproc::interpolation::InterpolationMode;

use crate::camera::CameraModel;
use crate::error::BevError;
use crate::footprint::BevFootprint;
use crate::orientation::Orientation;
use crate::resample::birds_eye_rgb8;
use crate::settings::{BevConfig, BevSettings};
use crate::transform::{compute_transform, BevTransform};

/// The result of processing one camera frame.
#[derive(Debug, Clone)]
pub struct BevFrame {
    /// The bird's-eye-view image, same size as the input frame.
    pub image: Image<u8, 3>,
    /// The transform used to produce `image`.
    pub transform: BevTransform,
    /// The ground area covered by `image`.
    pub footprint: BevFootprint,
}

/// Turns camera frames into bird's-eye-view frames.
///
/// The processor holds no per-frame state: orientation and settings are read by the
/// caller at the moment a frame arrives and passed to [`BevProcessor::process`].
#[derive(Debug, Clone)]
pub struct BevProcessor {
    camera: CameraModel,
    interpolation: InterpolationMode,
}

impl BevProcessor {
    /// Create a processor for the given camera.
    ///
    /// # Errors
    ///
    /// Fails when the camera model is not valid.
    pub fn new(camera: CameraModel, interpolation: InterpolationMode) -> Result<Self, BevError> {
        camera.validate()?;
        Ok(Self {
            camera,
            interpolation,
        })
    }

    /// Create a processor from a configuration.
    pub fn from_config(config: &BevConfig) -> Result<Self, BevError> {
        Self::new(config.camera, config.interpolation.into())
    }

    /// The camera model used by this processor.
    pub fn camera(&self) -> &CameraModel {
        &self.camera
    }

    /// The interpolation used to resample frames.
    pub fn interpolation(&self) -> InterpolationMode {
        self.interpolation
    }

    /// Process one RGB frame.
    ///
    /// Any error means the frame cannot be rendered and should be skipped.
    pub fn process(
        &self,
        frame: &Image<u8, 3>,
        orientation: &Orientation,
        settings: &BevSettings,
    ) -> Result<BevFrame, BevError> {
        settings.validate()?;
        let params = settings.params(orientation);
        let transform = compute_transform(&self.camera, frame.size(), &params)?;
        let image = birds_eye_rgb8(frame, &transform, self.interpolation)?;
        let footprint = BevFootprint::new(
            &self.camera,
            frame.size(),
            settings.camera_height_m,
            settings.look_ahead_m,
        );

        log::debug!(
            "processed frame {}: pitch {:.1} deg | roll {:.1} deg | height {:.2} m | {}",
            frame.size(),
            orientation.pitch_deg,
            orientation.roll_deg,
            settings.camera_height_m,
            footprint
        );

        Ok(BevFrame {
            image,
            transform,
            footprint,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use birdseye_image::ImageSize;

    #[test]
    fn process_keeps_frame_size() -> Result<(), BevError> {
        let size = ImageSize {
            width: 64,
            height: 48,
        };
        let frame = Image::<u8, 3>::from_size_val(size, 200)?;
        let processor = BevProcessor::new(CameraModel::default(), InterpolationMode::Bilinear)?;

        let out = processor.process(
            &frame,
            &Orientation::new(0.0, -90.0, 0.0),
            &BevSettings::default(),
        )?;

        assert_eq!(out.image.size(), size);
        assert_eq!(out.transform.image_size, size);
        assert_eq!(out.footprint.visible_length_m, 10.0);
        // a constant frame stays constant away from the left and top border
        assert_eq!(out.image.pixel(10, 20)?, &[200, 200, 200]);
        Ok(())
    }

    #[test]
    fn invalid_camera_is_rejected() {
        let res = BevProcessor::new(CameraModel::new(-1.0, 90.0), InterpolationMode::Nearest);
        assert!(matches!(res, Err(BevError::InvalidCameraModel(_))));
    }

    #[test]
    fn from_config_uses_interpolation() -> Result<(), BevError> {
        let config = BevConfig::from_json_str(r#"{ "interpolation": "nearest" }"#)?;
        let processor = BevProcessor::from_config(&config)?;
        assert_eq!(processor.interpolation(), InterpolationMode::Nearest);
        assert_eq!(processor.camera(), &CameraModel::default());
        Ok(())
    }
}
