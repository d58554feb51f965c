use birdseye_image::ImageSize;

use crate::camera::CameraModel;
use crate::error::BevError;

/// The ground area shown in the bird's-eye view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BevFootprint {
    /// Horizontal field of view of the camera in radians.
    pub fov_x_rad: f64,
    /// Width of ground covered by the view, in meters.
    pub visible_width_m: f64,
    /// Depth of ground covered by the view, in meters.
    pub visible_length_m: f64,
}

impl BevFootprint {
    /// Estimate the ground footprint for a camera at `camera_height_m` showing up to
    /// `look_ahead_m` meters ahead.
    ///
    /// The width is the span of the horizontal field of view at a range equal to the
    /// camera height, i.e. `2 * camera_height_m * tan(fov_x / 2)`.
    pub fn new(
        camera: &CameraModel,
        image_size: ImageSize,
        camera_height_m: f64,
        look_ahead_m: f64,
    ) -> Self {
        let fov_x_rad = camera.fov_x_rad(image_size.aspect_ratio());
        Self {
            fov_x_rad,
            visible_width_m: 2.0 * camera_height_m * (fov_x_rad / 2.0).tan(),
            visible_length_m: look_ahead_m,
        }
    }

    /// Ground meters covered by one pixel of a view `view_width_px` pixels wide.
    ///
    /// # Errors
    ///
    /// Returns [`BevError::InvalidViewWidth`] when the view has no width.
    pub fn meters_per_pixel(&self, view_width_px: f64) -> Result<f64, BevError> {
        if view_width_px.is_nan() || view_width_px <= 0.0 {
            return Err(BevError::InvalidViewWidth(view_width_px));
        }
        Ok(self.visible_width_m / view_width_px)
    }

    /// Ground distance in meters between two points of a view `view_width_px` pixels wide.
    pub fn measure_distance(
        &self,
        p1: [f64; 2],
        p2: [f64; 2],
        view_width_px: f64,
    ) -> Result<f64, BevError> {
        let pixel_distance = (p2[0] - p1[0]).hypot(p2[1] - p1[1]);
        Ok(pixel_distance * self.meters_per_pixel(view_width_px)?)
    }
}

impl std::fmt::Display for BevFootprint {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "BEV Area: {:.1}m (W) x {:.1}m (L)",
            self.visible_width_m, self.visible_length_m
        )
    }
}

/// Two-tap distance measurement on the BEV view.
///
/// The first tap sets the start point, the second one yields the distance and starts over.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Measurement {
    start: Option<[f64; 2]>,
}

impl Measurement {
    /// Create a measurement waiting for its start point.
    pub fn new() -> Self {
        Self::default()
    }

    /// The start point, once set.
    pub fn start(&self) -> Option<[f64; 2]> {
        self.start
    }

    /// Register a tap at `point`.
    ///
    /// Returns `None` after the first tap and the distance in meters after the second.
    pub fn tap(
        &mut self,
        point: [f64; 2],
        footprint: &BevFootprint,
        view_width_px: f64,
    ) -> Result<Option<f64>, BevError> {
        match self.start.take() {
            None => {
                self.start = Some(point);
                Ok(None)
            }
            Some(start) => footprint
                .measure_distance(start, point, view_width_px)
                .map(Some),
        }
    }

    /// Forget the start point.
    pub fn reset(&mut self) {
        self.start = None;
    }
}
