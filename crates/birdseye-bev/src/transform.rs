use birdseye_image::ImageSize;
use birdseye_imgproc::warp::{get_perspective_transform, transform_point};

use crate::camera::CameraModel;
use crate::error::{ensure_finite, BevError};

/// Camera pose and operator inputs for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BevParams {
    /// Device pitch in degrees, in the rotation-vector sensor convention.
    pub pitch_deg: f64,
    /// Device roll in degrees. Carried along but not used by the transform.
    pub roll_deg: f64,
    /// Height of the camera above the ground plane in meters.
    pub camera_height_m: f64,
    /// Farthest ground distance shown in the BEV output, in meters.
    pub look_ahead_m: f64,
}

impl BevParams {
    /// Create the parameters for a level-roll device.
    pub fn new(pitch_deg: f64, camera_height_m: f64, look_ahead_m: f64) -> Self {
        Self {
            pitch_deg,
            roll_deg: 0.0,
            camera_height_m,
            look_ahead_m,
        }
    }

    /// Set the device roll in degrees.
    pub fn with_roll(mut self, roll_deg: f64) -> Self {
        self.roll_deg = roll_deg;
        self
    }
}

/// Whether the look-ahead row had to be clamped into the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopRowClamp {
    /// The look-ahead row lies inside the frame.
    None,
    /// The look-ahead row is above the frame; the whole frame is treated as ground.
    Top,
    /// The look-ahead row is below the frame; almost no ground is visible.
    Bottom,
}

/// The BEV homography together with the geometry it was solved from.
#[derive(Debug, Clone, PartialEq)]
pub struct BevTransform {
    /// Row-major 3x3 perspective transform from the camera frame to the BEV frame.
    pub matrix: [f64; 9],
    /// Bottom-left, bottom-right, top-right, top-left corners of the ground region.
    pub src_quad: [[f64; 2]; 4],
    /// The corners of the output frame, in the same order as `src_quad`.
    pub dst_quad: [[f64; 2]; 4],
    /// Image row of the look-ahead point, clamped to `[0, height - 1]`.
    pub top_row: f64,
    /// Image row of the look-ahead point before clamping.
    pub raw_top_row: f64,
    /// Which side, if any, the look-ahead row was clamped to.
    pub clamp: TopRowClamp,
    /// Focal length in pixels used to compute the transform.
    pub focal_length_px: f64,
    /// Size of the frames this transform applies to.
    pub image_size: ImageSize,
}

impl BevTransform {
    /// Map a camera-frame pixel into the BEV frame.
    pub fn map_point(&self, x: f64, y: f64) -> (f64, f64) {
        transform_point(x, y, &self.matrix)
    }

    /// Whether the ground region had to be clamped to the frame.
    pub fn is_clamped(&self) -> bool {
        self.clamp != TopRowClamp::None
    }
}

/// Unclamped row for a ground point; inputs are assumed validated.
fn look_ahead_row(
    camera: &CameraModel,
    image_height: f64,
    pitch_deg: f64,
    camera_height_m: f64,
    distance_m: f64,
) -> f64 {
    let cam_pitch_rad = camera.optical_axis_pitch_rad(pitch_deg);
    let f = camera.focal_length_px(image_height);

    // angle below the horizon of the ground point
    let angle_to_target = (camera_height_m / distance_m).atan();
    // angle of the same point above the optical axis
    let angle_in_cam = cam_pitch_rad - angle_to_target;

    let y_offset = f * angle_in_cam.tan();
    image_height / 2.0 - y_offset
}

fn validate_distance(distance_m: f64) -> Result<f64, BevError> {
    if distance_m.is_nan() || distance_m <= 0.0 {
        return Err(BevError::InvalidLookAhead(distance_m));
    }
    ensure_finite("look_ahead_m", distance_m)
}

/// Image row, without clamping, where a ground point `distance_m` ahead of the camera
/// is seen.
///
/// Rows above the frame are negative and rows below it exceed `image_height`.
///
/// # Errors
///
/// Fails when `distance_m <= 0` or when any input is not finite.
pub fn ground_row(
    camera: &CameraModel,
    image_height: usize,
    pitch_deg: f64,
    camera_height_m: f64,
    distance_m: f64,
) -> Result<f64, BevError> {
    let distance_m = validate_distance(distance_m)?;
    ensure_finite("pitch_deg", pitch_deg)?;
    ensure_finite("camera_height_m", camera_height_m)?;
    camera.validate()?;

    Ok(look_ahead_row(
        camera,
        image_height as f64,
        pitch_deg,
        camera_height_m,
        distance_m,
    ))
}

/// Ground distance in meters seen at image row `row`.
///
/// Returns `None` when the row looks at or above the horizon, or for a camera at or below
/// the ground plane.
pub fn row_to_ground_distance(
    camera: &CameraModel,
    image_height: usize,
    pitch_deg: f64,
    camera_height_m: f64,
    row: f64,
) -> Option<f64> {
    if camera_height_m <= 0.0 || camera.validate().is_err() {
        return None;
    }
    let image_height = image_height as f64;
    let f = camera.focal_length_px(image_height);
    let angle_in_cam = ((image_height / 2.0 - row) / f).atan();
    let angle_to_target = camera.optical_axis_pitch_rad(pitch_deg) - angle_in_cam;

    if !(angle_to_target > 0.0 && angle_to_target < std::f64::consts::FRAC_PI_2) {
        return None;
    }
    Some(camera_height_m / angle_to_target.tan())
}

/// Compute the BEV homography for one frame.
///
/// The ground region of the frame runs from the bottom edge up to the row where the
/// look-ahead point is seen. Its corners, bottom-left, bottom-right, top-right, top-left,
/// are mapped in this order onto the corners of the full output frame.
///
/// A non-positive camera height is accepted but yields a transform without physical
/// meaning.
///
/// # Errors
///
/// * [`BevError::InvalidImageSize`] when the frame has no pixels.
/// * [`BevError::InvalidLookAhead`] when `look_ahead_m <= 0`.
/// * [`BevError::NonFiniteParameter`] when an input is NaN or infinite.
pub fn compute_transform(
    camera: &CameraModel,
    image_size: ImageSize,
    params: &BevParams,
) -> Result<BevTransform, BevError> {
    if image_size.is_empty() {
        return Err(BevError::InvalidImageSize(
            image_size.width,
            image_size.height,
        ));
    }

    let raw_top_row = ground_row(
        camera,
        image_size.height,
        params.pitch_deg,
        params.camera_height_m,
        params.look_ahead_m,
    )?;

    let (w, h) = (image_size.width as f64, image_size.height as f64);
    let max_row = h - 1.0;

    let (top_row, clamp) = if raw_top_row < 0.0 {
        (0.0, TopRowClamp::Top)
    } else if raw_top_row > max_row {
        (max_row, TopRowClamp::Bottom)
    } else {
        (raw_top_row, TopRowClamp::None)
    };

    match clamp {
        TopRowClamp::Top => log::warn!(
            "look-ahead row {raw_top_row:.1} is above the frame, clamped to 0: \
             the whole frame is treated as ground"
        ),
        TopRowClamp::Bottom => log::warn!(
            "look-ahead row {raw_top_row:.1} is below the frame, clamped to {max_row}: \
             the visible ground region is empty"
        ),
        TopRowClamp::None => {}
    }

    let src_quad = [[0.0, h], [w, h], [w, top_row], [0.0, top_row]];
    let dst_quad = [[0.0, h], [w, h], [w, 0.0], [0.0, 0.0]];

    let matrix = get_perspective_transform(&src_quad, &dst_quad)?;

    let focal_length_px = camera.focal_length_px(h);
    log::debug!(
        "bev transform: pitch {:.2} deg, height {:.2} m, look-ahead {:.2} m, f {:.2} px, \
         top row {:.2}",
        params.pitch_deg,
        params.camera_height_m,
        params.look_ahead_m,
        focal_length_px,
        top_row
    );

    Ok(BevTransform {
        matrix,
        src_quad,
        dst_quad,
        top_row,
        raw_top_row,
        clamp,
        focal_length_px,
        image_size,
    })
}

/// Compute only the BEV matrix, with the default camera model.
///
/// # Arguments
///
/// * `width` - Frame width in pixels.
/// * `height` - Frame height in pixels.
/// * `pitch_deg` - Device pitch in degrees, sensor convention.
/// * `camera_height_m` - Camera height above the ground in meters.
/// * `look_ahead_m` - Farthest ground distance to show, in meters.
pub fn compute_perspective_matrix(
    width: usize,
    height: usize,
    pitch_deg: f64,
    camera_height_m: f64,
    look_ahead_m: f64,
) -> Result<[f64; 9], BevError> {
    let params = BevParams::new(pitch_deg, camera_height_m, look_ahead_m);
    compute_transform(&CameraModel::default(), ImageSize { width, height }, &params)
        .map(|bev| bev.matrix)
}
