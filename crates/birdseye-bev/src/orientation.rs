use std::sync::{Arc, Mutex};

use crate::error::BevError;

/// Convert a rotation-vector sensor sample to a row-major 3x3 rotation matrix.
///
/// The sample holds the vector part `(x, y, z)` of the unit quaternion describing the
/// device attitude, optionally followed by its scalar part `w`. When `w` is missing it is
/// recovered from the unit norm.
///
/// # Errors
///
/// Returns [`BevError::InvalidRotationVector`] when the sample has fewer than 3 values.
pub fn rotation_matrix_from_vector(rotation_vector: &[f32]) -> Result<[f64; 9], BevError> {
    let (q1, q2, q3) = match rotation_vector {
        [x, y, z, ..] => (*x as f64, *y as f64, *z as f64),
        _ => return Err(BevError::InvalidRotationVector(rotation_vector.len())),
    };
    let q0 = match rotation_vector.get(3) {
        Some(w) => *w as f64,
        None => (1.0 - q1 * q1 - q2 * q2 - q3 * q3).max(0.0).sqrt(),
    };

    let sq_q1 = 2.0 * q1 * q1;
    let sq_q2 = 2.0 * q2 * q2;
    let sq_q3 = 2.0 * q3 * q3;
    let q1_q2 = 2.0 * q1 * q2;
    let q3_q0 = 2.0 * q3 * q0;
    let q1_q3 = 2.0 * q1 * q3;
    let q2_q0 = 2.0 * q2 * q0;
    let q2_q3 = 2.0 * q2 * q3;
    let q1_q0 = 2.0 * q1 * q0;

    #[rustfmt::skip]
    let r = [
        1.0 - sq_q2 - sq_q3, q1_q2 - q3_q0,       q1_q3 + q2_q0,
        q1_q2 + q3_q0,       1.0 - sq_q1 - sq_q3, q2_q3 - q1_q0,
        q1_q3 - q2_q0,       q2_q3 + q1_q0,       1.0 - sq_q1 - sq_q2,
    ];

    Ok(r)
}

/// Device attitude in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Orientation {
    /// Rotation about the vertical axis.
    pub azimuth_deg: f64,
    /// Tilt about the device x axis; -90 when the device stands upright.
    pub pitch_deg: f64,
    /// Tilt about the device y axis.
    pub roll_deg: f64,
}

impl Orientation {
    /// Create an orientation from its angles in degrees.
    pub fn new(azimuth_deg: f64, pitch_deg: f64, roll_deg: f64) -> Self {
        Self {
            azimuth_deg,
            pitch_deg,
            roll_deg,
        }
    }

    /// Decompose a row-major rotation matrix into azimuth, pitch and roll.
    pub fn from_rotation_matrix(r: &[f64; 9]) -> Self {
        let azimuth = r[1].atan2(r[4]);
        let pitch = (-r[7]).clamp(-1.0, 1.0).asin();
        let roll = (-r[6]).atan2(r[8]);
        Self::new(azimuth.to_degrees(), pitch.to_degrees(), roll.to_degrees())
    }

    /// Decompose a rotation-vector sensor sample.
    pub fn from_rotation_vector(rotation_vector: &[f32]) -> Result<Self, BevError> {
        let r = rotation_matrix_from_vector(rotation_vector)?;
        Ok(Self::from_rotation_matrix(&r))
    }
}

/// Latest device orientation, shared between the sensor and the frame processing.
///
/// The sensor side pushes samples at its own rate; frame processing reads the last value
/// when a frame arrives. Clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct OrientationState {
    inner: Arc<Mutex<Orientation>>,
}

impl OrientationState {
    /// Create a state holding a level orientation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new orientation.
    pub fn update(&self, orientation: Orientation) {
        let mut guard = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        *guard = orientation;
    }

    /// Decode a rotation-vector sample and store it.
    pub fn update_from_rotation_vector(&self, rotation_vector: &[f32]) -> Result<(), BevError> {
        let orientation = Orientation::from_rotation_vector(rotation_vector)?;
        log::trace!("orientation update: {orientation:?}");
        self.update(orientation);
        Ok(())
    }

    /// The last stored orientation.
    pub fn latest(&self) -> Orientation {
        *self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}
