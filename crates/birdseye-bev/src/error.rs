use birdseye_image::{ImageError, ImageSize};

/// An error type for the bev module.
#[derive(thiserror::Error, Debug)]
pub enum BevError {
    /// The look-ahead distance is zero or negative.
    #[error("Look-ahead distance must be > 0 m, got {0}")]
    InvalidLookAhead(f64),

    /// The image has zero width or height.
    #[error("Image size must be non-zero, got {0}x{1}")]
    InvalidImageSize(usize, usize),

    /// A parameter is NaN or infinite.
    #[error("Parameter `{0}` must be finite, got {1}")]
    NonFiniteParameter(&'static str, f64),

    /// The camera model cannot describe a pinhole camera.
    #[error("Invalid camera model: {0}")]
    InvalidCameraModel(String),

    /// The transform was computed for another image size.
    #[error("Transform was computed for {expected} but the image is {actual}")]
    SizeMismatch {
        /// The size the transform was computed for.
        expected: ImageSize,
        /// The size of the image being processed.
        actual: ImageSize,
    },

    /// A rotation-vector sample has fewer than three components.
    #[error("Rotation vector needs at least 3 components, got {0}")]
    InvalidRotationVector(usize),

    /// The on-screen view used for measurement has no width.
    #[error("View width must be > 0 px, got {0}")]
    InvalidViewWidth(f64),

    /// Error raised by the image containers or the resampler.
    #[error(transparent)]
    ImageError(#[from] ImageError),

    /// Error reading a configuration file.
    #[error("Failed to read the config file. {0}")]
    ConfigIoError(#[from] std::io::Error),

    /// Error parsing a configuration file.
    #[error("Failed to parse the config file. {0}")]
    ConfigParseError(#[from] serde_json::Error),
}

/// Reject NaN and infinite values of the parameter `name`.
pub(crate) fn ensure_finite(name: &'static str, value: f64) -> Result<f64, BevError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(BevError::NonFiniteParameter(name, value))
    }
}
