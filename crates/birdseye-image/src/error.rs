/// An error type for the image module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when the data length does not match the image size.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when the image has zero width or height.
    #[error("Image size must be non-zero, got {0}x{1}")]
    InvalidImageSize(usize, usize),

    /// Error when two images are expected to have the same size.
    #[error("Image size mismatch: expected {0}x{1}, got {2}x{3}")]
    InvalidImageSizeMismatch(usize, usize, usize, usize),

    /// Error when a pixel value cannot be cast to the target type.
    #[error("Failed to cast image data")]
    CastError,

    /// Error when a pixel index is out of bounds.
    #[error("Pixel coordinate ({0}, {1}) is out of bounds ({2}, {3})")]
    PixelIndexOutOfBounds(usize, usize, usize, usize),

    /// Error when a 3x3 matrix is singular and cannot be inverted.
    #[error("Cannot compute the determinant of the transform matrix")]
    CannotComputeDeterminant,

    /// Error when four point correspondences do not define a projective transform.
    #[error("Point correspondences are degenerate: {0}")]
    DegenerateCorrespondences(String),
}
