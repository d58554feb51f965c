use super::bilinear::bilinear_interpolation;
use super::nearest::nearest_neighbor_interpolation;
use birdseye_image::Image;

/// Interpolation mode used when resampling an image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InterpolationMode {
    /// Bilinear interpolation
    #[default]
    Bilinear,
    /// Nearest neighbor interpolation
    Nearest,
}

/// Kernel for interpolating a pixel value
///
/// # Arguments
///
/// * `image` - The input image container with shape (height, width, C).
/// * `u` - The x coordinate of the pixel to interpolate.
/// * `v` - The y coordinate of the pixel to interpolate.
/// * `interpolation` - The interpolation mode to use.
///
/// # Returns
///
/// The interpolated channel values.
///
/// PRECONDITION: `0 <= u < cols` and `0 <= v < rows`.
pub fn interpolate_pixel<const C: usize>(
    image: &Image<f32, C>,
    u: f32,
    v: f32,
    interpolation: InterpolationMode,
) -> [f32; C] {
    match interpolation {
        InterpolationMode::Bilinear => bilinear_interpolation(image, u, v),
        InterpolationMode::Nearest => nearest_neighbor_interpolation(image, u, v),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use birdseye_image::{ImageError, ImageSize};

    #[test]
    fn interpolate_center_of_four() -> Result<(), ImageError> {
        let image = Image::<f32, 1>::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![0.0, 1.0, 2.0, 3.0],
        )?;
        let bilinear = interpolate_pixel(&image, 0.5, 0.5, InterpolationMode::Bilinear);
        assert_eq!(bilinear, [1.5]);
        let nearest = interpolate_pixel(&image, 0.4, 0.6, InterpolationMode::Nearest);
        assert_eq!(nearest, [2.0]);
        Ok(())
    }

    #[test]
    fn interpolate_last_column_does_not_overflow() -> Result<(), ImageError> {
        let image = Image::<f32, 2>::new(
            ImageSize {
                width: 2,
                height: 1,
            },
            vec![0.0, 10.0, 4.0, 20.0],
        )?;
        let pixel = interpolate_pixel(&image, 1.5, 0.0, InterpolationMode::Bilinear);
        assert_eq!(pixel, [4.0, 20.0]);
        Ok(())
    }
}
