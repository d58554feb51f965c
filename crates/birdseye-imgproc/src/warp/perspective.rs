use crate::{
    interpolation::{grid::meshgrid_from_fn, interpolate_pixel, InterpolationMode},
    parallel,
};

use birdseye_image::{Image, ImageError};

/// Distance in pixels a preimage may fall outside the left or top edge and still be
/// sampled from the edge.
const BORDER_TOLERANCE: f32 = 1e-3;

#[rustfmt::skip]
pub(crate) fn determinant3x3(m: &[f64; 9]) -> f64 {
    m[0] * (m[4] * m[8] - m[5] * m[7]) -
    m[1] * (m[3] * m[8] - m[5] * m[6]) +
    m[2] * (m[3] * m[7] - m[4] * m[6])
}

#[rustfmt::skip]
fn adjugate3x3(m: &[f64; 9]) -> [f64; 9] {
    [
        m[4] * m[8] - m[5] * m[7],  // [0, 0]
        m[2] * m[7] - m[1] * m[8],  // [0, 1]
        m[1] * m[5] - m[2] * m[4],  // [0, 2]
        m[5] * m[6] - m[3] * m[8],  // [1, 0]
        m[0] * m[8] - m[2] * m[6],  // [1, 1]
        m[2] * m[3] - m[0] * m[5],  // [1, 2]
        m[3] * m[7] - m[4] * m[6],  // [2, 0]
        m[1] * m[6] - m[0] * m[7],  // [2, 1]
        m[0] * m[4] - m[1] * m[3],  // [2, 2]
    ]
}

/// Invert a row-major 3x3 perspective transform.
///
/// # Errors
///
/// Returns [`ImageError::CannotComputeDeterminant`] when the matrix is singular.
pub fn invert_perspective_transform(m: &[f64; 9]) -> Result<[f64; 9], ImageError> {
    let det = determinant3x3(m);

    if det == 0.0 || !det.is_finite() {
        return Err(ImageError::CannotComputeDeterminant);
    }

    let adj = adjugate3x3(m);
    let inv_det = 1.0 / det;

    let mut inv_m = [0.0; 9];
    for (dst, a) in inv_m.iter_mut().zip(adj.iter()) {
        *dst = a * inv_det;
    }

    Ok(inv_m)
}

/// Map the point `(x, y)` through the row-major 3x3 perspective transform `m`.
pub fn transform_point(x: f64, y: f64, m: &[f64; 9]) -> (f64, f64) {
    let w = m[6] * x + m[7] * y + m[8];
    let xt = (m[0] * x + m[1] * y + m[2]) / w;
    let yt = (m[3] * x + m[4] * y + m[5]) / w;
    (xt, yt)
}

/// Applies a perspective transformation to an image.
///
/// Every destination pixel is mapped back through the inverse of `m` and sampled from
/// `src`. Destination pixels whose preimage falls outside `src` keep their current value,
/// so a zero-initialised `dst` yields a constant black border.
///
/// * `src` - The input image with shape (height, width, channels).
/// * `dst` - The output image with shape (new_height, new_width, channels).
/// * `m` - The row-major 3x3 perspective transformation matrix src -> dst.
/// * `interpolation` - The interpolation mode to use.
///
/// # Example
///
/// ```
/// use birdseye_image::{Image, ImageSize};
/// use birdseye_imgproc::interpolation::InterpolationMode;
/// use birdseye_imgproc::warp::warp_perspective;
///
/// let src = Image::<f32, 1>::new(
///     ImageSize { width: 4, height: 5 },
///     vec![0.0f32; 4 * 5],
/// ).unwrap();
///
/// let m = [1.0, 0.0, -1.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0];
///
/// let mut dst = Image::<f32, 1>::from_size_val(
///     ImageSize { width: 2, height: 3 },
///     0.0,
/// ).unwrap();
///
/// warp_perspective(&src, &mut dst, &m, InterpolationMode::Bilinear).unwrap();
///
/// assert_eq!(dst.size().width, 2);
/// assert_eq!(dst.size().height, 3);
/// ```
pub fn warp_perspective<const C: usize>(
    src: &Image<f32, C>,
    dst: &mut Image<f32, C>,
    m: &[f64; 9],
    interpolation: InterpolationMode,
) -> Result<(), ImageError> {
    if src.size().is_empty() {
        return Err(ImageError::InvalidImageSize(src.width(), src.height()));
    }

    let inv_m = invert_perspective_transform(m)?;

    // find the position in src of every dst pixel
    let map = meshgrid_from_fn(dst.cols(), dst.rows(), |x, y| {
        let (xsrc, ysrc) = transform_point(x as f64, y as f64, &inv_m);
        (xsrc as f32, ysrc as f32)
    });

    let (cols, rows) = (src.cols() as f32, src.rows() as f32);
    parallel::par_iter_rows_resample(dst, &map, |x, y, dst_pixel| {
        // absorb round-off of the solved matrix along the left and top edges
        if x >= -BORDER_TOLERANCE && x < cols && y >= -BORDER_TOLERANCE && y < rows {
            let pixel = interpolate_pixel(src, x.max(0.0), y.max(0.0), interpolation);
            dst_pixel.copy_from_slice(&pixel);
        }
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use birdseye_image::ImageSize;

    #[test]
    fn inverse_perspective_matrix() -> Result<(), ImageError> {
        let m = [1.0, 0.0, -1.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0];
        let expected = [1.0, 0.0, 1.0, 0.0, 1.0, -1.0, 0.0, 0.0, 1.0];
        let inv_m = invert_perspective_transform(&m)?;
        assert_eq!(inv_m, expected);
        Ok(())
    }

    #[test]
    fn inverse_singular_matrix() {
        let m = [1.0, 2.0, 3.0, 2.0, 4.0, 6.0, 0.0, 0.0, 1.0];
        assert_eq!(
            invert_perspective_transform(&m),
            Err(ImageError::CannotComputeDeterminant)
        );
    }

    #[test]
    fn transform_point_projective() {
        let m = [1.0, 0.0, -1.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0];
        assert_eq!(transform_point(1.0, 1.0, &m), (0.0, 2.0));

        // w = 2 halves the coordinates
        let m = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 2.0];
        assert_eq!(transform_point(4.0, 6.0, &m), (2.0, 3.0));
    }

    #[test]
    fn warp_perspective_hflip() -> Result<(), ImageError> {
        let image = Image::<_, 1>::new(
            ImageSize {
                width: 2,
                height: 3,
            },
            vec![0.0f32, 1.0, 2.0, 3.0, 4.0, 5.0],
        )?;

        let m = [-1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0];

        let mut image_transformed = Image::<_, 1>::from_size_val(image.size(), 0.0)?;
        warp_perspective(
            &image,
            &mut image_transformed,
            &m,
            InterpolationMode::Bilinear,
        )?;

        assert_eq!(image_transformed.as_slice(), &[1.0, 0.0, 3.0, 2.0, 5.0, 4.0]);
        Ok(())
    }

    #[test]
    fn warp_perspective_shift_keeps_border() -> Result<(), ImageError> {
        let image = Image::<_, 1>::new(
            ImageSize {
                width: 4,
                height: 4,
            },
            (0..16).map(|v| v as f32).collect(),
        )?;

        // shift left by 1 pixel
        let m = [1.0, 0.0, -1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0];

        let mut image_transformed = Image::<_, 1>::from_size_val(image.size(), -1.0)?;
        warp_perspective(
            &image,
            &mut image_transformed,
            &m,
            InterpolationMode::Nearest,
        )?;

        let expected = vec![
            1.0f32, 2.0, 3.0, -1.0, 5.0, 6.0, 7.0, -1.0, 9.0, 10.0, 11.0, -1.0, 13.0, 14.0, 15.0,
            -1.0,
        ];
        assert_eq!(image_transformed.as_slice(), expected);
        Ok(())
    }

    #[test]
    fn warp_perspective_vertical_stretch() -> Result<(), ImageError> {
        // rows 2..4 of the source fill the whole output
        let image = Image::<f32, 1>::from_fn(
            ImageSize {
                width: 2,
                height: 4,
            },
            |_, y| [y as f32],
        )?;
        let m = [1.0, 0.0, 0.0, 0.0, 2.0, -4.0, 0.0, 0.0, 1.0];

        let mut out = Image::<f32, 1>::from_size_val(image.size(), 0.0)?;
        warp_perspective(&image, &mut out, &m, InterpolationMode::Bilinear)?;

        assert_eq!(out.as_slice(), &[2.0, 2.0, 2.5, 2.5, 3.0, 3.0, 3.0, 3.0]);
        Ok(())
    }
}
