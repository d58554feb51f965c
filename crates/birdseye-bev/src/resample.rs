use birdseye_image::{Image, ImageSize};
use birdseye_imgproc::{interpolation::InterpolationMode, warp::warp_perspective};

use crate::error::BevError;
use crate::transform::BevTransform;

fn check_size(expected: ImageSize, actual: ImageSize) -> Result<(), BevError> {
    if expected != actual {
        return Err(BevError::SizeMismatch { expected, actual });
    }
    Ok(())
}

/// Warp a frame into the bird's-eye view.
///
/// `src` and `dst` must both have the size `transform` was computed for. Output pixels
/// that map outside `src` keep their value in `dst`.
///
/// # Errors
///
/// Returns [`BevError::SizeMismatch`] when either image does not match the transform.
pub fn warp_to_birds_eye<const C: usize>(
    src: &Image<f32, C>,
    dst: &mut Image<f32, C>,
    transform: &BevTransform,
    interpolation: InterpolationMode,
) -> Result<(), BevError> {
    check_size(transform.image_size, src.size())?;
    check_size(transform.image_size, dst.size())?;

    warp_perspective(src, dst, &transform.matrix, interpolation)?;

    Ok(())
}

/// Warp an 8-bit RGB frame into a new bird's-eye-view frame of the same size.
///
/// The output starts black, so regions outside the source stay black.
pub fn birds_eye_rgb8(
    src: &Image<u8, 3>,
    transform: &BevTransform,
    interpolation: InterpolationMode,
) -> Result<Image<u8, 3>, BevError> {
    let src_f32 = src.cast_and_scale::<f32>(1.0)?;
    let mut dst_f32 = Image::<f32, 3>::from_size_val(src.size(), 0.0)?;

    warp_to_birds_eye(&src_f32, &mut dst_f32, transform, interpolation)?;

    Ok(dst_f32.convert::<u8>()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::CameraModel;
    use crate::transform::{compute_transform, BevParams};

    fn row_image(size: ImageSize) -> Result<Image<u8, 3>, BevError> {
        Ok(Image::from_fn(size, |_, y| [y as u8, 0, 255 - y as u8])?)
    }

    #[test]
    fn bottom_row_is_preserved() -> Result<(), BevError> {
        let size = ImageSize {
            width: 8,
            height: 100,
        };
        let bev = compute_transform(
            &CameraModel::default(),
            size,
            &BevParams::new(-90.0, 1.5, 10.0),
        )?;
        let src = row_image(size)?;
        let out = birds_eye_rgb8(&src, &bev, InterpolationMode::Bilinear)?;

        assert_eq!(out.size(), size);
        assert_eq!(out.pixel(3, 99)?, src.pixel(3, 99)?);

        // the first output row samples the look-ahead row
        let top = bev.top_row.round() as u8;
        let first = out.pixel(1, 0)?[0];
        assert!(first.abs_diff(top) <= 1, "{first} vs {top}");
        Ok(())
    }

    #[test]
    fn full_frame_transform_is_a_copy() -> Result<(), BevError> {
        let size = ImageSize {
            width: 16,
            height: 12,
        };
        // level device: the look-ahead row clamps to the top of the frame
        let bev = compute_transform(
            &CameraModel::default(),
            size,
            &BevParams::new(0.0, 1.5, 10.0),
        )?;
        let src = row_image(size)?;
        let out = birds_eye_rgb8(&src, &bev, InterpolationMode::Nearest)?;
        assert_eq!(out, src);
        Ok(())
    }

    #[test]
    fn size_mismatch_is_rejected() -> Result<(), BevError> {
        let bev = compute_transform(
            &CameraModel::default(),
            ImageSize {
                width: 640,
                height: 480,
            },
            &BevParams::new(-90.0, 1.5, 10.0),
        )?;
        let src = row_image(ImageSize {
            width: 320,
            height: 240,
        })?;
        let res = birds_eye_rgb8(&src, &bev, InterpolationMode::Bilinear);
        assert!(matches!(res, Err(BevError::SizeMismatch { .. })));
        Ok(())
    }
}
