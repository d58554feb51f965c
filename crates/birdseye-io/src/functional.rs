use std::path::Path;

use birdseye_image::{Image, ImageSize};

use crate::error::IoError;

/// Reads an image in any format supported by the image crate and converts it to RGB8.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Returns
///
/// An RGB8 image with the decoded data.
pub fn read_image_any_rgb8(file_path: impl AsRef<Path>) -> Result<Image<u8, 3>, IoError> {
    let file_path = file_path.as_ref();

    // verify the file exists
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    let img = image::ImageReader::open(file_path)?
        .with_guessed_format()?
        .decode()?;

    let size = ImageSize {
        width: img.width() as usize,
        height: img.height() as usize,
    };

    Ok(Image::new(size, img.into_rgb8().into_raw())?)
}

/// Writes an RGB8 image to a PNG file.
///
/// # Arguments
///
/// * `file_path` - The path to the output file, with a `png` extension.
/// * `image` - The image to encode.
pub fn write_image_png_rgb8(
    file_path: impl AsRef<Path>,
    image: &Image<u8, 3>,
) -> Result<(), IoError> {
    let file_path = file_path.as_ref();

    if file_path
        .extension()
        .map_or(true, |ext| !ext.eq_ignore_ascii_case("png"))
    {
        return Err(IoError::InvalidFileExtension(file_path.to_path_buf()));
    }

    let buffer = image::RgbImage::from_raw(
        image.width() as u32,
        image.height() as u32,
        image.as_slice().to_vec(),
    )
    .ok_or_else(|| IoError::PngEncodingError("buffer does not match the image size".into()))?;

    buffer.save_with_format(file_path, image::ImageFormat::Png)?;

    Ok(())
}
