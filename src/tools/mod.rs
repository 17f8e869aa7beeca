//! Helpers shared by the command-line tool

use crate::error::ImageDecodeError;
use crate::models::ImageBuffer;
use std::path::Path;

/// Load a photo from disk as an RGB buffer
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<ImageBuffer, ImageDecodeError> {
    let rgb = image::open(path)?.to_rgb8();
    let (width, height) = (rgb.width() as usize, rgb.height() as usize);
    ImageBuffer::rgb(rgb.into_raw(), width, height)
}

/// Write a grayscale buffer as an image file; the format follows the extension
pub fn save_gray<P: AsRef<Path>>(image: &ImageBuffer, path: P) -> Result<(), ImageDecodeError> {
    let expected = image.width() * image.height();
    let gray = image::GrayImage::from_raw(
        image.width() as u32,
        image.height() as u32,
        image.as_bytes().to_vec(),
    )
    .ok_or(ImageDecodeError::SizeMismatch {
        expected,
        actual: image.as_bytes().len(),
    })?;
    gray.save(path)?;
    Ok(())
}
