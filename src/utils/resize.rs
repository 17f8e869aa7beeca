use crate::error::ImageDecodeError;
use crate::models::{ChannelLayout, ImageBuffer};
use image::imageops::{self, FilterType};
use image::{Luma, Rgb, Rgba};

/// Target size for a proportional downscale to at most `max_width` columns
///
/// Returns `None` when the image is already narrow enough.
pub fn fit_width(width: usize, height: usize, max_width: usize) -> Option<(usize, usize)> {
    if max_width == 0 || width <= max_width {
        return None;
    }
    let scale = max_width as f64 / width as f64;
    let new_h = (height as f64 * scale).round().max(1.0) as usize;
    Some((max_width, new_h))
}

/// Resize to exactly `new_w` x `new_h` with a triangle filter, keeping the layout
pub fn resize(
    image: &ImageBuffer,
    new_w: usize,
    new_h: usize,
) -> Result<ImageBuffer, ImageDecodeError> {
    let (w, h) = (image.width() as u32, image.height() as u32);
    let (nw, nh) = (new_w as u32, new_h as u32);
    let raw = image.as_bytes().to_vec();
    let mismatch = || ImageDecodeError::SizeMismatch {
        expected: image.width() * image.height() * image.channels(),
        actual: image.as_bytes().len(),
    };

    let out = match image.layout() {
        ChannelLayout::Gray => {
            let src = image::ImageBuffer::<Luma<u8>, _>::from_raw(w, h, raw).ok_or_else(mismatch)?;
            imageops::resize(&src, nw, nh, FilterType::Triangle).into_raw()
        }
        ChannelLayout::Rgb => {
            let src = image::ImageBuffer::<Rgb<u8>, _>::from_raw(w, h, raw).ok_or_else(mismatch)?;
            imageops::resize(&src, nw, nh, FilterType::Triangle).into_raw()
        }
        ChannelLayout::Rgba => {
            let src = image::ImageBuffer::<Rgba<u8>, _>::from_raw(w, h, raw).ok_or_else(mismatch)?;
            imageops::resize(&src, nw, nh, FilterType::Triangle).into_raw()
        }
    };

    ImageBuffer::new(out, new_w, new_h, image.layout())
}
