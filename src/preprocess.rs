//! Photo normalization ahead of barcode decoding
//!
//! Produces a single-channel image: downscaled to the configured width,
//! converted to luminance, then pushed away from mid-gray so bars and spaces
//! separate more cleanly.

use crate::config::PipelineConfig;
use crate::error::ImageDecodeError;
use crate::models::ImageBuffer;
use crate::utils::grayscale::map_luma;
use crate::utils::resize::{fit_width, resize};
use tracing::debug;

const MID_GRAY: u8 = 128;

/// Push `y` away from mid-gray by `delta`, clamped to 0..=255
#[inline]
pub fn push_contrast(y: u8, delta: u8) -> u8 {
    if y < MID_GRAY {
        y.saturating_sub(delta)
    } else {
        y.saturating_add(delta)
    }
}

/// Contrast-enhanced grayscale copy of `image`
///
/// Output width is at most `config.max_width` (aspect preserved); the input
/// is never modified.
pub fn preprocess(
    image: &ImageBuffer,
    config: &PipelineConfig,
) -> Result<ImageBuffer, ImageDecodeError> {
    let delta = config.contrast_delta;

    let scaled;
    let source = match fit_width(image.width(), image.height(), config.max_width) {
        Some((w, h)) => {
            debug!(
                from_w = image.width(),
                from_h = image.height(),
                to_w = w,
                to_h = h,
                "downscaling photo"
            );
            scaled = resize(image, w, h)?;
            &scaled
        }
        None => image,
    };

    let gray = map_luma(source, |y| push_contrast(y, delta));
    ImageBuffer::gray(gray, source.width(), source.height())
}
