/// Luminance conversion for interleaved 8-bit images
/// Y ~= 0.299*R + 0.587*G + 0.114*B
/// Uses fast integer arithmetic: Y = (76*R + 150*G + 29*B) >> 8
/// The weights sum to 255, so pure white maps to 254.
use crate::models::{ChannelLayout, ImageBuffer};
use rayon::prelude::*;

/// Coefficients for grayscale conversion: Y = (76*R + 150*G + 29*B) >> 8
const COEF_R: u32 = 76;
const COEF_G: u32 = 150;
const COEF_B: u32 = 29;

/// Images with fewer pixels than this are converted on the calling thread
const PARALLEL_MIN_PIXELS: usize = 256 * 256;

/// Luminance of one RGB pixel
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> u8 {
    let lum = (COEF_R * r as u32 + COEF_G * g as u32 + COEF_B * b as u32) >> 8;
    lum.min(255) as u8
}

#[inline]
fn pixel_luminance(px: &[u8], layout: ChannelLayout) -> u8 {
    match layout {
        ChannelLayout::Gray => px[0],
        ChannelLayout::Rgb | ChannelLayout::Rgba => luminance(px[0], px[1], px[2]),
    }
}

/// Convert any layout to one luminance byte per pixel
pub fn to_luma(image: &ImageBuffer) -> Vec<u8> {
    map_luma(image, |y| y)
}

/// Convert to luminance and apply `f` to every value in the same pass
///
/// Rows are processed in parallel for large images. `f` must be a pure
/// per-pixel function; the output does not depend on scheduling.
pub fn map_luma<F>(image: &ImageBuffer, f: F) -> Vec<u8>
where
    F: Fn(u8) -> u8 + Sync,
{
    let (width, height) = (image.width(), image.height());
    let layout = image.layout();
    let channels = layout.channels();
    let src = image.as_bytes();
    let mut gray = vec![0u8; width * height];

    let convert_row = |(y, row): (usize, &mut [u8])| {
        let row_start = y * width * channels;
        for (x, out) in row.iter_mut().enumerate() {
            let idx = row_start + x * channels;
            *out = f(pixel_luminance(&src[idx..idx + channels], layout));
        }
    };

    if width * height >= PARALLEL_MIN_PIXELS {
        gray.par_chunks_mut(width).enumerate().for_each(convert_row);
    } else {
        gray.chunks_mut(width).enumerate().for_each(convert_row);
    }

    gray
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luminance() {
        assert_eq!(luminance(255, 255, 255), 254);
        assert_eq!(luminance(0, 0, 0), 0);

        let red = luminance(255, 0, 0);
        assert!(red > 0 && red < 255);
        assert!(luminance(0, 255, 0) > 100);
    }

    #[test]
    fn test_to_luma_layouts() {
        let rgb = ImageBuffer::rgb(vec![255, 0, 0, 0, 255, 0, 0, 0, 255, 255, 255, 255], 2, 2)
            .unwrap();
        let gray = to_luma(&rgb);
        assert_eq!(gray.len(), 4);
        assert!(gray[3] >= 254);

        let rgba = ImageBuffer::rgba(vec![255, 128, 64, 0], 1, 1).unwrap();
        assert_eq!(to_luma(&rgba), vec![luminance(255, 128, 64)]);

        let g = ImageBuffer::gray(vec![7, 9], 2, 1).unwrap();
        assert_eq!(to_luma(&g), vec![7, 9]);
    }

    #[test]
    fn test_parallel_matches_serial() {
        let (w, h) = (300, 300);
        let data: Vec<u8> = (0..w * h * 3).map(|i| (i * 31 % 251) as u8).collect();
        let img = ImageBuffer::rgb(data.clone(), w, h).unwrap();
        let parallel = to_luma(&img);
        let serial: Vec<u8> = data
            .chunks(3)
            .map(|px| luminance(px[0], px[1], px[2]))
            .collect();
        assert_eq!(parallel, serial);
    }
}
