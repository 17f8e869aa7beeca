//! Clockwise rotation of image buffers about their centre
//!
//! The output canvas is the bounding box of the rotated rectangle, so no
//! content is clipped. Right angles are exact index remaps; other angles use
//! inverse-mapped nearest-neighbour sampling with a white background.

use crate::error::ImageDecodeError;
use crate::models::ImageBuffer;
use serde::Serialize;
use std::fmt;

/// One of the four right angles tried by the decode search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RotationAngle {
    /// No rotation
    Deg0,
    /// Quarter turn clockwise
    Deg90,
    /// Half turn
    Deg180,
    /// Three quarter turns clockwise
    Deg270,
}

impl RotationAngle {
    /// Search order
    pub const ALL: [RotationAngle; 4] = [
        RotationAngle::Deg0,
        RotationAngle::Deg90,
        RotationAngle::Deg180,
        RotationAngle::Deg270,
    ];

    /// Angle in degrees
    pub fn degrees(self) -> u32 {
        match self {
            RotationAngle::Deg0 => 0,
            RotationAngle::Deg90 => 90,
            RotationAngle::Deg180 => 180,
            RotationAngle::Deg270 => 270,
        }
    }
}

impl fmt::Display for RotationAngle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

/// Rotate by a right angle
pub fn rotate(image: &ImageBuffer, angle: RotationAngle) -> Result<ImageBuffer, ImageDecodeError> {
    let (w, h) = (image.width(), image.height());
    let c = image.channels();
    let src = image.as_bytes();

    let (out_w, out_h) = match angle {
        RotationAngle::Deg0 | RotationAngle::Deg180 => (w, h),
        RotationAngle::Deg90 | RotationAngle::Deg270 => (h, w),
    };
    let mut out = vec![0u8; src.len()];

    for y in 0..h {
        for x in 0..w {
            let (nx, ny) = match angle {
                RotationAngle::Deg0 => (x, y),
                RotationAngle::Deg90 => (h - 1 - y, x),
                RotationAngle::Deg180 => (w - 1 - x, h - 1 - y),
                RotationAngle::Deg270 => (y, w - 1 - x),
            };
            let from = (y * w + x) * c;
            let to = (ny * out_w + nx) * c;
            out[to..to + c].copy_from_slice(&src[from..from + c]);
        }
    }

    ImageBuffer::new(out, out_w, out_h, image.layout())
}

/// Rotate clockwise by an arbitrary angle in degrees
pub fn rotate_degrees(image: &ImageBuffer, degrees: f64) -> Result<ImageBuffer, ImageDecodeError> {
    let normalized = degrees.rem_euclid(360.0);
    for angle in RotationAngle::ALL {
        if (normalized - angle.degrees() as f64).abs() < 1e-9 {
            return rotate(image, angle);
        }
    }

    let (w, h) = (image.width() as f64, image.height() as f64);
    let rad = normalized.to_radians();
    let (sin_a, cos_a) = rad.sin_cos();

    let new_w = (w * cos_a.abs() + h * sin_a.abs()).ceil().max(1.0) as usize;
    let new_h = (w * sin_a.abs() + h * cos_a.abs()).ceil().max(1.0) as usize;

    let (cx, cy) = (w / 2.0, h / 2.0);
    let (ncx, ncy) = (new_w as f64 / 2.0, new_h as f64 / 2.0);
    let c = image.channels();
    let mut out = vec![255u8; new_w * new_h * c];

    for ny in 0..new_h {
        for nx in 0..new_w {
            // Sample at pixel centres; inverse of a clockwise rotation in y-down space
            let dx = nx as f64 + 0.5 - ncx;
            let dy = ny as f64 + 0.5 - ncy;
            let ox = dx * cos_a + dy * sin_a + cx;
            let oy = -dx * sin_a + dy * cos_a + cy;
            if ox < 0.0 || oy < 0.0 || ox >= w || oy >= h {
                continue;
            }
            let to = (ny * new_w + nx) * c;
            out[to..to + c].copy_from_slice(image.pixel(ox as usize, oy as usize));
        }
    }

    ImageBuffer::new(out, new_w, new_h, image.layout())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ImageBuffer {
        // 3x2:
        // 1 2 3
        // 4 5 6
        ImageBuffer::gray(vec![1, 2, 3, 4, 5, 6], 3, 2).unwrap()
    }

    #[test]
    fn test_rotate_90_clockwise() {
        let r = rotate(&sample(), RotationAngle::Deg90).unwrap();
        assert_eq!((r.width(), r.height()), (2, 3));
        // 4 1
        // 5 2
        // 6 3
        assert_eq!(r.as_bytes(), &[4, 1, 5, 2, 6, 3]);
    }

    #[test]
    fn test_rotate_180_and_270() {
        let r = rotate(&sample(), RotationAngle::Deg180).unwrap();
        assert_eq!(r.as_bytes(), &[6, 5, 4, 3, 2, 1]);

        let r = rotate(&sample(), RotationAngle::Deg270).unwrap();
        assert_eq!((r.width(), r.height()), (2, 3));
        assert_eq!(r.as_bytes(), &[3, 6, 2, 5, 1, 4]);
    }

    #[test]
    fn test_zero_is_copy() {
        let img = sample();
        assert_eq!(rotate(&img, RotationAngle::Deg0).unwrap(), img);
    }

    #[test]
    fn test_90_then_270_is_identity() {
        let img = ImageBuffer::rgb((0..5 * 3 * 3).map(|v| v as u8).collect(), 5, 3).unwrap();
        let back = rotate(&rotate(&img, RotationAngle::Deg90).unwrap(), RotationAngle::Deg270)
            .unwrap();
        assert_eq!(back, img);
    }

    #[test]
    fn test_rotate_degrees_right_angles_match() {
        let img = sample();
        assert_eq!(
            rotate_degrees(&img, 90.0).unwrap(),
            rotate(&img, RotationAngle::Deg90).unwrap()
        );
        assert_eq!(
            rotate_degrees(&img, -90.0).unwrap(),
            rotate(&img, RotationAngle::Deg270).unwrap()
        );
    }

    #[test]
    fn test_rotate_degrees_bounding_box() {
        let img = ImageBuffer::gray(vec![0u8; 100 * 50], 100, 50).unwrap();
        let r = rotate_degrees(&img, 45.0).unwrap();
        // 100*cos45 + 50*sin45 = 106.07
        assert_eq!((r.width(), r.height()), (107, 107));
        // corners are outside the source and stay white
        assert_eq!(r.pixel(0, 0), &[255]);
        // centre maps inside the source
        assert_eq!(r.pixel(53, 53), &[0]);
    }
}
