use crate::error::ImageDecodeError;

/// Pixel layout of an [`ImageBuffer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelLayout {
    /// 1 byte per pixel (luminance)
    Gray,
    /// 3 bytes per pixel
    Rgb,
    /// 4 bytes per pixel, alpha ignored by every transform
    Rgba,
}

impl ChannelLayout {
    /// Bytes per pixel
    pub fn channels(self) -> usize {
        match self {
            ChannelLayout::Gray => 1,
            ChannelLayout::Rgb => 3,
            ChannelLayout::Rgba => 4,
        }
    }
}

/// Immutable interleaved 8-bit image
///
/// Every transform in this crate takes `&ImageBuffer` and returns a new one,
/// so stages never alias each other's pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBuffer {
    data: Vec<u8>,
    width: usize,
    height: usize,
    layout: ChannelLayout,
}

impl ImageBuffer {
    /// Wrap raw pixels, checking that the byte count matches the dimensions
    pub fn new(
        data: Vec<u8>,
        width: usize,
        height: usize,
        layout: ChannelLayout,
    ) -> Result<Self, ImageDecodeError> {
        if width == 0 || height == 0 {
            return Err(ImageDecodeError::EmptyImage { width, height });
        }
        let expected = width
            .checked_mul(height)
            .and_then(|p| p.checked_mul(layout.channels()))
            .ok_or(ImageDecodeError::TooLarge { width, height })?;
        if data.len() != expected {
            return Err(ImageDecodeError::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            layout,
        })
    }

    /// Grayscale buffer (1 byte per pixel)
    pub fn gray(data: Vec<u8>, width: usize, height: usize) -> Result<Self, ImageDecodeError> {
        Self::new(data, width, height, ChannelLayout::Gray)
    }

    /// RGB buffer (3 bytes per pixel)
    pub fn rgb(data: Vec<u8>, width: usize, height: usize) -> Result<Self, ImageDecodeError> {
        Self::new(data, width, height, ChannelLayout::Rgb)
    }

    /// RGBA buffer (4 bytes per pixel)
    pub fn rgba(data: Vec<u8>, width: usize, height: usize) -> Result<Self, ImageDecodeError> {
        Self::new(data, width, height, ChannelLayout::Rgba)
    }

    /// Decode an encoded photo (JPEG, PNG, ...) into an RGB buffer
    pub fn from_encoded(bytes: &[u8]) -> Result<Self, ImageDecodeError> {
        let img = image::load_from_memory(bytes)?;
        let rgb = img.to_rgb8();
        let (width, height) = (rgb.width() as usize, rgb.height() as usize);
        Self::rgb(rgb.into_raw(), width, height)
    }

    /// Image width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Channel layout
    pub fn layout(&self) -> ChannelLayout {
        self.layout
    }

    /// Bytes per pixel
    pub fn channels(&self) -> usize {
        self.layout.channels()
    }

    /// Raw interleaved pixel bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consume the buffer, returning its pixel bytes
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Bytes of pixel (x, y); panics when out of bounds
    pub fn pixel(&self, x: usize, y: usize) -> &[u8] {
        let c = self.channels();
        let start = (y * self.width + x) * c;
        &self.data[start..start + c]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_size_mismatch() {
        let err = ImageBuffer::rgb(vec![0u8; 10], 2, 2).unwrap_err();
        assert!(matches!(
            err,
            ImageDecodeError::SizeMismatch {
                expected: 12,
                actual: 10
            }
        ));
    }

    #[test]
    fn test_rejects_empty() {
        assert!(ImageBuffer::gray(Vec::new(), 0, 5).is_err());
    }

    #[test]
    fn test_pixel_access() {
        let img = ImageBuffer::rgb(vec![1, 2, 3, 4, 5, 6], 2, 1).unwrap();
        assert_eq!(img.pixel(1, 0), &[4, 5, 6]);
        assert_eq!(img.channels(), 3);
    }

    #[test]
    fn test_from_encoded_garbage() {
        let err = ImageBuffer::from_encoded(b"definitely not a jpeg").unwrap_err();
        assert!(matches!(err, ImageDecodeError::Codec(_)));
    }
}
