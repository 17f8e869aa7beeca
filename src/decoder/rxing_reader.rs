//! Barcode decoding backed by `rxing`, a pure Rust port of ZXing

use super::config::{DecoderConfig, Symbology};
use super::reader::{AttemptError, BarcodeReader, ReaderFactory};
use crate::models::{ChannelLayout, ImageBuffer};
use crate::utils::grayscale::to_luma;
use rxing::common::HybridBinarizer;
use rxing::{
    BarcodeFormat, BinaryBitmap, DecodeHintValue, DecodeHints, Luma8LuminanceSource,
    MultiFormatReader, Reader,
};
use std::collections::HashSet;

fn barcode_format(symbology: Symbology) -> BarcodeFormat {
    match symbology {
        Symbology::Pdf417 => BarcodeFormat::PDF_417,
        Symbology::QrCode => BarcodeFormat::QR_CODE,
        Symbology::DataMatrix => BarcodeFormat::DATA_MATRIX,
        Symbology::Aztec => BarcodeFormat::AZTEC,
    }
}

fn hints_for(config: DecoderConfig) -> DecodeHints {
    let mut hints = DecodeHints::default();
    if let Some(symbologies) = config.symbologies() {
        let formats: HashSet<BarcodeFormat> =
            symbologies.iter().copied().map(barcode_format).collect();
        hints = hints.with(DecodeHintValue::PossibleFormats(formats));
    }
    if config.try_harder() {
        hints = hints.with(DecodeHintValue::TryHarder(true));
    }
    if config.also_inverted() {
        hints = hints.with(DecodeHintValue::AlsoInverted(true));
    }
    hints
}

/// Default [`ReaderFactory`]: a new `MultiFormatReader` per attempt
#[derive(Debug, Clone, Copy, Default)]
pub struct RxingReaderFactory;

impl ReaderFactory for RxingReaderFactory {
    fn build(&self, config: DecoderConfig) -> Box<dyn BarcodeReader> {
        Box::new(RxingReader {
            reader: MultiFormatReader::default(),
            hints: hints_for(config),
        })
    }
}

struct RxingReader {
    reader: MultiFormatReader,
    hints: DecodeHints,
}

impl BarcodeReader for RxingReader {
    fn decode(self: Box<Self>, image: &ImageBuffer) -> Result<String, AttemptError> {
        let RxingReader { mut reader, hints } = *self;

        let luma = match image.layout() {
            ChannelLayout::Gray => image.as_bytes().to_vec(),
            ChannelLayout::Rgb | ChannelLayout::Rgba => to_luma(image),
        };
        let source = Luma8LuminanceSource::new(luma, image.width() as u32, image.height() as u32);
        let mut bitmap = BinaryBitmap::new(HybridBinarizer::new(source));

        reader
            .decode_with_hints(&mut bitmap, &hints)
            .map(|result| result.getText().to_string())
            .map_err(|e| AttemptError::NoBarcode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_image_has_no_barcode() {
        let blank = ImageBuffer::gray(vec![255u8; 64 * 64], 64, 64).unwrap();
        for config in DecoderConfig::PRIORITY {
            let reader = RxingReaderFactory.build(config);
            assert!(matches!(
                reader.decode(&blank),
                Err(AttemptError::NoBarcode(_))
            ));
        }
    }
}
