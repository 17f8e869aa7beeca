use super::config::DecoderConfig;
use crate::error::ImageDecodeError;
use crate::models::ImageBuffer;
use thiserror::Error;

/// Why a single decode attempt produced no text
#[derive(Error, Debug)]
pub enum AttemptError {
    /// The decoder found nothing
    #[error("no barcode found: {0}")]
    NoBarcode(String),

    /// The image could not be prepared
    #[error(transparent)]
    Image(#[from] ImageDecodeError),
}

/// A single-use barcode decoder
///
/// `decode` consumes the reader, so an instance cannot be reused across
/// attempts. Decoding libraries keep internal state between calls and a
/// reused reader can miss codes that a fresh one finds.
pub trait BarcodeReader {
    /// Decode the first barcode in `image` into its text payload
    fn decode(self: Box<Self>, image: &ImageBuffer) -> Result<String, AttemptError>;
}

/// Builds a fresh [`BarcodeReader`] for every attempt
pub trait ReaderFactory: Send + Sync {
    /// New reader honouring `config`
    fn build(&self, config: DecoderConfig) -> Box<dyn BarcodeReader>;
}

impl<F> ReaderFactory for F
where
    F: Fn(DecoderConfig) -> Box<dyn BarcodeReader> + Send + Sync,
{
    fn build(&self, config: DecoderConfig) -> Box<dyn BarcodeReader> {
        self(config)
    }
}
