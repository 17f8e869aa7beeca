//! Error types for the verification pipeline
//!
//! Only conditions that stop the pipeline are errors. A field that disagrees
//! with the user's input is reported through
//! [`ValidationResult`](crate::models::ValidationResult) instead.

use thiserror::Error;

/// An image buffer could not be read or transformed
///
/// Inside the decode search this only fails the current attempt.
#[derive(Error, Debug)]
pub enum ImageDecodeError {
    /// Zero width or height
    #[error("image has no pixels ({width}x{height})")]
    EmptyImage { width: usize, height: usize },

    /// Dimensions overflow `usize`
    #[error("image dimensions overflow ({width}x{height})")]
    TooLarge { width: usize, height: usize },

    /// Byte count does not match dimensions and layout
    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    SizeMismatch { expected: usize, actual: usize },

    /// Encoded bytes could not be decoded
    #[error("failed to decode image: {0}")]
    Codec(#[from] image::ImageError),
}

/// The decoded text is not a recognizable identity payload
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PayloadError {
    /// Fewer than 9 segments
    #[error("payload has {segments} segments, at least 9 are required")]
    Malformed { segments: usize },

    /// Birth date segment is not a real D/M/Y date
    #[error("birth date {raw:?} is not a valid day/month/year date")]
    InvalidDate { raw: String },
}

/// How the caller should present a terminal failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// No barcode could be read; ask for a new photo
    RetakePhoto,
    /// A barcode was read but it is not a supported ID
    UnsupportedDocument,
    /// The caller abandoned the run
    Cancelled,
}

/// Terminal pipeline failure
#[derive(Error, Debug)]
pub enum VerifyError {
    /// The front photo itself is unreadable
    #[error("front image could not be read: {0}")]
    Image(#[from] ImageDecodeError),

    /// Every attempt failed
    #[error("no barcode found after {attempts} decode attempts")]
    NotDecodable { attempts: usize },

    /// A barcode was read but is not an ID payload
    #[error("unsupported document: {0}")]
    Payload(#[from] PayloadError),

    /// The caller raised the cancel flag
    #[error("verification cancelled")]
    Cancelled,

    /// The blocking worker panicked or was aborted
    #[error("verification worker failed: {0}")]
    Worker(String),
}

impl VerifyError {
    /// Coarse classification for the UI layer
    pub fn kind(&self) -> FailureKind {
        match self {
            VerifyError::Image(_) | VerifyError::NotDecodable { .. } | VerifyError::Worker(_) => {
                FailureKind::RetakePhoto
            }
            VerifyError::Payload(_) => FailureKind::UnsupportedDocument,
            VerifyError::Cancelled => FailureKind::Cancelled,
        }
    }

    /// Message suitable for showing to the end user
    pub fn user_message(&self) -> &'static str {
        match self.kind() {
            FailureKind::RetakePhoto => {
                "No pudimos leer el código del DNI. Sacá la foto de nuevo con buena luz."
            }
            FailureKind::UnsupportedDocument => "Esto no parece un DNI válido.",
            FailureKind::Cancelled => "La verificación fue cancelada.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_date_is_unsupported_document() {
        let err = VerifyError::from(PayloadError::InvalidDate {
            raw: "xx".to_string(),
        });
        assert_eq!(err.kind(), FailureKind::UnsupportedDocument);
        let malformed = VerifyError::from(PayloadError::Malformed { segments: 8 });
        assert_eq!(malformed.user_message(), err.user_message());
    }

    #[test]
    fn test_not_decodable_asks_for_retake() {
        let err = VerifyError::NotDecodable { attempts: 24 };
        assert_eq!(err.kind(), FailureKind::RetakePhoto);
        assert_ne!(
            err.user_message(),
            VerifyError::from(PayloadError::Malformed { segments: 1 }).user_message()
        );
    }
}
