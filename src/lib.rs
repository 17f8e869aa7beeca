//! dni_verify - ID card barcode extraction and form cross-validation
//!
//! Reads the PDF417 barcode from a photo of an ID card, parses the identity
//! fields it encodes and checks them against what the user typed into a
//! registration form.
//!
//! ```no_run
//! use dni_verify::{CancelFlag, ImageBuffer, PipelineConfig, UserSuppliedRecord, verify_identity};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let photo = std::fs::read("dni_front.jpg")?;
//! let front = ImageBuffer::from_encoded(&photo)?;
//! let user = UserSuppliedRecord {
//!     last_names: "Pérez".into(),
//!     first_names: "Juan".into(),
//!     sex: "M".into(),
//!     document_number: "12.345.678".into(),
//!     birth_date_iso: "1990-02-01".into(),
//! };
//!
//! let outcome = verify_identity(&front, None, &user, &PipelineConfig::default(), &CancelFlag::new())?;
//! if !outcome.validation.ok() {
//!     println!("check: {:?}", outcome.validation.mismatches());
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Pipeline tunables
pub mod config;
/// Barcode search (policies, attempt space, readers, orchestrator)
pub mod decoder;
/// Error types
pub mod error;
/// Core data structures (ImageBuffer, identity records, validation result)
pub mod models;
/// Barcode payload parsing
pub mod payload;
/// End-to-end entry points
pub mod pipeline;
/// Photo preprocessing
pub mod preprocess;
/// Helpers for the command-line tool
pub mod tools;
/// Pixel transforms (grayscale, resize, rotation)
pub mod utils;
/// Field validation
pub mod validate;

pub use config::PipelineConfig;
pub use decoder::{CancelFlag, DecoderConfig, ReaderFactory, RxingReaderFactory};
pub use error::{FailureKind, ImageDecodeError, PayloadError, VerifyError};
pub use models::{
    ChannelLayout, ImageBuffer, ParsedIdentityRecord, UserSuppliedRecord, ValidationResult,
};
pub use pipeline::{
    VerificationOutcome, scan_front, verify_identity, verify_identity_async, verify_identity_with,
};
