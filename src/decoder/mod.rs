//! Barcode decoding search
//!
//! This module finds the barcode text in a photo:
//! - Decoder policies (symbologies and effort)
//! - The ordered attempt space (policy × image variant × rotation)
//! - Single-use readers and the rxing-backed default
//! - The first-success orchestrator with cooperative cancellation

/// Ordered attempt space
pub mod attempt;
/// Cooperative cancellation flag
pub mod cancel;
/// Decoder policies tried in priority order
pub mod config;
/// First-success search
pub mod orchestrator;
/// Reader and factory traits
pub mod reader;
/// rxing-backed reader
pub mod rxing_reader;

pub use attempt::{DecodeAttempt, ImageVariant, attempt_space};
pub use cancel::CancelFlag;
pub use config::{DecoderConfig, Symbology};
pub use orchestrator::{DecodeOrchestrator, DecodedPayload, SearchReport};
pub use reader::{AttemptError, BarcodeReader, ReaderFactory};
pub use rxing_reader::RxingReaderFactory;
