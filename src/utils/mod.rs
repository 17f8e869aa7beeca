//! Pure pixel-buffer transforms
//!
//! This module provides the image helpers used by the pipeline:
//! - Grayscale conversion (RGB/RGBA to luminance)
//! - Proportional resizing
//! - Rotation about the image centre

pub mod grayscale;
pub mod resize;
pub mod rotation;
