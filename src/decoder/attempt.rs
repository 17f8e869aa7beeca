use super::config::DecoderConfig;
use crate::utils::rotation::RotationAngle;
use serde::Serialize;

/// Which image a decode attempt runs on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ImageVariant {
    /// Downscaled, contrast-enhanced grayscale
    Processed,
    /// The photo as supplied
    Original,
}

impl ImageVariant {
    /// Search order; the processed image succeeds more often
    pub const ALL: [ImageVariant; 2] = [ImageVariant::Processed, ImageVariant::Original];
}

/// One point of the search space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DecodeAttempt {
    /// Zero-based position in canonical order
    pub index: usize,
    /// Decoder policy
    pub config: DecoderConfig,
    /// Image the decoder sees
    pub variant: ImageVariant,
    /// Rotation applied to the variant first
    pub angle: RotationAngle,
}

/// Lazily enumerate config × variant × angle in canonical order
///
/// Nothing is materialized; dropping the iterator after a hit means the
/// remaining attempts are never produced.
pub fn attempt_space(configs: &[DecoderConfig]) -> impl Iterator<Item = DecodeAttempt> + '_ {
    configs
        .iter()
        .flat_map(|&config| {
            ImageVariant::ALL.into_iter().flat_map(move |variant| {
                RotationAngle::ALL
                    .into_iter()
                    .map(move |angle| (config, variant, angle))
            })
        })
        .enumerate()
        .map(|(index, (config, variant, angle))| DecodeAttempt {
            index,
            config,
            variant,
            angle,
        })
}

/// Size of the attempt space for `configs`
pub fn attempt_space_len(configs: &[DecoderConfig]) -> usize {
    configs.len() * ImageVariant::ALL.len() * RotationAngle::ALL.len()
}
