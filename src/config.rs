use std::time::Duration;

/// Widest image handed to the decoder; wider photos are downscaled
pub const DEFAULT_MAX_WIDTH: usize = 2000;
/// How far luminance is pushed away from mid-gray
pub const DEFAULT_CONTRAST_DELTA: u8 = 30;
/// Attempts slower than this are reported
pub const DEFAULT_ATTEMPT_BUDGET_MS: u64 = 2000;

fn parse_env_u64(name: &str, default: u64) -> u64 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(default)
}

fn parse_env_usize(name: &str, default: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(default)
}

fn parse_env_u8(name: &str, default: u8) -> u8 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u8>().ok())
        .unwrap_or(default)
}

/// Tunables for one pipeline run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Maximum preprocessed width in pixels (0 disables downscaling)
    pub max_width: usize,
    /// Contrast push applied after grayscale conversion
    pub contrast_delta: u8,
    /// Wall-clock budget per decode attempt
    pub attempt_budget: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_WIDTH,
            contrast_delta: DEFAULT_CONTRAST_DELTA,
            attempt_budget: Duration::from_millis(DEFAULT_ATTEMPT_BUDGET_MS),
        }
    }
}

impl PipelineConfig {
    /// Defaults overridden by `DNI_MAX_WIDTH`, `DNI_CONTRAST_DELTA` and
    /// `DNI_ATTEMPT_BUDGET_MS`. Unparseable values are ignored.
    pub fn from_env() -> Self {
        Self {
            max_width: parse_env_usize("DNI_MAX_WIDTH", DEFAULT_MAX_WIDTH),
            contrast_delta: parse_env_u8("DNI_CONTRAST_DELTA", DEFAULT_CONTRAST_DELTA),
            attempt_budget: Duration::from_millis(
                parse_env_u64("DNI_ATTEMPT_BUDGET_MS", DEFAULT_ATTEMPT_BUDGET_MS).max(1),
            ),
        }
    }

    /// Set the maximum preprocessed width
    pub fn with_max_width(mut self, max_width: usize) -> Self {
        self.max_width = max_width;
        self
    }

    /// Set the contrast push
    pub fn with_contrast_delta(mut self, delta: u8) -> Self {
        self.contrast_delta = delta;
        self
    }

    /// Set the per-attempt budget
    pub fn with_attempt_budget(mut self, budget: Duration) -> Self {
        self.attempt_budget = budget;
        self
    }
}
