//! First-success search over the decode attempt space

use super::attempt::{DecodeAttempt, ImageVariant, attempt_space, attempt_space_len};
use super::cancel::CancelFlag;
use super::config::DecoderConfig;
use super::reader::{AttemptError, ReaderFactory};
use crate::error::VerifyError;
use crate::models::ImageBuffer;
use crate::utils::rotation::{RotationAngle, rotate};
use serde::Serialize;
use std::borrow::Cow;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Result of one attempt, kept for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AttemptOutcome {
    /// Text was decoded
    Decoded,
    /// The decoder found nothing
    NoBarcode,
    /// The variant could not be prepared or read
    ImageError,
}

/// One executed attempt
#[derive(Debug, Clone, Serialize)]
pub struct AttemptRecord {
    /// What was tried
    pub attempt: DecodeAttempt,
    /// What happened
    pub outcome: AttemptOutcome,
    /// Wall time including rotation
    pub elapsed: Duration,
}

/// Every attempt executed during one search, in order
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchReport {
    /// Executed attempts
    pub attempts: Vec<AttemptRecord>,
}

impl SearchReport {
    /// Number of decode attempts executed
    pub fn attempt_count(&self) -> usize {
        self.attempts.len()
    }
}

/// Text decoded from the barcode, with the attempt that produced it
#[derive(Debug, Clone, Serialize)]
pub struct DecodedPayload {
    /// Raw decoded text
    pub text: String,
    /// The successful attempt
    pub attempt: DecodeAttempt,
    /// Everything tried up to and including the success
    pub report: SearchReport,
}

/// Searches decoder config × image variant × rotation for the first decode
pub struct DecodeOrchestrator<'a> {
    factory: &'a dyn ReaderFactory,
    configs: &'a [DecoderConfig],
    attempt_budget: Duration,
    cancel: CancelFlag,
}

impl<'a> DecodeOrchestrator<'a> {
    /// Orchestrator over the standard config priority
    pub fn new(factory: &'a dyn ReaderFactory) -> Self {
        Self {
            factory,
            configs: &DecoderConfig::PRIORITY,
            attempt_budget: Duration::from_millis(crate::config::DEFAULT_ATTEMPT_BUDGET_MS),
            cancel: CancelFlag::new(),
        }
    }

    /// Restrict or reorder the configs searched
    pub fn with_configs(mut self, configs: &'a [DecoderConfig]) -> Self {
        self.configs = configs;
        self
    }

    /// Attempts slower than `budget` are logged
    pub fn with_attempt_budget(mut self, budget: Duration) -> Self {
        self.attempt_budget = budget;
        self
    }

    /// Flag polled between attempts
    pub fn with_cancel(mut self, cancel: CancelFlag) -> Self {
        self.cancel = cancel;
        self
    }

    /// Run attempts in canonical order until one decodes
    ///
    /// Returns `NotDecodable` once the whole space is exhausted and
    /// `Cancelled` if the flag is raised before an attempt starts.
    pub fn search(
        &self,
        processed: &ImageBuffer,
        original: &ImageBuffer,
    ) -> Result<DecodedPayload, VerifyError> {
        let mut report = SearchReport::default();

        let hit = attempt_space(self.configs).find_map(|attempt| {
            if self.cancel.is_cancelled() {
                return Some(Err(VerifyError::Cancelled));
            }
            let source = match attempt.variant {
                ImageVariant::Processed => processed,
                ImageVariant::Original => original,
            };
            self.run_attempt(attempt, source, &mut report)
                .map(|text| Ok((text, attempt)))
        });

        match hit {
            Some(Ok((text, attempt))) => {
                info!(
                    attempt = attempt.index + 1,
                    config = %attempt.config,
                    variant = ?attempt.variant,
                    angle = %attempt.angle,
                    "barcode decoded"
                );
                Ok(DecodedPayload {
                    text,
                    attempt,
                    report,
                })
            }
            Some(Err(err)) => {
                debug!(attempts = report.attempt_count(), "search cancelled");
                Err(err)
            }
            None => {
                let attempts = report.attempt_count();
                debug_assert_eq!(attempts, attempt_space_len(self.configs));
                warn!(attempts, "no barcode found in any attempt");
                Err(VerifyError::NotDecodable { attempts })
            }
        }
    }

    fn run_attempt(
        &self,
        attempt: DecodeAttempt,
        source: &ImageBuffer,
        report: &mut SearchReport,
    ) -> Option<String> {
        let start = Instant::now();

        let result = rotated(source, attempt.angle)
            .map_err(AttemptError::from)
            .and_then(|image| self.factory.build(attempt.config).decode(&image));

        let elapsed = start.elapsed();
        if elapsed > self.attempt_budget {
            warn!(
                attempt = attempt.index + 1,
                elapsed_ms = elapsed.as_millis() as u64,
                budget_ms = self.attempt_budget.as_millis() as u64,
                "decode attempt exceeded its budget"
            );
        }

        let (outcome, text) = match result {
            Ok(text) => (AttemptOutcome::Decoded, Some(text)),
            Err(AttemptError::NoBarcode(reason)) => {
                debug!(
                    attempt = attempt.index + 1,
                    config = %attempt.config,
                    variant = ?attempt.variant,
                    angle = %attempt.angle,
                    %reason,
                    "no barcode"
                );
                (AttemptOutcome::NoBarcode, None)
            }
            Err(AttemptError::Image(err)) => {
                debug!(attempt = attempt.index + 1, error = %err, "attempt image unusable");
                (AttemptOutcome::ImageError, None)
            }
        };

        report.attempts.push(AttemptRecord {
            attempt,
            outcome,
            elapsed,
        });
        text
    }
}

fn rotated(
    source: &ImageBuffer,
    angle: RotationAngle,
) -> Result<Cow<'_, ImageBuffer>, crate::error::ImageDecodeError> {
    match angle {
        RotationAngle::Deg0 => Ok(Cow::Borrowed(source)),
        _ => rotate(source, angle).map(Cow::Owned),
    }
}
