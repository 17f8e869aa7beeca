use crate::config::PipelineConfig;
use crate::decoder::{
    CancelFlag, DecodeAttempt, DecodeOrchestrator, ReaderFactory, RxingReaderFactory, SearchReport,
};
use crate::error::VerifyError;
use crate::models::{ImageBuffer, ParsedIdentityRecord, UserSuppliedRecord, ValidationResult};
use crate::payload::parse_payload;
use crate::preprocess::preprocess;
use crate::validate::validate;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, instrument};

/// Everything a successful run produces
#[derive(Debug, Clone, Serialize)]
pub struct VerificationOutcome {
    /// Fields read from the barcode
    pub record: ParsedIdentityRecord,
    /// Comparison against the user's input
    pub validation: ValidationResult,
    /// Attempt that decoded the barcode
    pub attempt: DecodeAttempt,
    /// Attempts executed before and including the success
    pub report: SearchReport,
}

/// Decode the front photo and parse its barcode, without validating
pub fn scan_front(
    front: &ImageBuffer,
    config: &PipelineConfig,
    cancel: &CancelFlag,
    factory: &dyn ReaderFactory,
) -> Result<(ParsedIdentityRecord, DecodeAttempt, SearchReport), VerifyError> {
    let processed = preprocess(front, config)?;

    let payload = DecodeOrchestrator::new(factory)
        .with_attempt_budget(config.attempt_budget)
        .with_cancel(cancel.clone())
        .search(&processed, front)?;

    let record = parse_payload(&payload.text)?;
    Ok((record, payload.attempt, payload.report))
}

/// Verify the user's form input against the front photo, using rxing
///
/// `back` is accepted for the caller's convenience and not read.
pub fn verify_identity(
    front: &ImageBuffer,
    back: Option<&ImageBuffer>,
    user: &UserSuppliedRecord,
    config: &PipelineConfig,
    cancel: &CancelFlag,
) -> Result<VerificationOutcome, VerifyError> {
    verify_identity_with(&RxingReaderFactory, front, back, user, config, cancel)
}

/// [`verify_identity`] with an explicit reader factory
#[instrument(skip_all, fields(width = front.width(), height = front.height()))]
pub fn verify_identity_with(
    factory: &dyn ReaderFactory,
    front: &ImageBuffer,
    _back: Option<&ImageBuffer>,
    user: &UserSuppliedRecord,
    config: &PipelineConfig,
    cancel: &CancelFlag,
) -> Result<VerificationOutcome, VerifyError> {
    let (record, attempt, report) = scan_front(front, config, cancel, factory)?;
    let validation = validate(&record, user);

    info!(
        ok = validation.ok(),
        mismatches = ?validation.mismatches(),
        attempts = report.attempt_count(),
        "identity verified"
    );

    Ok(VerificationOutcome {
        record,
        validation,
        attempt,
        report,
    })
}

/// Run [`verify_identity_with`] on a blocking worker and await the result
///
/// The caller's thread is never blocked by decoding. Dropping the future
/// does not stop the worker; raise `cancel` for that.
pub async fn verify_identity_async(
    factory: Arc<dyn ReaderFactory>,
    front: ImageBuffer,
    back: Option<ImageBuffer>,
    user: UserSuppliedRecord,
    config: PipelineConfig,
    cancel: CancelFlag,
) -> Result<VerificationOutcome, VerifyError> {
    tokio::task::spawn_blocking(move || {
        verify_identity_with(
            factory.as_ref(),
            &front,
            back.as_ref(),
            &user,
            &config,
            &cancel,
        )
    })
    .await
    .map_err(|e| VerifyError::Worker(e.to_string()))?
}
