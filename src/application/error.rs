//! Pipeline error taxonomy.

use thiserror::Error;

use crate::domain::testcase::{NormalizeError, SourceError};
use crate::ports::{AiError, ExportError};

/// Terminal failures of one pipeline invocation.
///
/// Nothing here is retried automatically; every failure is reported
/// synchronously to the immediate caller as a structured message. The
/// variants stay distinct so callers can tell "no usable input" from "the
/// model didn't answer" from "the model answered unusably" from "the write
/// failed".
#[derive(Debug, Error)]
pub enum PipelineError {
    /// No topic or document text was provided; no AI call was attempted.
    #[error("source unavailable: {0}")]
    Source(#[from] SourceError),

    /// The AI service call failed or returned no text.
    #[error("AI service error: {0}")]
    Service(#[from] AiError),

    /// The AI's text could not be reduced to a valid JSON record array.
    #[error("normalization failure: {0}")]
    Normalization(#[from] NormalizeError),

    /// The filesystem write (or read, for conversions) failed.
    #[error("export failure: {0}")]
    Export(#[from] ExportError),
}
