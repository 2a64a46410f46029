//! Request/response DTOs for the HTTP surface.

use serde::{Deserialize, Serialize};

use crate::domain::testcase::FieldSet;
use crate::ports::ExportFormat;

/// POST /api/generate request body.
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    /// Free-text topic or instruction.
    #[serde(default)]
    pub topic: String,
    /// Extracted document text supplied by an external extractor.
    pub context: Option<String>,
    /// Requested case count.
    #[serde(default = "default_num_cases")]
    pub num_cases: u32,
    /// Prompt and projection variant.
    #[serde(default)]
    pub field_set: FieldSet,
    /// Output format.
    #[serde(default)]
    pub format: ExportFormat,
    /// Filename stem override.
    pub stem: Option<String>,
}

fn default_num_cases() -> u32 {
    5
}

/// POST /api/generate response body.
#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub message: String,
    pub path: String,
    pub record_count: usize,
    pub format: ExportFormat,
}

/// POST /api/convert request body.
#[derive(Debug, Deserialize)]
pub struct ConvertRequest {
    /// Filename of a previously saved JSON export (inside the output
    /// directory).
    pub file: String,
    /// Projection variant for the CSV.
    #[serde(default)]
    pub field_set: FieldSet,
    /// Filename stem override.
    pub stem: Option<String>,
}

/// POST /api/convert response body.
#[derive(Debug, Serialize)]
pub struct ConvertResponse {
    pub message: String,
    pub path: String,
    pub record_count: usize,
}

/// POST /api/diagram request body.
#[derive(Debug, Deserialize)]
pub struct DiagramRequest {
    /// Free-text test scenario to diagram.
    pub scenario: String,
    /// Filename stem override.
    pub stem: Option<String>,
}

/// POST /api/diagram response body.
#[derive(Debug, Serialize)]
pub struct DiagramResponse {
    pub message: String,
    pub path: String,
}

/// Structured error body for every failure.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Failure class (e.g. "normalization_failure").
    pub kind: &'static str,
    /// Human-readable message, passed through from the pipeline.
    pub error: String,
}

impl ErrorResponse {
    pub fn new(kind: &'static str, error: impl Into<String>) -> Self {
        Self {
            kind,
            error: error.into(),
        }
    }
}
