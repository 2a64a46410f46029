//! Case Export Service Port - Record projection and file export interface.
//!
//! The application layer depends on this trait; adapters write the actual
//! files. Each export creates a fresh, timestamp-named file that is never
//! mutated afterwards.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use crate::domain::testcase::{FieldSet, RawRecord};

/// Port for exporting normalized record sequences to durable storage.
///
/// # Contract
///
/// Implementations must:
/// - Assign ordinals as a dense 1-based sequence in input order, ignoring
///   any numbering embedded in the records themselves
/// - Default missing fields rather than failing
/// - Name files `{stem}_{timestamp}.{ext}` so repeated runs never overwrite
///   each other (same-second collisions are accepted)
#[async_trait]
pub trait CaseExportService: Send + Sync {
    /// Project records onto the fixed CSV schema and write them.
    ///
    /// Returns the path of the written file.
    async fn export_csv(
        &self,
        records: &[RawRecord],
        field_set: FieldSet,
        stem: &str,
    ) -> Result<PathBuf, ExportError>;

    /// Write the record sequence verbatim (pretty-printed) for archival.
    ///
    /// Returns the path of the written file.
    async fn export_json(&self, records: &[RawRecord], stem: &str) -> Result<PathBuf, ExportError>;

    /// Write PlantUML diagram code to a timestamped `.puml` file.
    ///
    /// Returns the path of the written file.
    async fn export_diagram(&self, diagram: &str, stem: &str) -> Result<PathBuf, ExportError>;
}

/// Export formats supported by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// CSV with the fixed pipeline-defined header row.
    #[default]
    Csv,
    /// JSON array mirroring the records verbatim.
    Json,
}

impl ExportFormat {
    /// Get the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    /// Get the MIME content type for this format.
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv; charset=utf-8",
            ExportFormat::Json => "application/json",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            _ => Err(ExportError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The filesystem write failed.
    #[error("export write failed: {0}")]
    Io(String),

    /// Record serialization failed.
    #[error("export serialization failed: {0}")]
    Serialization(String),

    /// Unknown export format name.
    #[error("unsupported export format: {0}")]
    UnsupportedFormat(String),
}

impl ExportError {
    /// Creates an I/O error.
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io(message.into())
    }

    /// Creates a serialization error.
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }
}
