//! Local Filesystem Export Adapter - Implementation of CaseExportService.
//!
//! Writes timestamp-named CSV and JSON files under a configured output
//! directory. Files are created fresh per invocation and never mutated;
//! uniqueness comes solely from the second-granularity timestamp in the
//! filename, so concurrent invocations need no coordination beyond that.

use async_trait::async_trait;
use chrono::Utc;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::testcase::{FieldSet, RawRecord, TestCaseRecord, TEST_TYPE_MANUAL};
use crate::ports::{CaseExportService, ExportError, ExportFormat};

/// Local filesystem export service.
///
/// # Filename policy
///
/// `{stem}_{YYYY-MM-DD_HH-MM-SS}.{ext}` — collisions within the same second
/// are possible and accepted for this use case.
#[derive(Debug, Clone)]
pub struct LocalExportService {
    /// Directory export files are written to.
    output_dir: PathBuf,
}

impl LocalExportService {
    /// Creates a new export service writing into the given directory.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Builds the timestamped output path for one export.
    fn output_path(&self, stem: &str, format: ExportFormat) -> PathBuf {
        let timestamp = Utc::now().format("%Y-%m-%d_%H-%M-%S");
        self.output_dir
            .join(format!("{}_{}.{}", stem, timestamp, format.extension()))
    }

    /// Ensures the output directory exists.
    async fn ensure_output_dir(&self) -> Result<(), ExportError> {
        fs::create_dir_all(&self.output_dir).await.map_err(|e| {
            ExportError::io(format!(
                "Failed to create output directory {}: {}",
                self.output_dir.display(),
                e
            ))
        })
    }

    /// Writes bytes to the target path.
    async fn write_file(path: &Path, bytes: &[u8]) -> Result<(), ExportError> {
        fs::write(path, bytes)
            .await
            .map_err(|e| ExportError::io(format!("Failed to write {}: {}", path.display(), e)))
    }
}

/// Renders a projected field into a CSV cell.
///
/// Nested structures become compact JSON strings; plain strings pass
/// through as-is.
fn cell(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Builds the CSV bytes for a record sequence.
///
/// Ordinals are assigned as a dense 1-based sequence in input order; any
/// numbering embedded in the records is ignored.
fn build_csv(records: &[RawRecord], field_set: FieldSet) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(field_set.csv_header())
        .map_err(|e| ExportError::serialization(e.to_string()))?;

    for (index, raw) in records.iter().enumerate() {
        let ordinal = index + 1;
        let record = TestCaseRecord::from_raw(raw, field_set);

        let row: Vec<String> = match field_set {
            FieldSet::Generic => vec![
                ordinal.to_string(),
                record.identifier,
                TEST_TYPE_MANUAL.to_string(),
                record.summary,
                cell(&record.data),
                cell(&record.expected),
            ],
            FieldSet::Api => {
                let identifier = if record.identifier.is_empty() {
                    format!("TC{}", ordinal)
                } else {
                    record.identifier
                };
                vec![
                    identifier,
                    record.summary,
                    record.step,
                    TEST_TYPE_MANUAL.to_string(),
                    cell(&record.data),
                    cell(&record.expected),
                ]
            }
        };

        writer
            .write_record(&row)
            .map_err(|e| ExportError::serialization(e.to_string()))?;
    }

    writer
        .into_inner()
        .map_err(|e| ExportError::serialization(e.to_string()))
}

#[async_trait]
impl CaseExportService for LocalExportService {
    async fn export_csv(
        &self,
        records: &[RawRecord],
        field_set: FieldSet,
        stem: &str,
    ) -> Result<PathBuf, ExportError> {
        self.ensure_output_dir().await?;
        let path = self.output_path(stem, ExportFormat::Csv);

        let bytes = build_csv(records, field_set)?;
        Self::write_file(&path, &bytes).await?;

        tracing::info!(path = %path.display(), records = records.len(), "wrote CSV export");
        Ok(path)
    }

    async fn export_json(&self, records: &[RawRecord], stem: &str) -> Result<PathBuf, ExportError> {
        self.ensure_output_dir().await?;
        let path = self.output_path(stem, ExportFormat::Json);

        let bytes = serde_json::to_vec_pretty(records)
            .map_err(|e| ExportError::serialization(e.to_string()))?;
        Self::write_file(&path, &bytes).await?;

        tracing::info!(path = %path.display(), records = records.len(), "wrote JSON export");
        Ok(path)
    }

    async fn export_diagram(&self, diagram: &str, stem: &str) -> Result<PathBuf, ExportError> {
        self.ensure_output_dir().await?;
        let timestamp = Utc::now().format("%Y-%m-%d_%H-%M-%S");
        let path = self.output_dir.join(format!("{}_{}.puml", stem, timestamp));

        Self::write_file(&path, diagram.as_bytes()).await?;

        tracing::info!(path = %path.display(), "wrote PlantUML export");
        Ok(path)
    }
}
