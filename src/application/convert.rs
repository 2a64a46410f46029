//! ConvertExportHandler - Command handler for JSON-to-CSV conversion.
//!
//! A previously saved JSON export (the verbatim record archive) can be
//! projected onto the CSV schema later, driven by the same default-on-missing
//! rules as a fresh generation.

use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs;

use crate::domain::testcase::{normalize, FieldSet};
use crate::ports::{CaseExportService, ExportError};

use super::error::PipelineError;

/// Command to convert a saved JSON export to CSV.
#[derive(Debug, Clone)]
pub struct ConvertExportCommand {
    /// Path of the saved JSON export.
    pub source_path: PathBuf,
    /// Projection variant for the CSV.
    pub field_set: FieldSet,
    /// Filename stem; defaults to the source file's stem.
    pub stem: Option<String>,
}

/// Result of a successful conversion.
#[derive(Debug, Clone)]
pub struct ConvertExportResult {
    /// Path of the written CSV file.
    pub path: PathBuf,
    /// Number of records converted.
    pub record_count: usize,
}

/// Handler for converting saved JSON exports.
pub struct ConvertExportHandler {
    exporter: Arc<dyn CaseExportService>,
}

impl ConvertExportHandler {
    pub fn new(exporter: Arc<dyn CaseExportService>) -> Self {
        Self { exporter }
    }

    pub async fn handle(
        &self,
        cmd: ConvertExportCommand,
    ) -> Result<ConvertExportResult, PipelineError> {
        let text = fs::read_to_string(&cmd.source_path).await.map_err(|e| {
            ExportError::io(format!(
                "Failed to read {}: {}",
                cmd.source_path.display(),
                e
            ))
        })?;

        // Same record rules as a fresh generation
        let records = normalize(&text)?;

        let stem = cmd.stem.unwrap_or_else(|| {
            cmd.source_path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("test_cases")
                .to_string()
        });

        let path = self
            .exporter
            .export_csv(&records, cmd.field_set, &stem)
            .await?;

        tracing::info!(
            source = %cmd.source_path.display(),
            target = %path.display(),
            records = records.len(),
            "converted JSON export to CSV"
        );

        Ok(ConvertExportResult {
            path,
            record_count: records.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::export::LocalExportService;
    use crate::domain::testcase::NormalizeError;
    use serde_json::json;

    #[tokio::test]
    async fn converts_saved_json_to_csv() {
        let dir = tempfile::tempdir().unwrap();
        let source_path = dir.path().join("archive.json");
        std::fs::write(
            &source_path,
            serde_json::to_string_pretty(&json!([
                {"Test Case ID": "TC1", "Test Case Name": "A", "Test Data": {"k": 1}},
                {"Test Case ID": "TC2", "Test Case Name": "B"}
            ]))
            .unwrap(),
        )
        .unwrap();

        let exporter = Arc::new(LocalExportService::new(dir.path()));
        let handler = ConvertExportHandler::new(exporter);

        let result = handler
            .handle(ConvertExportCommand {
                source_path,
                field_set: FieldSet::Generic,
                stem: None,
            })
            .await
            .unwrap();

        assert_eq!(result.record_count, 2);
        let name = result.path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("archive_"));
        assert!(name.ends_with(".csv"));

        let csv = std::fs::read_to_string(&result.path).unwrap();
        assert!(csv.starts_with("Test Case No,"));
        assert!(csv.contains("Manual"));
    }

    #[tokio::test]
    async fn missing_source_is_export_failure() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = Arc::new(LocalExportService::new(dir.path()));
        let handler = ConvertExportHandler::new(exporter);

        let err = handler
            .handle(ConvertExportCommand {
                source_path: dir.path().join("missing.json"),
                field_set: FieldSet::Generic,
                stem: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::Export(ExportError::Io(_))));
    }

    #[tokio::test]
    async fn malformed_source_is_normalization_failure() {
        let dir = tempfile::tempdir().unwrap();
        let source_path = dir.path().join("broken.json");
        std::fs::write(&source_path, "not json at all").unwrap();

        let exporter = Arc::new(LocalExportService::new(dir.path()));
        let handler = ConvertExportHandler::new(exporter);

        let err = handler
            .handle(ConvertExportCommand {
                source_path,
                field_set: FieldSet::Generic,
                stem: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            PipelineError::Normalization(NormalizeError::NoJsonArray)
        ));
    }

    #[tokio::test]
    async fn explicit_stem_overrides_source_name() {
        let dir = tempfile::tempdir().unwrap();
        let source_path = dir.path().join("a.json");
        std::fs::write(&source_path, "[]").unwrap();

        let exporter = Arc::new(LocalExportService::new(dir.path()));
        let handler = ConvertExportHandler::new(exporter);

        let result = handler
            .handle(ConvertExportCommand {
                source_path,
                field_set: FieldSet::Generic,
                stem: Some("renamed".to_string()),
            })
            .await
            .unwrap();

        let name = result.path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("renamed_"));
    }
}
