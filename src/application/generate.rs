//! GenerateCasesHandler - Command handler for the generation pipeline.

use std::path::PathBuf;
use std::sync::Arc;

use crate::domain::testcase::{build_prompt, normalize, FieldSet, SourceInput};
use crate::ports::{AiProvider, CaseExportService, CompletionRequest, ExportFormat};

use super::error::PipelineError;

/// Command to generate and export test cases.
#[derive(Debug, Clone)]
pub struct GenerateCasesCommand {
    /// Free-text topic or instruction.
    pub topic: String,
    /// Extracted document text, if any.
    pub context: Option<String>,
    /// Requested case count (clamped by the domain).
    pub num_cases: u32,
    /// Prompt and projection variant.
    pub field_set: FieldSet,
    /// Output format.
    pub format: ExportFormat,
    /// Filename stem for the export.
    pub stem: String,
}

/// Result of a successful generation.
#[derive(Debug, Clone)]
pub struct GenerateCasesResult {
    /// Path of the written export file.
    pub path: PathBuf,
    /// Number of records exported.
    pub record_count: usize,
    /// Format that was written.
    pub format: ExportFormat,
}

/// Handler for the generation pipeline.
///
/// One invocation performs exactly one provider call; every failure is
/// terminal and surfaced as a [`PipelineError`].
pub struct GenerateCasesHandler {
    provider: Arc<dyn AiProvider>,
    exporter: Arc<dyn CaseExportService>,
    temperature: f32,
    max_output_tokens: u32,
}

impl GenerateCasesHandler {
    pub fn new(provider: Arc<dyn AiProvider>, exporter: Arc<dyn CaseExportService>) -> Self {
        Self {
            provider,
            exporter,
            temperature: 0.7,
            max_output_tokens: 2000,
        }
    }

    /// Overrides the generation options sent with each request.
    pub fn with_generation(mut self, temperature: f32, max_output_tokens: u32) -> Self {
        self.temperature = temperature;
        self.max_output_tokens = max_output_tokens;
        self
    }

    pub async fn handle(
        &self,
        cmd: GenerateCasesCommand,
    ) -> Result<GenerateCasesResult, PipelineError> {
        // 1. Validate the source before any network call
        let source = SourceInput::new(cmd.topic, cmd.context, cmd.num_cases)?;

        // 2. Compose the instruction
        let prompt = build_prompt(&source, cmd.field_set);

        let info = self.provider.provider_info();
        tracing::info!(
            provider = %info.name,
            model = %info.model,
            cases = source.num_cases(),
            field_set = %cmd.field_set,
            "requesting test cases"
        );

        // 3. Single provider call, no retry
        let request = CompletionRequest::new(prompt)
            .with_temperature(self.temperature)
            .with_max_output_tokens(self.max_output_tokens);
        let response = self.provider.complete(request).await?;

        tracing::debug!(
            tokens = response.usage.total_tokens,
            finish_reason = ?response.finish_reason,
            "completion received"
        );

        // 4. Normalize the untrusted reply
        let records = normalize(&response.content)?;

        // 5. Export
        let path = match cmd.format {
            ExportFormat::Csv => {
                self.exporter
                    .export_csv(&records, cmd.field_set, &cmd.stem)
                    .await?
            }
            ExportFormat::Json => self.exporter.export_json(&records, &cmd.stem).await?,
        };

        Ok(GenerateCasesResult {
            path,
            record_count: records.len(),
            format: cmd.format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAiProvider, MockError};
    use crate::domain::testcase::{NormalizeError, RawRecord, SourceError};
    use crate::ports::{AiError, ExportError};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MockExportService {
        exported: Mutex<Vec<(Vec<RawRecord>, ExportFormat)>>,
        fail: bool,
    }

    impl MockExportService {
        fn new() -> Self {
            Self {
                exported: Mutex::new(Vec::new()),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                exported: Mutex::new(Vec::new()),
                fail: true,
            }
        }

        fn exported(&self) -> Vec<(Vec<RawRecord>, ExportFormat)> {
            self.exported.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CaseExportService for MockExportService {
        async fn export_csv(
            &self,
            records: &[RawRecord],
            _field_set: FieldSet,
            stem: &str,
        ) -> Result<PathBuf, ExportError> {
            if self.fail {
                return Err(ExportError::io("Simulated write failure"));
            }
            self.exported
                .lock()
                .unwrap()
                .push((records.to_vec(), ExportFormat::Csv));
            Ok(PathBuf::from(format!("{stem}.csv")))
        }

        async fn export_json(
            &self,
            records: &[RawRecord],
            stem: &str,
        ) -> Result<PathBuf, ExportError> {
            if self.fail {
                return Err(ExportError::io("Simulated write failure"));
            }
            self.exported
                .lock()
                .unwrap()
                .push((records.to_vec(), ExportFormat::Json));
            Ok(PathBuf::from(format!("{stem}.json")))
        }

        async fn export_diagram(&self, _diagram: &str, stem: &str) -> Result<PathBuf, ExportError> {
            if self.fail {
                return Err(ExportError::io("Simulated write failure"));
            }
            Ok(PathBuf::from(format!("{stem}.puml")))
        }
    }

    fn command() -> GenerateCasesCommand {
        GenerateCasesCommand {
            topic: "login API".to_string(),
            context: None,
            num_cases: 2,
            field_set: FieldSet::Generic,
            format: ExportFormat::Csv,
            stem: "test_cases".to_string(),
        }
    }

    #[tokio::test]
    async fn generates_normalizes_and_exports() {
        let provider = MockAiProvider::new()
            .with_response("```json\n[{\"Test Case ID\": \"TC1\"}, {\"Test Case ID\": \"TC2\"}]\n```");
        let exporter = Arc::new(MockExportService::new());
        let handler = GenerateCasesHandler::new(Arc::new(provider.clone()), exporter.clone());

        let result = handler.handle(command()).await.unwrap();

        assert_eq!(result.record_count, 2);
        assert_eq!(result.format, ExportFormat::Csv);
        assert_eq!(provider.call_count(), 1);
        assert_eq!(exporter.exported().len(), 1);
    }

    #[tokio::test]
    async fn prompt_carries_generation_options() {
        let provider = MockAiProvider::new().with_response("[]");
        let exporter = Arc::new(MockExportService::new());
        let handler = GenerateCasesHandler::new(Arc::new(provider.clone()), exporter)
            .with_generation(0.2, 4096);

        handler.handle(command()).await.unwrap();

        let calls = provider.get_calls();
        assert_eq!(calls[0].temperature, Some(0.2));
        assert_eq!(calls[0].max_output_tokens, Some(4096));
        assert!(calls[0].prompt.contains("Generate 2 detailed test cases for: login API."));
    }

    #[tokio::test]
    async fn empty_source_skips_provider_call() {
        let provider = MockAiProvider::new();
        let exporter = Arc::new(MockExportService::new());
        let handler = GenerateCasesHandler::new(Arc::new(provider.clone()), exporter);

        let cmd = GenerateCasesCommand {
            topic: "  ".to_string(),
            ..command()
        };
        let err = handler.handle(cmd).await.unwrap_err();

        assert!(matches!(err, PipelineError::Source(SourceError::Empty)));
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn provider_error_is_service_failure() {
        let provider = MockAiProvider::new().with_error(MockError::Unavailable {
            message: "down".to_string(),
        });
        let exporter = Arc::new(MockExportService::new());
        let handler = GenerateCasesHandler::new(Arc::new(provider), exporter.clone());

        let err = handler.handle(command()).await.unwrap_err();

        assert!(matches!(err, PipelineError::Service(AiError::Unavailable { .. })));
        assert!(exporter.exported().is_empty());
    }

    #[tokio::test]
    async fn unusable_answer_is_normalization_failure() {
        let provider = MockAiProvider::new().with_response("Sorry, I cannot help.");
        let exporter = Arc::new(MockExportService::new());
        let handler = GenerateCasesHandler::new(Arc::new(provider), exporter.clone());

        let err = handler.handle(command()).await.unwrap_err();

        assert!(matches!(
            err,
            PipelineError::Normalization(NormalizeError::NoJsonArray)
        ));
        assert!(exporter.exported().is_empty());
    }

    #[tokio::test]
    async fn write_failure_is_export_failure() {
        let provider = MockAiProvider::new().with_response("[{\"a\": 1}]");
        let exporter = Arc::new(MockExportService::failing());
        let handler = GenerateCasesHandler::new(Arc::new(provider), exporter);

        let err = handler.handle(command()).await.unwrap_err();

        assert!(matches!(err, PipelineError::Export(ExportError::Io(_))));
    }

    #[tokio::test]
    async fn json_format_uses_json_export() {
        let provider = MockAiProvider::new().with_response("[{\"a\": 1}]");
        let exporter = Arc::new(MockExportService::new());
        let handler = GenerateCasesHandler::new(Arc::new(provider), exporter.clone());

        let cmd = GenerateCasesCommand {
            format: ExportFormat::Json,
            ..command()
        };
        let result = handler.handle(cmd).await.unwrap();

        assert_eq!(result.path, PathBuf::from("test_cases.json"));
        assert_eq!(exporter.exported()[0].1, ExportFormat::Json);
    }
}
