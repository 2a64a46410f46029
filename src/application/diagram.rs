//! GenerateDiagramHandler - Command handler for sequence-diagram generation.
//!
//! Prompts the provider for a PlantUML sequence diagram of a test scenario,
//! extracts the `@startuml`/`@enduml` block from the reply, and writes it to
//! a timestamped `.puml` file.

use std::path::PathBuf;
use std::sync::Arc;

use crate::domain::testcase::{build_diagram_prompt, extract_diagram, SourceInput};
use crate::ports::{AiProvider, CaseExportService, CompletionRequest};

use super::error::PipelineError;

/// Command to generate a PlantUML sequence diagram for a test scenario.
#[derive(Debug, Clone)]
pub struct GenerateDiagramCommand {
    /// Free-text test scenario (may embed existing PlantUML code).
    pub scenario: String,
    /// Filename stem for the export.
    pub stem: String,
}

/// Result of a successful diagram generation.
#[derive(Debug, Clone)]
pub struct GenerateDiagramResult {
    /// Path of the written `.puml` file.
    pub path: PathBuf,
}

/// Handler for the diagram pipeline.
///
/// Same shape as case generation: one provider call, every failure terminal.
pub struct GenerateDiagramHandler {
    provider: Arc<dyn AiProvider>,
    exporter: Arc<dyn CaseExportService>,
    temperature: f32,
    max_output_tokens: u32,
}

impl GenerateDiagramHandler {
    pub fn new(provider: Arc<dyn AiProvider>, exporter: Arc<dyn CaseExportService>) -> Self {
        Self {
            provider,
            exporter,
            temperature: 0.7,
            // Diagrams are short; a tighter cap than case generation
            max_output_tokens: 500,
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
        cmd: GenerateDiagramCommand,
    ) -> Result<GenerateDiagramResult, PipelineError> {
        // Reject empty scenarios before any network call
        let source = SourceInput::new(cmd.scenario, None, 1)?;
        let prompt = build_diagram_prompt(source.topic());

        let info = self.provider.provider_info();
        tracing::info!(
            provider = %info.name,
            model = %info.model,
            "requesting sequence diagram"
        );

        let request = CompletionRequest::new(prompt)
            .with_temperature(self.temperature)
            .with_max_output_tokens(self.max_output_tokens);
        let response = self.provider.complete(request).await?;

        let diagram = extract_diagram(&response.content)?;
        let path = self.exporter.export_diagram(&diagram, &cmd.stem).await?;

        Ok(GenerateDiagramResult { path })
    }
}
