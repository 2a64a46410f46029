//! Ports - interfaces between the domain/application layers and adapters.

mod ai_provider;
mod case_export;

pub use ai_provider::{
    AiError, AiProvider, CompletionRequest, CompletionResponse, FinishReason, ProviderInfo,
    TokenUsage,
};
pub use case_export::{CaseExportService, ExportError, ExportFormat};
