//! Application layer - Commands and Handlers.
//!
//! This layer orchestrates the pipeline: source validation, prompt
//! construction, the single provider call, normalization, and export.

mod convert;
mod diagram;
mod error;
mod generate;

pub use convert::{ConvertExportCommand, ConvertExportHandler, ConvertExportResult};
pub use diagram::{GenerateDiagramCommand, GenerateDiagramHandler, GenerateDiagramResult};
pub use error::PipelineError;
pub use generate::{GenerateCasesCommand, GenerateCasesHandler, GenerateCasesResult};
