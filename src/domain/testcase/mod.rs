//! Test case domain - source inputs, prompts, normalization, and records.

mod diagram;
mod normalizer;
mod prompt;
mod record;
mod source;

pub use diagram::{build_diagram_prompt, extract_diagram};
pub use normalizer::{normalize, NormalizeError};
pub use prompt::build_prompt;
pub use record::{FieldSet, RawRecord, TestCaseRecord, TEST_TYPE_MANUAL};
pub use source::{SourceError, SourceInput, MAX_CASES, MAX_CONTEXT_CHARS};
