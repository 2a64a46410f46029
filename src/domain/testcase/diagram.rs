//! PlantUML sequence-diagram generation for test scenarios.

use super::normalizer::NormalizeError;

/// Builds the instruction string for a sequence-diagram request.
///
/// The scenario is free text and may itself embed PlantUML code the caller
/// wants test cases visualized against.
pub fn build_diagram_prompt(scenario: &str) -> String {
    format!(
        "Generate a PlantUML sequence diagram based on the following test scenario:\n\n\
         {}\n\n\
         The diagram should clearly represent system components, user interactions, \
         and expected responses.\n\
         Provide only the PlantUML code inside @startuml and @enduml tags.",
        scenario
    )
}

/// Extracts the `@startuml` ... `@enduml` block from a raw AI reply.
///
/// Surrounding prose and markdown fences are discarded. A reply without both
/// markers, in order, fails with [`NormalizeError::NoDiagram`]. Never
/// partially emits.
pub fn extract_diagram(raw: &str) -> Result<String, NormalizeError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(NormalizeError::EmptyResponse);
    }

    let start = trimmed.find("@startuml").ok_or(NormalizeError::NoDiagram)?;
    let end = trimmed.rfind("@enduml").ok_or(NormalizeError::NoDiagram)?;
    if end < start {
        return Err(NormalizeError::NoDiagram);
    }

    Ok(trimmed[start..end + "@enduml".len()].to_string())
}
