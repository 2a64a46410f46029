//! Prompt construction for test case generation.

use super::record::FieldSet;
use super::source::SourceInput;

/// Builds the single instruction string sent to the AI service.
///
/// Requests exactly `num_cases` cases, enumerates the field-set's key names,
/// and demands a bare JSON array with no surrounding text. When the source
/// carries extracted document text, it is embedded (truncated) ahead of the
/// instruction.
pub fn build_prompt(source: &SourceInput, field_set: FieldSet) -> String {
    let mut prompt = String::new();

    if let Some(context) = source.truncated_context() {
        prompt.push_str("Based on the following extracted document content:\n\n");
        prompt.push_str(context);
        prompt.push_str("\n\n");
    }

    if source.topic().is_empty() {
        prompt.push_str(&format!(
            "Generate {} detailed test cases for the content above.\n",
            source.num_cases()
        ));
    } else {
        prompt.push_str(&format!(
            "Generate {} detailed test cases for: {}.\n",
            source.num_cases(),
            source.topic()
        ));
    }

    prompt.push_str(
        "Each test case should include a concise scenario, the specific test \
         data to use, and the expected result.\n",
    );

    let fields = field_set
        .prompt_fields()
        .iter()
        .map(|f| format!("\"{}\"", f))
        .collect::<Vec<_>>()
        .join(", ");

    prompt.push_str(&format!(
        "Format the response as a JSON array of test cases, where each test \
         case is a JSON object with keys: {}.\n\
         Respond with the JSON array only, no surrounding text and no \
         markdown fences.",
        fields
    ));

    prompt
}
