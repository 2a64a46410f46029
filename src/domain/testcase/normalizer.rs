//! Response normalization - untrusted AI text to a strict record sequence.
//!
//! The AI service returns free text with no guaranteed shape: markdown
//! fences, prose preambles, truncated JSON, or single-quoted pseudo-JSON.
//! [`normalize`] reduces such a blob to an ordered sequence of key-value
//! records, or fails with a typed error. It never partially emits.

use serde_json::Value;
use thiserror::Error;

use super::record::RawRecord;

/// Normalization failures, distinct from service errors so callers can tell
/// "the model didn't answer" from "the model answered unusably".
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NormalizeError {
    /// The response was empty or whitespace-only.
    #[error("AI response is empty")]
    EmptyResponse,

    /// No `[` ... `]` span was found in the response.
    #[error("no JSON array found in AI response")]
    NoJsonArray,

    /// The response parsed, but not to an array of key-value records.
    #[error("AI response is not a JSON array of records")]
    NotRecordArray,

    /// No `@startuml` ... `@enduml` block was found in the response.
    #[error("no @startuml/@enduml block found in AI response")]
    NoDiagram,

    /// The candidate array failed to parse even after quote repair.
    #[error("failed to parse AI response as JSON: {0}")]
    Parse(String),
}

/// Extracts a record sequence from a raw AI reply.
///
/// Tolerances, applied in order:
/// 1. Markdown code-fence markers (```` ```json ```` and bare ```` ``` ````)
///    are stripped.
/// 2. If the cleaned text is itself a well-formed JSON array it is taken
///    exactly as-is.
/// 3. Otherwise the greedy bracket span (first `[` to last `]`) is the
///    candidate, parsed strictly first.
/// 4. Only if strict parsing fails, single quotes are substituted with
///    double quotes and the candidate is parsed again. This repair is lossy:
///    strings that legitimately contain apostrophes can be corrupted. It is
///    a known limitation carried over from the systems this tool imports
///    into, not behavior worth perfecting.
///
/// Returns the full record sequence or a failure, never a truncated list.
pub fn normalize(raw: &str) -> Result<Vec<RawRecord>, NormalizeError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(NormalizeError::EmptyResponse);
    }

    let cleaned = strip_fences(trimmed);

    // A well-formed array round-trips untouched.
    if let Ok(value) = serde_json::from_str::<Value>(&cleaned) {
        if value.is_array() {
            return into_records(value);
        }
    }

    let start = cleaned.find('[').ok_or(NormalizeError::NoJsonArray)?;
    let end = cleaned.rfind(']').ok_or(NormalizeError::NoJsonArray)?;
    if end <= start {
        return Err(NormalizeError::NoJsonArray);
    }
    let candidate = &cleaned[start..=end];

    match serde_json::from_str::<Value>(candidate) {
        Ok(value) => into_records(value),
        Err(_) => {
            let repaired = candidate.replace('\'', "\"");
            match serde_json::from_str::<Value>(&repaired) {
                Ok(value) => into_records(value),
                Err(e) => Err(NormalizeError::Parse(e.to_string())),
            }
        }
    }
}

/// Removes markdown code-fence markers.
fn strip_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

/// Requires an array of key-value records; any other shape is a failure.
fn into_records(value: Value) -> Result<Vec<RawRecord>, NormalizeError> {
    let items = match value {
        Value::Array(items) => items,
        _ => return Err(NormalizeError::NotRecordArray),
    };

    items
        .into_iter()
        .map(|item| match item {
            Value::Object(map) => Ok(map),
            _ => Err(NormalizeError::NotRecordArray),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn records_of(value: Value) -> Vec<RawRecord> {
        value
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_object().unwrap().clone())
            .collect()
    }

    #[test]
    fn recovers_plain_array_exactly() {
        let raw = r#"[{"Test Case ID":"TC1","Test Data":{"user":"a"}}]"#;
        let records = normalize(raw).unwrap();
        assert_eq!(
            records,
            records_of(json!([{"Test Case ID":"TC1","Test Data":{"user":"a"}}]))
        );
    }

    #[test]
    fn strips_json_fences() {
        let raw = "```json\n[{\"a\": 1}]\n```";
        let records = normalize(raw).unwrap();
        assert_eq!(records, records_of(json!([{"a": 1}])));
    }

    #[test]
    fn strips_bare_fences() {
        let raw = "```\n[{\"a\": 1}]\n```";
        assert_eq!(normalize(raw).unwrap(), records_of(json!([{"a": 1}])));
    }

    #[test]
    fn recovers_span_inside_prose() {
        let raw = "Here are your test cases:\n[{\"a\": 1}, {\"b\": 2}]\nLet me know!";
        let records = normalize(raw).unwrap();
        assert_eq!(records, records_of(json!([{"a": 1}, {"b": 2}])));
    }

    #[test]
    fn repairs_single_quotes() {
        let records = normalize("[{'a': 1}]").unwrap();
        assert_eq!(records, records_of(json!([{"a": 1}])));
    }

    #[test]
    fn strict_parse_wins_over_repair() {
        // Apostrophes inside well-formed JSON must survive untouched.
        let raw = r#"[{"name": "user's login"}]"#;
        let records = normalize(raw).unwrap();
        assert_eq!(records[0]["name"], json!("user's login"));
    }

    #[test]
    fn empty_input_fails() {
        assert_eq!(normalize(""), Err(NormalizeError::EmptyResponse));
        assert_eq!(normalize("   \n\t "), Err(NormalizeError::EmptyResponse));
    }

    #[test]
    fn prose_without_array_fails() {
        assert_eq!(
            normalize("Sorry, I cannot help."),
            Err(NormalizeError::NoJsonArray)
        );
    }

    #[test]
    fn brackets_in_wrong_order_fail() {
        assert_eq!(normalize("] nothing here ["), Err(NormalizeError::NoJsonArray));
    }

    #[test]
    fn truncated_json_is_parse_failure() {
        let raw = r#"[{"a": 1}, {"b":"#;
        assert_eq!(normalize(raw), Err(NormalizeError::NoJsonArray));

        let raw = r#"[{"a": 1}, {"b": ]"#;
        assert!(matches!(normalize(raw), Err(NormalizeError::Parse(_))));
    }

    #[test]
    fn object_response_with_inner_array_recovers_span() {
        // A top-level object is not an array; the greedy span inside it is.
        let raw = r#"{"cases": [{"a": 1}]}"#;
        assert_eq!(normalize(raw).unwrap(), records_of(json!([{"a": 1}])));
    }

    #[test]
    fn array_of_scalars_fails() {
        assert_eq!(normalize("[1, 2, 3]"), Err(NormalizeError::NotRecordArray));
    }

    #[test]
    fn empty_array_is_valid() {
        assert_eq!(normalize("[]").unwrap(), Vec::<RawRecord>::new());
    }

    #[test]
    fn never_partially_emits_on_bad_element() {
        let raw = r#"[{"a": 1}, 2]"#;
        assert_eq!(normalize(raw), Err(NormalizeError::NotRecordArray));
    }

    // Property tests: round-trip laws over arbitrary record arrays.

    fn value_strategy() -> impl Strategy<Value = Value> {
        prop_oneof![
            "[a-zA-Z0-9 ]{0,12}".prop_map(Value::from),
            any::<i64>().prop_map(Value::from),
            any::<bool>().prop_map(Value::from),
        ]
    }

    fn records_strategy() -> impl Strategy<Value = Vec<RawRecord>> {
        proptest::collection::vec(
            proptest::collection::btree_map("[a-z]{1,8}", value_strategy(), 1..5).prop_map(
                |map| {
                    map.into_iter()
                        .collect::<serde_json::Map<String, Value>>()
                },
            ),
            1..6,
        )
    }

    proptest! {
        #[test]
        fn roundtrips_bare_arrays(records in records_strategy()) {
            let raw = serde_json::to_string(&records).unwrap();
            prop_assert_eq!(normalize(&raw).unwrap(), records);
        }

        #[test]
        fn roundtrips_fenced_arrays(records in records_strategy()) {
            let raw = format!("```json\n{}\n```", serde_json::to_string_pretty(&records).unwrap());
            prop_assert_eq!(normalize(&raw).unwrap(), records);
        }

        #[test]
        fn roundtrips_prose_wrapped_arrays(records in records_strategy()) {
            let raw = format!(
                "Sure! Here are the test cases you asked for:\n{}\nHope this helps.",
                serde_json::to_string(&records).unwrap()
            );
            prop_assert_eq!(normalize(&raw).unwrap(), records);
        }
    }
}
