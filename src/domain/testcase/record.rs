//! Canonical test case records and field-set projection.
//!
//! The AI returns loosely-typed records with whatever keys it chose to emit.
//! [`TestCaseRecord::from_raw`] projects such a record onto the fixed export
//! shape with default-on-missing lookups: absent string fields become the
//! empty string, absent data/expected fields become the empty JSON object.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A record exactly as the AI supplied it, archived verbatim by the JSON
/// exporter.
pub type RawRecord = Map<String, Value>;

/// Constant test type emitted in every CSV row.
pub const TEST_TYPE_MANUAL: &str = "Manual";

/// Field-set variant: selects the prompt's requested keys and the CSV
/// header shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldSet {
    /// Generic test cases: test data and expected result.
    #[default]
    Generic,
    /// API test cases: request, headers, response, error code/message.
    Api,
}

impl FieldSet {
    /// Keys the prompt asks the model to emit per record.
    pub fn prompt_fields(&self) -> &'static [&'static str] {
        match self {
            FieldSet::Generic => &[
                "Test Case ID",
                "Test Case Name",
                "Test Step",
                "Test Data",
                "Expected Result",
            ],
            FieldSet::Api => &[
                "Test Case ID",
                "Test Summary",
                "Test Step",
                "Request",
                "Headers",
                "Response",
                "Error Code",
                "Error Message",
            ],
        }
    }

    /// Fixed CSV header row for this variant.
    pub fn csv_header(&self) -> &'static [&'static str] {
        match self {
            FieldSet::Generic => &[
                "Test Case No",
                "Test Step",
                "Test Type",
                "Test Summary",
                "Test Data",
                "Expected Result",
            ],
            FieldSet::Api => &[
                "Test Case ID",
                "Test Summary",
                "Test Step",
                "Test Type",
                "Test Data",
                "Expected Result",
            ],
        }
    }
}

impl std::fmt::Display for FieldSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldSet::Generic => write!(f, "generic"),
            FieldSet::Api => write!(f, "api"),
        }
    }
}

/// The canonical unit of output, independent of whatever keys the AI
/// actually returned.
///
/// Ordinal position is not part of the record; the exporter assigns a dense
/// 1..N sequence at write time and never trusts the AI's own numbering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCaseRecord {
    /// Identifier as supplied (e.g. "TC1"); empty string when absent.
    pub identifier: String,
    /// Short name or summary; empty string when absent.
    pub summary: String,
    /// Step or action text; empty string when absent.
    pub step: String,
    /// Input data (request payload, headers, or key/value map); empty
    /// object when absent.
    pub data: Value,
    /// Expected result (response payload, message, error); empty object
    /// when absent.
    pub expected: Value,
}

impl TestCaseRecord {
    /// Projects a loosely-typed record onto the canonical shape.
    ///
    /// Never fails: every lookup falls back to a documented default.
    pub fn from_raw(raw: &RawRecord, field_set: FieldSet) -> Self {
        let identifier = lookup_text(raw, &["Test Case ID", "TCID", "Test Case No", "ID"]);
        let summary = lookup_text(
            raw,
            &["Test Case Name", "Test Summary", "Test Scenario", "Summary"],
        );
        let step = lookup_text(raw, &["Test Step", "Action", "Steps"]);

        let (data, expected) = match field_set {
            FieldSet::Generic => (
                lookup_value(raw, &["Test Data", "Data"]),
                lookup_value(raw, &["Expected Result", "Expected"]),
            ),
            FieldSet::Api => (
                collect_fields(raw, &["Request", "Headers"])
                    .unwrap_or_else(|| lookup_value(raw, &["Test Data", "Data"])),
                collect_fields(raw, &["Response", "Error Code", "Error Message"])
                    .unwrap_or_else(|| lookup_value(raw, &["Expected Result", "Expected"])),
            ),
        };

        Self {
            identifier,
            summary,
            step,
            data,
            expected,
        }
    }
}

/// First matching key rendered as text; empty string when no key matches.
fn lookup_text(raw: &RawRecord, keys: &[&str]) -> String {
    for key in keys {
        match raw.get(*key) {
            Some(Value::String(s)) => return s.clone(),
            Some(Value::Null) | None => continue,
            Some(other) => return other.to_string(),
        }
    }
    String::new()
}

/// First matching key's value; empty object when no key matches.
fn lookup_value(raw: &RawRecord, keys: &[&str]) -> Value {
    keys.iter()
        .find_map(|key| raw.get(*key))
        .filter(|v| !v.is_null())
        .cloned()
        .unwrap_or_else(|| Value::Object(Map::new()))
}

/// Gathers the named keys into one object, preserving key names.
///
/// Returns `None` when the record carries none of them, so callers can fall
/// back to the generic lookup.
fn collect_fields(raw: &RawRecord, keys: &[&str]) -> Option<Value> {
    let mut collected = Map::new();
    for key in keys {
        if let Some(value) = raw.get(*key) {
            if !value.is_null() {
                collected.insert((*key).to_string(), value.clone());
            }
        }
    }
    if collected.is_empty() {
        None
    } else {
        Some(Value::Object(collected))
    }
}
