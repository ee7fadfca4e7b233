use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::domain::test_case::CandidateRecord;

static ARRAY_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\[.*?\]").unwrap());

/// Pulls a record list out of free-form model output.
///
/// The first bracketed span that parses to a non-empty JSON array wins. If
/// none does, the whole text is tried as a JSON array.
pub(crate) fn extract_candidates(raw: &str) -> Vec<CandidateRecord> {
    for span in ARRAY_PATTERN.find_iter(raw) {
        if let Ok(Value::Array(items)) = serde_json::from_str::<Value>(span.as_str()) {
            if !items.is_empty() {
                return items.into_iter().map(CandidateRecord::from).collect();
            }
        }
    }

    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(items)) => items.into_iter().map(CandidateRecord::from).collect(),
        _ => Vec::new(),
    }
}
