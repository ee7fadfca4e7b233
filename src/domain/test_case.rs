use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const PENDING_STATUS: &str = "Pending";

/// One generated test case. Only built through [`TestCaseRecord::new`], which
/// rejects records with a blank required field.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TestCaseRecord {
    pub scenario: String,
    pub steps: String,
    pub expected: String,
    #[serde(rename = "type")]
    pub case_type: String,
    pub status: String,
}

impl TestCaseRecord {
    pub fn new(scenario: &str, steps: &str, expected: &str, case_type: &str) -> Option<Self> {
        let scenario = scenario.trim();
        let steps = steps.trim();
        let expected = expected.trim();
        let case_type = case_type.trim();

        if scenario.is_empty() || steps.is_empty() || expected.is_empty() || case_type.is_empty()
        {
            return None;
        }

        Some(Self {
            scenario: scenario.to_string(),
            steps: steps.to_string(),
            expected: expected.to_string(),
            case_type: case_type.to_string(),
            status: PENDING_STATUS.to_string(),
        })
    }
}

/// An extracted list element before validation.
#[derive(Debug, Clone, PartialEq)]
pub enum CandidateRecord {
    Mapping(Map<String, Value>),
    Other(Value),
}

impl From<Value> for CandidateRecord {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => CandidateRecord::Mapping(map),
            other => CandidateRecord::Other(other),
        }
    }
}

impl CandidateRecord {
    /// String form of a field. Strings are taken as-is, `null` and missing
    /// keys become empty, everything else uses its JSON text.
    pub fn field(&self, key: &str) -> String {
        let CandidateRecord::Mapping(map) = self else {
            return String::new();
        };
        match map.get(key) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(text)) => text.clone(),
            Some(other) => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_trims_and_sets_pending() {
        let record = TestCaseRecord::new("  Login ", "Submit form\n", " Dashboard", " Happy ")
            .expect("record should be valid");
        assert_eq!(record.scenario, "Login");
        assert_eq!(record.steps, "Submit form");
        assert_eq!(record.expected, "Dashboard");
        assert_eq!(record.case_type, "Happy");
        assert_eq!(record.status, "Pending");
    }

    #[test]
    fn new_rejects_blank_fields() {
        assert!(TestCaseRecord::new("Login", "   ", "Dashboard", "Happy").is_none());
        assert!(TestCaseRecord::new("Login", "Steps", "Dashboard", "").is_none());
    }

    #[test]
    fn type_field_serializes_as_type() {
        let record = TestCaseRecord::new("a", "b", "c", "Edge").unwrap();
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["type"], "Edge");
        assert_eq!(value["status"], "Pending");
    }

    #[test]
    fn candidate_field_coerces_non_strings() {
        let candidate = CandidateRecord::from(json!({
            "scenario": 42,
            "steps": true,
            "expected": null,
        }));
        assert_eq!(candidate.field("scenario"), "42");
        assert_eq!(candidate.field("steps"), "true");
        assert_eq!(candidate.field("expected"), "");
        assert_eq!(candidate.field("type"), "");
    }

    #[test]
    fn non_mapping_candidate_has_no_fields() {
        let candidate = CandidateRecord::from(json!("just text"));
        assert_eq!(candidate, CandidateRecord::Other(json!("just text")));
        assert_eq!(candidate.field("scenario"), "");
    }
}
