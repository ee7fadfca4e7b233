use crate::domain::test_case::{CandidateRecord, TestCaseRecord};

/// Keeps the mappings whose scenario, steps, expected and type are all
/// non-blank; everything else is dropped. Order is preserved.
pub(crate) fn clean_and_validate(candidates: Vec<CandidateRecord>) -> Vec<TestCaseRecord> {
    candidates
        .iter()
        .filter(|candidate| matches!(candidate, CandidateRecord::Mapping(_)))
        .filter_map(|candidate| {
            TestCaseRecord::new(
                &candidate.field("scenario"),
                &candidate.field("steps"),
                &candidate.field("expected"),
                &candidate.field("type"),
            )
        })
        .collect()
}
