pub mod report;
pub mod story_analysis;
pub mod test_case_generation;
