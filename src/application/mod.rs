pub mod use_cases;

pub use use_cases::story_analysis::StoryAnalysisUseCase;
pub use use_cases::test_case_generation::TestCaseGenerationUseCase;
