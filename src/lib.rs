mod app;
pub mod application;
pub mod domain;
pub mod infrastructure;
mod interfaces;

pub use app::run;
pub use application::use_cases::test_case_generation::{
    compose, FallbackOrchestrator, GenerationReport,
};
pub use domain::test_case::TestCaseRecord;
