mod llm_output;
mod orchestrator;
mod prompts;
mod records;
mod text_blocks;

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::test_case::TestCaseRecord;
use crate::domain::user_story::UserStory;

pub use orchestrator::{
    parse_records, AttemptOutcome, FallbackOrchestrator, GenerationReport, ProviderAttempt,
};
pub use prompts::{analysis_prompt, compose, fallback_analysis};
pub(crate) use prompts::ANALYSIS_SYSTEM_PROMPT;

#[cfg(test)]
pub(crate) use orchestrator::tests::{MockClient, Reply};

/// Everything the generation prompt is built from.
#[derive(Debug, Clone)]
pub struct GenerationRequest<'a> {
    pub story: &'a UserStory,
    pub analysis: &'a str,
    pub domain_context: Option<&'a str>,
    pub template: Option<&'a str>,
}

pub struct TestCaseGenerationUseCase {
    orchestrator: Arc<FallbackOrchestrator>,
}

impl TestCaseGenerationUseCase {
    pub fn new(orchestrator: Arc<FallbackOrchestrator>) -> Self {
        Self { orchestrator }
    }

    pub async fn execute(&self, request: GenerationRequest<'_>) -> GenerationReport {
        let prompt = compose(
            request.story.as_str(),
            request.analysis,
            request.domain_context,
            request.template,
        );
        info!(chars = prompt.chars().count(), "Sending prompt to LLM providers");

        let report = self.orchestrator.generate_with_report(&prompt).await;
        if report.records.is_empty() {
            warn!("No test cases generated");
        } else {
            info!(count = report.records.len(), "Final result");
            for (index, record) in report.records.iter().enumerate() {
                info!("   TC{}: {}...", index + 1, preview(record, 60));
            }
        }
        report
    }
}

fn preview(record: &TestCaseRecord, max_chars: usize) -> String {
    record.scenario.chars().take(max_chars).collect()
}
