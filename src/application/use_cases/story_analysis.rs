use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::application::use_cases::test_case_generation::{
    analysis_prompt, fallback_analysis, FallbackOrchestrator, ANALYSIS_SYSTEM_PROMPT,
};
use crate::domain::user_story::UserStory;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "provider", rename_all = "snake_case")]
pub enum AnalysisSource {
    Provider(String),
    Fallback,
}

#[derive(Debug, Clone, Serialize)]
pub struct StoryAnalysis {
    pub text: String,
    pub source: AnalysisSource,
}

/// Summarizes the intent of a user story before generation. Falls back to the
/// story's opening sentences when no provider answers.
pub struct StoryAnalysisUseCase {
    orchestrator: Arc<FallbackOrchestrator>,
}

impl StoryAnalysisUseCase {
    pub fn new(orchestrator: Arc<FallbackOrchestrator>) -> Self {
        Self { orchestrator }
    }

    pub async fn execute(&self, story: &UserStory) -> StoryAnalysis {
        let prompt = analysis_prompt(story.as_str());

        match self
            .orchestrator
            .first_response(ANALYSIS_SYSTEM_PROMPT, &prompt)
            .await
        {
            Some((provider, text)) => {
                info!(provider = %provider, "User story analysis completed");
                StoryAnalysis {
                    text: text.trim().to_string(),
                    source: AnalysisSource::Provider(provider),
                }
            }
            None => {
                warn!("Analysis failed; using the first two sentences of the user story");
                StoryAnalysis {
                    text: fallback_analysis(story.as_str()),
                    source: AnalysisSource::Fallback,
                }
            }
        }
    }
}
