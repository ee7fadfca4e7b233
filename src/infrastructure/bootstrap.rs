use std::sync::Arc;

use tracing::info;

use crate::application::use_cases::story_analysis::StoryAnalysisUseCase;
use crate::application::use_cases::test_case_generation::{
    FallbackOrchestrator, TestCaseGenerationUseCase,
};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::llm_clients::{build_client, LLMClient, SharedLLMClient};

pub struct AppState {
    pub config: AppConfig,
    pub orchestrator: Arc<FallbackOrchestrator>,
    pub analysis: StoryAnalysisUseCase,
    pub generation: TestCaseGenerationUseCase,
}

pub fn setup(config: AppConfig) -> AppState {
    let clients = config.llm_configs().into_iter().map(build_client).collect();
    setup_with_clients(config, clients)
}

/// Wires the use cases around an explicit provider list, in priority order.
pub fn setup_with_clients(config: AppConfig, clients: Vec<SharedLLMClient>) -> AppState {
    for client in &clients {
        info!(
            provider = %client.name(),
            configured = client.is_configured(),
            deadline_secs = client.deadline().as_secs(),
            "Provider registered"
        );
    }

    let orchestrator = Arc::new(FallbackOrchestrator::new(clients));
    AppState {
        config,
        analysis: StoryAnalysisUseCase::new(orchestrator.clone()),
        generation: TestCaseGenerationUseCase::new(orchestrator.clone()),
        orchestrator,
    }
}
