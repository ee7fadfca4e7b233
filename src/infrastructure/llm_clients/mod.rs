pub mod gemini;
pub mod ollama;
pub mod openai;

use std::sync::Arc;
use std::time::Duration;

use crate::domain::error::Result;
use crate::domain::llm_config::{LLMConfig, LLMProvider};
use async_trait::async_trait;
use gemini::GeminiClient;
use ollama::OllamaCliClient;
use openai::OpenAIClient;

/// One text-generation provider: text in, text or failure out.
#[async_trait]
pub trait LLMClient {
    fn provider(&self) -> LLMProvider;

    fn name(&self) -> String {
        self.provider().to_string()
    }

    /// Unconfigured providers are skipped without being called.
    fn is_configured(&self) -> bool {
        true
    }

    /// Upper bound the caller enforces on a single `generate` call.
    fn deadline(&self) -> Duration;

    async fn generate(&self, system: &str, user: &str) -> Result<String>;
}

pub type SharedLLMClient = Arc<dyn LLMClient + Send + Sync>;

pub fn build_client(config: LLMConfig) -> SharedLLMClient {
    match config.provider {
        LLMProvider::OpenAI => Arc::new(OpenAIClient::new(config)),
        LLMProvider::Google => Arc::new(GeminiClient::new(config)),
        LLMProvider::Local => Arc::new(OllamaCliClient::new(config)),
    }
}

pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    if base_url.ends_with('/') {
        format!("{}{}", base_url, path)
    } else {
        format!("{}/{}", base_url, path)
    }
}
