use std::time::Duration;

use super::{endpoint, LLMClient};
use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::{LLMConfig, LLMProvider};
use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

pub struct OpenAIClient {
    client: reqwest::Client,
    config: LLMConfig,
}

impl OpenAIClient {
    pub fn new(config: LLMConfig) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(config.timeout())
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            config,
        }
    }

    fn api_key(&self) -> Result<&str> {
        self.config
            .api_key()
            .ok_or_else(|| AppError::LLMError("Missing API key for OpenAI".to_string()))
    }

    fn request_body(&self, system: &str, user: &str) -> serde_json::Value {
        let mut body = json!({
            "model": self.config.model,
            "messages": [
                {
                    "role": "system",
                    "content": system
                },
                {
                    "role": "user",
                    "content": user
                }
            ],
            "temperature": self.config.temperature.unwrap_or(0.3),
        });
        if let Some(max_tokens) = self.config.max_tokens {
            body["max_tokens"] = json!(max_tokens);
        }
        body
    }
}

#[async_trait]
impl LLMClient for OpenAIClient {
    fn provider(&self) -> LLMProvider {
        LLMProvider::OpenAI
    }

    fn is_configured(&self) -> bool {
        self.config.api_key().is_some()
    }

    fn deadline(&self) -> Duration {
        self.config.timeout()
    }

    async fn generate(&self, system: &str, user: &str) -> Result<String> {
        let api_key = self.api_key()?;
        let url = endpoint(&self.config.base_url, "chat/completions");

        debug!(model = %self.config.model, "OpenAI chat request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&self.request_body(system, user))
            .send()
            .await
            .map_err(|e| AppError::LLMError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::LLMError(format!(
                "API error ({}): {}",
                status, text
            )));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AppError::LLMError(format!("Failed to parse JSON: {}", e)))?;

        json["choices"][0]["message"]["content"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| AppError::LLMError("Invalid response format".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(api_key: Option<&str>) -> LLMConfig {
        LLMConfig {
            provider: LLMProvider::OpenAI,
            base_url: "https://api.openai.com/v1".to_string(),
            command: None,
            model: "gpt-4o-mini".to_string(),
            api_key: api_key.map(str::to_string),
            max_tokens: None,
            temperature: Some(0.3),
            timeout_secs: 120,
        }
    }

    #[test]
    fn configured_only_with_api_key() {
        assert!(OpenAIClient::new(config(Some("sk-test"))).is_configured());
        assert!(!OpenAIClient::new(config(None)).is_configured());
        assert!(!OpenAIClient::new(config(Some(""))).is_configured());
    }

    #[test]
    fn request_body_splits_system_and_user() {
        let client = OpenAIClient::new(config(Some("sk-test")));
        let body = client.request_body("be terse", "write tests");
        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "be terse");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "write tests");
        assert!(body.get("max_tokens").is_none());
    }

    #[tokio::test]
    async fn generate_without_key_fails_before_sending() {
        let client = OpenAIClient::new(config(None));
        let err = client.generate("system", "user").await.unwrap_err();
        assert!(matches!(err, AppError::LLMError(_)));
    }
}
