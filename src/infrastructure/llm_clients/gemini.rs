use std::time::Duration;

use super::LLMClient;
use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::{LLMConfig, LLMProvider};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(rename = "maxOutputTokens", skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: GeminiCandidateContent,
}

#[derive(Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiCandidatePart>,
}

#[derive(Deserialize)]
struct GeminiCandidatePart {
    #[serde(default)]
    text: String,
}

pub struct GeminiClient {
    client: reqwest::Client,
    config: LLMConfig,
}

impl GeminiClient {
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
            .ok_or_else(|| AppError::LLMError("Missing API key for Google provider".to_string()))
    }

    /// The prompt goes out as a single part with no role; Gemini gets no
    /// separate system instruction.
    fn request_body(&self, prompt: &str) -> GeminiRequest {
        GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: Some(GenerationConfig {
                temperature: self.config.temperature.map(f64::from),
                max_output_tokens: self.config.max_tokens,
            }),
        }
    }
}

#[async_trait]
impl LLMClient for GeminiClient {
    fn provider(&self) -> LLMProvider {
        LLMProvider::Google
    }

    fn is_configured(&self) -> bool {
        self.config.api_key().is_some()
    }

    fn deadline(&self) -> Duration {
        self.config.timeout()
    }

    async fn generate(&self, _system: &str, user: &str) -> Result<String> {
        let api_key = self.api_key()?;
        let model_id = self.config.model.trim();
        let base_url = self.config.base_url.trim_end_matches('/');
        let url = format!("{}/{}:generateContent", base_url, model_id);

        debug!(model = %model_id, "Gemini generateContent request");

        let response = self
            .client
            .post(&url)
            .query(&[("key", api_key)])
            .header("Content-Type", "application/json")
            .json(&self.request_body(user))
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

        let json: GeminiResponse = response
            .json()
            .await
            .map_err(|e| AppError::LLMError(format!("Failed to parse JSON: {}", e)))?;

        response_text(json)
    }
}

/// Text of the first candidate, with its parts joined in order.
fn response_text(response: GeminiResponse) -> Result<String> {
    response
        .candidates
        .into_iter()
        .next()
        .map(|candidate| {
            candidate
                .content
                .parts
                .into_iter()
                .map(|part| part.text)
                .collect()
        })
        .ok_or_else(|| AppError::LLMError("Invalid response format".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(api_key: Option<&str>) -> LLMConfig {
        LLMConfig {
            provider: LLMProvider::Google,
            base_url: "https://generativelanguage.googleapis.com/v1beta/models".to_string(),
            command: None,
            model: "gemini-1.5-flash".to_string(),
            api_key: api_key.map(str::to_string),
            max_tokens: None,
            temperature: None,
            timeout_secs: 120,
        }
    }

    #[test]
    fn request_body_sends_prompt_as_single_part() {
        let client = GeminiClient::new(config(Some("key")));
        let body = serde_json::to_value(client.request_body("write tests")).unwrap();
        assert_eq!(body["contents"].as_array().unwrap().len(), 1);
        assert_eq!(body["contents"][0]["parts"][0]["text"], "write tests");
        assert!(body["contents"][0].get("role").is_none());
        assert!(body["generationConfig"].get("temperature").is_none());
    }

    #[test]
    fn response_parts_are_concatenated() {
        let json: GeminiResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"[{\"a\":"},{"text":"1}]"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(response_text(json).unwrap(), r#"[{"a":1}]"#);
    }

    #[test]
    fn only_first_candidate_is_used() {
        let json: GeminiResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"first"}]}},{"content":{"parts":[{"text":"second"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(response_text(json).unwrap(), "first");
    }

    #[test]
    fn missing_candidates_is_an_error() {
        let json: GeminiResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        assert!(matches!(response_text(json), Err(AppError::LLMError(_))));

        let json: GeminiResponse = serde_json::from_str("{}").unwrap();
        assert!(response_text(json).is_err());
    }

    #[test]
    fn configured_only_with_api_key() {
        assert!(GeminiClient::new(config(Some("key"))).is_configured());
        assert!(!GeminiClient::new(config(None)).is_configured());
    }
}
