use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum LLMProvider {
    OpenAI,
    Google,
    Local,
}

impl fmt::Display for LLMProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LLMProvider::OpenAI => write!(f, "OpenAI"),
            LLMProvider::Google => write!(f, "Gemini"),
            LLMProvider::Local => write!(f, "Ollama"),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LLMConfig {
    pub provider: LLMProvider,
    pub base_url: String,
    /// Executable for providers that run as a local process.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    pub model: String,
    pub api_key: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub timeout_secs: u64,
}

impl LLMConfig {
    /// Key with surrounding whitespace removed; blank keys count as missing.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            provider: LLMProvider::Local,
            base_url: String::new(),
            command: Some("ollama".to_string()),
            model: "phi3:mini".to_string(),
            api_key: None,
            max_tokens: None,
            temperature: Some(0.3),
            timeout_secs: 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_api_key_counts_as_missing() {
        let config = LLMConfig {
            api_key: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(config.api_key().is_none());

        let config = LLMConfig {
            api_key: Some(" sk-test ".to_string()),
            ..Default::default()
        };
        assert_eq!(config.api_key(), Some("sk-test"));
    }

    #[test]
    fn zero_timeout_is_clamped() {
        let config = LLMConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.timeout(), Duration::from_secs(1));
    }

    #[test]
    fn default_runs_ollama_locally() {
        let config = LLMConfig::default();
        assert_eq!(config.provider, LLMProvider::Local);
        assert_eq!(config.command.as_deref(), Some("ollama"));
        assert!(config.base_url.is_empty());
    }
}
