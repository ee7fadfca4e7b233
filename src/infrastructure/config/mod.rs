use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::error::Result;
use crate::domain::llm_config::{LLMConfig, LLMProvider};

pub const CONFIG_FILE: &str = "storycase.toml";

/// Process-wide settings, resolved once at startup and treated as immutable.
///
/// Sources, lowest precedence first: built-in defaults, `storycase.toml`,
/// `STORYCASE_*` variables, then the bare `OPENAI_API_KEY` / `GOOGLE_API_KEY`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub openai_api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_api_key: Option<String>,

    pub openai_base_url: String,
    pub openai_model: String,
    pub gemini_base_url: String,
    pub gemini_model: String,
    pub local_command: String,
    pub local_model: String,

    pub temperature: f32,
    pub hosted_timeout_secs: u64,
    pub local_timeout_secs: u64,

    pub prompts_dir: PathBuf,
    pub knowledge_base_path: PathBuf,
    pub results_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            google_api_key: None,
            openai_base_url: "https://api.openai.com/v1".to_string(),
            openai_model: "gpt-4o-mini".to_string(),
            gemini_base_url: "https://generativelanguage.googleapis.com/v1beta/models".to_string(),
            gemini_model: "gemini-1.5-flash".to_string(),
            local_command: "ollama".to_string(),
            local_model: "phi3:mini".to_string(),
            temperature: 0.3,
            hosted_timeout_secs: 120,
            local_timeout_secs: 60,
            prompts_dir: PathBuf::from("prompts"),
            knowledge_base_path: PathBuf::from("knowledge_base").join("knowledge_base.json"),
            results_dir: PathBuf::from("test_results"),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        let config = Self::from_figment(Self::figment(Path::new(CONFIG_FILE)))?;
        config.log_keys();
        Ok(config)
    }

    pub fn figment(config_file: &Path) -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(config_file))
            .merge(Env::prefixed("STORYCASE_"))
            .merge(Env::raw().only(&["OPENAI_API_KEY", "GOOGLE_API_KEY"]))
    }

    pub fn from_figment(figment: Figment) -> Result<Self> {
        Ok(figment.extract()?)
    }

    /// Provider settings in fallback order: OpenAI, Gemini, local runner.
    pub fn llm_configs(&self) -> Vec<LLMConfig> {
        vec![
            LLMConfig {
                provider: LLMProvider::OpenAI,
                base_url: self.openai_base_url.clone(),
                command: None,
                model: self.openai_model.clone(),
                api_key: self.openai_api_key.clone(),
                max_tokens: None,
                temperature: Some(self.temperature),
                timeout_secs: self.hosted_timeout_secs,
            },
            LLMConfig {
                provider: LLMProvider::Google,
                base_url: self.gemini_base_url.clone(),
                command: None,
                model: self.gemini_model.clone(),
                api_key: self.google_api_key.clone(),
                max_tokens: None,
                temperature: None,
                timeout_secs: self.hosted_timeout_secs,
            },
            LLMConfig {
                provider: LLMProvider::Local,
                base_url: String::new(),
                command: Some(self.local_command.clone()),
                model: self.local_model.clone(),
                api_key: None,
                max_tokens: None,
                temperature: None,
                timeout_secs: self.local_timeout_secs,
            },
        ]
    }

    fn log_keys(&self) {
        fn preview_opt(val: &Option<String>) -> String {
            match val.as_deref().map(str::trim) {
                Some(v) if !v.is_empty() => format!("set ({} chars)", v.len()),
                _ => "<not set>".to_string(),
            }
        }

        info!(
            openai_api_key = %preview_opt(&self.openai_api_key),
            google_api_key = %preview_opt(&self.google_api_key),
            local_runner = %format!("{} run {}", self.local_command, self.local_model),
            "Config loaded"
        );
    }
}
