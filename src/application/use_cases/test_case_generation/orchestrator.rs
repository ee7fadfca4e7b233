use serde::Serialize;
use tokio::time::timeout;
use tracing::{info, warn};

use super::llm_output::extract_candidates;
use super::prompts::TEST_CASE_SYSTEM_PROMPT;
use super::records::clean_and_validate;
use super::text_blocks::parse_text_blocks;
use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::LLMProvider;
use crate::domain::test_case::TestCaseRecord;
use crate::infrastructure::llm_clients::{LLMClient, SharedLLMClient};
use crate::infrastructure::response::strip_reasoning;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AttemptOutcome {
    Skipped,
    Failed { reason: String },
    Produced { chars: usize, records: usize },
}

/// One try against one provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderAttempt {
    pub provider: String,
    #[serde(flatten)]
    pub outcome: AttemptOutcome,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GenerationReport {
    pub records: Vec<TestCaseRecord>,
    /// Provider whose output was used; `None` when every attempt came up empty.
    pub source: Option<String>,
    pub attempts: Vec<ProviderAttempt>,
}

/// Walks providers in priority order and keeps the first usable answer.
/// Providers are called one at a time and never retried within a call.
pub struct FallbackOrchestrator {
    providers: Vec<SharedLLMClient>,
}

impl FallbackOrchestrator {
    pub fn new(providers: Vec<SharedLLMClient>) -> Self {
        Self { providers }
    }

    pub fn providers(&self) -> &[SharedLLMClient] {
        &self.providers
    }

    pub async fn generate(&self, prompt: &str) -> Vec<TestCaseRecord> {
        self.generate_with_report(prompt).await.records
    }

    pub async fn generate_with_report(&self, prompt: &str) -> GenerationReport {
        let mut report = GenerationReport::default();

        for provider in &self.providers {
            let name = provider.name();
            if !provider.is_configured() {
                info!(provider = %name, "Provider not configured, skipping");
                report.attempts.push(ProviderAttempt {
                    provider: name,
                    outcome: AttemptOutcome::Skipped,
                });
                continue;
            }

            info!(provider = %name, "Generating test cases");
            let raw = match call_with_deadline(provider, TEST_CASE_SYSTEM_PROMPT, prompt).await {
                Ok(raw) => raw,
                Err(err) => {
                    warn!(provider = %name, error = %err, "Provider call failed");
                    report.attempts.push(ProviderAttempt {
                        provider: name,
                        outcome: AttemptOutcome::Failed {
                            reason: err.to_string(),
                        },
                    });
                    continue;
                }
            };
            info!(provider = %name, chars = raw.chars().count(), "Provider responded");

            let allow_text_blocks = provider.provider() == LLMProvider::Local;
            let records = parse_records(&raw, allow_text_blocks);
            report.attempts.push(ProviderAttempt {
                provider: name.clone(),
                outcome: AttemptOutcome::Produced {
                    chars: raw.chars().count(),
                    records: records.len(),
                },
            });

            if !records.is_empty() {
                info!(provider = %name, count = records.len(), "Valid test cases generated");
                report.records = records;
                report.source = Some(name);
                return report;
            }
            warn!(provider = %name, "No usable test cases in response");
        }

        warn!("All LLM providers failed. No test cases generated.");
        report
    }

    /// First non-blank raw answer, with the name of the provider that gave it.
    pub async fn first_response(&self, system: &str, user: &str) -> Option<(String, String)> {
        for provider in &self.providers {
            let name = provider.name();
            if !provider.is_configured() {
                continue;
            }

            match call_with_deadline(provider, system, user).await {
                Ok(text) if !text.trim().is_empty() => return Some((name, text)),
                Ok(_) => warn!(provider = %name, "Provider returned an empty response"),
                Err(err) => warn!(provider = %name, error = %err, "Provider call failed"),
            }
        }
        None
    }
}

/// Structured extraction first; plain-text blocks only when allowed and the
/// structured pass found nothing.
pub fn parse_records(raw: &str, allow_text_blocks: bool) -> Vec<TestCaseRecord> {
    let cleaned = strip_reasoning(raw);
    let records = clean_and_validate(extract_candidates(&cleaned));
    if !records.is_empty() || !allow_text_blocks {
        return records;
    }

    let records = parse_text_blocks(&cleaned);
    if !records.is_empty() {
        info!(count = records.len(), "Recovered test cases from plain text");
    }
    records
}

async fn call_with_deadline(
    provider: &SharedLLMClient,
    system: &str,
    user: &str,
) -> Result<String> {
    let deadline = provider.deadline();
    timeout(deadline, provider.generate(system, user))
        .await
        .map_err(|_| {
            AppError::Timeout(format!(
                "{} gave no answer within {}ms",
                provider.name(),
                deadline.as_millis()
            ))
        })?
}
