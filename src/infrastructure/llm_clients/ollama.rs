use std::process::Stdio;
use std::time::Duration;

use super::LLMClient;
use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::{LLMConfig, LLMProvider};
use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, warn};

const DEFAULT_RUNNER: &str = "ollama";

/// Runs a local model as a child process: prompt on stdin, answer on stdout.
///
/// `config.command` names the runner executable (`ollama` when unset); the
/// default invocation is `<runner> run <model>`.
pub struct OllamaCliClient {
    program: String,
    args: Vec<String>,
    config: LLMConfig,
}

impl OllamaCliClient {
    pub fn new(config: LLMConfig) -> Self {
        Self {
            program: config
                .command
                .clone()
                .unwrap_or_else(|| DEFAULT_RUNNER.to_string()),
            args: vec!["run".to_string(), config.model.clone()],
            config,
        }
    }

    pub fn with_command(mut self, program: impl Into<String>, args: Vec<String>) -> Self {
        self.program = program.into();
        self.args = args;
        self
    }
}

#[async_trait]
impl LLMClient for OllamaCliClient {
    fn provider(&self) -> LLMProvider {
        LLMProvider::Local
    }

    fn deadline(&self) -> Duration {
        self.config.timeout()
    }

    async fn generate(&self, _system: &str, user: &str) -> Result<String> {
        debug!(program = %self.program, args = ?self.args, "Spawning local model");

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| AppError::LLMError(format!("Failed to start {}: {}", self.program, e)))?;

        // Feed stdin from its own task so a chatty child cannot fill the stdout
        // pipe while we are still writing.
        if let Some(mut stdin) = child.stdin.take() {
            let prompt = user.as_bytes().to_vec();
            tokio::spawn(async move {
                if let Err(err) = stdin.write_all(&prompt).await {
                    debug!(error = %err, "Local model closed stdin early");
                }
            });
        }

        let output = timeout(self.deadline(), child.wait_with_output())
            .await
            .map_err(|_| {
                AppError::Timeout(format!(
                    "{} did not finish within {}s",
                    self.program,
                    self.deadline().as_secs()
                ))
            })?
            .map_err(|e| AppError::LLMError(format!("Failed to read {} output: {}", self.program, e)))?;

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if stdout.is_empty() {
                return Err(AppError::LLMError(format!(
                    "{} exited with {}: {}",
                    self.program,
                    output.status,
                    stderr.trim()
                )));
            }
            warn!(status = %output.status, "Local model exited unsuccessfully; keeping its output");
        }

        Ok(stdout)
    }
}
