use std::io::Write;
use std::path::PathBuf;

use chrono::Local;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use crate::application::use_cases::report::write_report;
use crate::application::use_cases::test_case_generation::GenerationRequest;
use crate::domain::error::Result;
use crate::domain::user_story::UserStory;
use crate::infrastructure::bootstrap::AppState;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::storage::{load_knowledge_base, load_prompt_template};

#[derive(Debug, Parser)]
#[command(
    name = "storycase",
    version,
    about = "Generate manual test cases from a user story"
)]
pub struct Cli {
    /// User story text; read from stdin when omitted.
    #[arg(long)]
    pub story: Option<String>,

    /// Directory holding the prompt templates.
    #[arg(long)]
    pub prompts_dir: Option<PathBuf>,

    /// Knowledge base JSON with domain context.
    #[arg(long)]
    pub knowledge_base: Option<PathBuf>,

    /// Root folder for timestamped result folders.
    #[arg(long)]
    pub results_dir: Option<PathBuf>,
}

impl Cli {
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(dir) = &self.prompts_dir {
            config.prompts_dir = dir.clone();
        }
        if let Some(path) = &self.knowledge_base {
            config.knowledge_base_path = path.clone();
        }
        if let Some(dir) = &self.results_dir {
            config.results_dir = dir.clone();
        }
    }

    pub async fn read_story(&self) -> Result<UserStory> {
        if let Some(story) = &self.story {
            return UserStory::parse(story);
        }

        print!("Enter your user story: ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        BufReader::new(tokio::io::stdin()).read_line(&mut line).await?;
        UserStory::parse(&line)
    }
}

/// Analyse, generate and write the report. An empty result is still a
/// successful run.
pub async fn generate_command(state: &AppState, story: &UserStory) -> Result<PathBuf> {
    info!("Analysing user story");
    let analysis = state.analysis.execute(story).await;
    info!(analysis = %analysis.text, "Analysis output");

    let config = &state.config;
    let domain_context = load_knowledge_base(&config.knowledge_base_path);
    let template = load_prompt_template(&config.prompts_dir);

    let report = state
        .generation
        .execute(GenerationRequest {
            story,
            analysis: &analysis.text,
            domain_context: domain_context.as_deref(),
            template: template.as_deref(),
        })
        .await;

    let path = write_report(
        &config.results_dir,
        story.as_str(),
        &analysis.text,
        &report.records,
        Local::now(),
    )?;
    info!(
        path = %path.display(),
        count = report.records.len(),
        source = report.source.as_deref().unwrap_or("none"),
        "Test cases saved"
    );
    Ok(path)
}
