use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::domain::error::Result;
use crate::infrastructure::bootstrap::setup;
use crate::infrastructure::config::AppConfig;
use crate::interfaces::cli::{generate_command, Cli};

pub async fn run() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let cli = Cli::parse();
    match execute(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "storycase failed");
            ExitCode::FAILURE
        }
    }
}

async fn execute(cli: Cli) -> Result<()> {
    let mut config = AppConfig::load()?;
    cli.apply(&mut config);

    let story = cli.read_story().await?;
    let state = setup(config);
    generate_command(&state, &story).await?;
    Ok(())
}
