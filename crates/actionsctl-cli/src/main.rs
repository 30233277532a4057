use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod settings;

use cli::Cli;
use settings::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize tracing
    let default_filter = if cli.verbose {
        "actionsctl_cli=debug,actionsctl_github=debug"
    } else {
        "actionsctl_cli=info,actionsctl_github=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    run(cli).await
}

async fn run(cli: Cli) -> Result<()> {
    let settings = Settings::load(&cli.config)?.with_token_override(cli.github_token.clone());

    if settings.token.is_none() {
        tracing::warn!("No GitHub token configured, requests will be anonymous");
    }

    let mut builder = actionsctl_github::GitHubClient::builder()
        .base_url(settings.base_url)
        .user_agent(settings.user_agent);
    if let Some(token) = settings.token {
        builder = builder.token(token);
    }
    let client = builder.build()?;

    // Execute command
    commands::execute(cli.command, &client).await
}
