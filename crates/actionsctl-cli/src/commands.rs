use anyhow::Result;
use serde::Serialize;

use crate::cli::Commands;
use actionsctl_github::{
    CreateWorkflowDispatchEventRequest, GitHubClient, ListOptions, Response, ResponseMeta,
};

pub async fn execute(command: Commands, client: &GitHubClient) -> Result<()> {
    match command {
        Commands::List {
            repo,
            page,
            per_page,
        } => {
            let opts = ListOptions { page, per_page };
            let response = client
                .list_workflows(&repo.owner, &repo.name, &opts)
                .await?;

            log_meta(&response.meta);
            if let Some(next) = response.meta.next_page {
                tracing::info!("More workflows available, use --page {}", next);
            }
            print_json(&response.data)?;
        }

        Commands::Get { repo, workflow } => {
            let response = client
                .get_workflow(&repo.owner, &repo.name, &workflow)
                .await?;
            print_response(response)?;
        }

        Commands::Usage { repo, workflow } => {
            let response = client
                .get_workflow_usage(&repo.owner, &repo.name, &workflow)
                .await?;
            print_response(response)?;
        }

        Commands::Dispatch {
            repo,
            workflow,
            git_ref,
            inputs,
        } => {
            let event = inputs
                .into_iter()
                .fold(CreateWorkflowDispatchEventRequest::new(git_ref), |event, (k, v)| {
                    event.with_input(k, v)
                });

            let response = client
                .create_workflow_dispatch_event(&repo.owner, &repo.name, &workflow, &event)
                .await?;
            log_meta(&response.meta);

            println!("✓ Dispatched {} on {} ({})", workflow, event.ref_, repo);
            println!("  Runs: {}", repo.actions_url());
        }

        Commands::Enable { repo, workflow } => {
            let response = client
                .enable_workflow(&repo.owner, &repo.name, &workflow)
                .await?;
            log_meta(&response.meta);

            println!("✓ Enabled {} in {}", workflow, repo);
        }

        Commands::Disable { repo, workflow } => {
            let response = client
                .disable_workflow(&repo.owner, &repo.name, &workflow)
                .await?;
            log_meta(&response.meta);

            println!("✓ Disabled {} in {}", workflow, repo);
        }
    }

    Ok(())
}

fn log_meta(meta: &ResponseMeta) {
    match &meta.rate {
        Some(rate) => tracing::debug!(
            "HTTP {} (rate limit {}/{} remaining, resets {})",
            meta.status,
            rate.remaining,
            rate.limit,
            rate.reset
        ),
        None => tracing::debug!("HTTP {}", meta.status),
    }
}

fn print_response<T: Serialize>(response: Response<T>) -> Result<()> {
    log_meta(&response.meta);
    print_json(&response.data)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
