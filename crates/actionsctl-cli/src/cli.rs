use actionsctl_github::{Repository, WorkflowId};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "actionsctl")]
#[command(about = "Inspect and drive GitHub Actions workflows", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// GitHub token (overrides the config file)
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Path to a settings file
    #[arg(long, default_value = "actionsctl")]
    pub config: String,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List workflows in a repository
    List {
        /// Repository as owner/name
        repo: Repository,

        /// Page number
        #[arg(long)]
        page: Option<u32>,

        /// Results per page
        #[arg(long)]
        per_page: Option<u32>,
    },

    /// Show one workflow
    Get {
        /// Repository as owner/name
        repo: Repository,

        /// Workflow ID or file name
        #[arg(value_parser = parse_workflow)]
        workflow: WorkflowId,
    },

    /// Show billable usage for a workflow
    Usage {
        /// Repository as owner/name
        repo: Repository,

        /// Workflow ID or file name
        #[arg(value_parser = parse_workflow)]
        workflow: WorkflowId,
    },

    /// Trigger a workflow_dispatch run
    Dispatch {
        /// Repository as owner/name
        repo: Repository,

        /// Workflow ID or file name
        #[arg(value_parser = parse_workflow)]
        workflow: WorkflowId,

        /// Git ref (branch, tag or SHA) to run on
        #[arg(long = "ref")]
        git_ref: String,

        /// Workflow input as key=value; the value is read as JSON when it parses
        #[arg(short, long = "input", value_parser = parse_input)]
        inputs: Vec<(String, serde_json::Value)>,
    },

    /// Enable a disabled workflow
    Enable {
        /// Repository as owner/name
        repo: Repository,

        /// Workflow ID or file name
        #[arg(value_parser = parse_workflow)]
        workflow: WorkflowId,
    },

    /// Disable a workflow
    Disable {
        /// Repository as owner/name
        repo: Repository,

        /// Workflow ID or file name
        #[arg(value_parser = parse_workflow)]
        workflow: WorkflowId,
    },
}

fn parse_workflow(raw: &str) -> Result<WorkflowId, String> {
    if raw.trim().is_empty() {
        return Err("workflow must not be empty".to_string());
    }
    Ok(WorkflowId::parse(raw))
}

fn parse_input(raw: &str) -> Result<(String, serde_json::Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", raw))?;
    if key.is_empty() {
        return Err(format!("input key must not be empty in '{}'", raw));
    }

    let value = serde_json::from_str(value)
        .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_input() {
        assert_eq!(
            parse_input("env=production").unwrap(),
            ("env".to_string(), json!("production"))
        );
        assert_eq!(parse_input("retries=3").unwrap(), ("retries".to_string(), json!(3)));
        assert_eq!(
            parse_input("debug=true").unwrap(),
            ("debug".to_string(), json!(true))
        );
        assert!(parse_input("novalue").is_err());
        assert!(parse_input("=x").is_err());
    }

    #[test]
    fn test_parse_dispatch_command() {
        let cli = Cli::try_parse_from([
            "actionsctl",
            "--github-token",
            "t",
            "dispatch",
            "octo/hello",
            "main.yml",
            "--ref",
            "d4cfb6e7",
            "-i",
            "key=value",
        ])
        .unwrap();

        match cli.command {
            Commands::Dispatch {
                repo,
                workflow,
                git_ref,
                inputs,
            } => {
                assert_eq!(repo, Repository::new("octo", "hello"));
                assert_eq!(workflow, WorkflowId::FileName("main.yml".to_string()));
                assert_eq!(git_ref, "d4cfb6e7");
                assert_eq!(inputs, vec![("key".to_string(), json!("value"))]);
            }
            _ => panic!("expected dispatch"),
        }
    }

    #[test]
    fn test_numeric_workflow_is_an_id() {
        let cli = Cli::try_parse_from(["actionsctl", "enable", "octo/hello", "72844"]).unwrap();
        match cli.command {
            Commands::Enable { workflow, .. } => assert_eq!(workflow, WorkflowId::Id(72844)),
            _ => panic!("expected enable"),
        }
    }

    #[test]
    fn test_rejects_malformed_repository() {
        assert!(Cli::try_parse_from(["actionsctl", "list", "not-a-repo"]).is_err());
    }
}
