use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

const ENV_PREFIX: &str = "ACTIONSCTL";

/// Connection settings, layered as defaults < settings file < `ACTIONSCTL_*` env vars.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Settings {
    pub base_url: String,
    #[serde(default)]
    pub token: Option<String>,
    pub user_agent: String,
}

impl Settings {
    pub fn load(path: &str) -> Result<Self> {
        Self::load_with(path, Environment::with_prefix(ENV_PREFIX))
    }

    fn load_with(path: &str, env: Environment) -> Result<Self> {
        let settings = Config::builder()
            .set_default("base_url", actionsctl_github::client::DEFAULT_BASE_URL)?
            .set_default("user_agent", actionsctl_github::client::DEFAULT_USER_AGENT)?
            .add_source(File::with_name(path).required(false))
            .add_source(env)
            .build()
            .with_context(|| format!("Failed to load settings from {}", path))?;

        Ok(settings.try_deserialize()?)
    }

    /// A token given on the command line wins over the settings file.
    pub fn with_token_override(mut self, token: Option<String>) -> Self {
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            self.token = Some(token);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn no_env() -> Environment {
        Environment::with_prefix(ENV_PREFIX).source(Some(HashMap::new()))
    }

    #[test]
    fn test_defaults_without_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing");

        let settings = Settings::load_with(path.to_str().unwrap(), no_env()).unwrap();
        assert_eq!(settings.base_url, "https://api.github.com/");
        assert_eq!(settings.token, None);
        assert!(settings.user_agent.starts_with("actionsctl/"));
    }

    #[test]
    fn test_file_then_env() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("actionsctl.toml");
        std::fs::write(
            &path,
            "base_url = \"https://ghe.example.com/api/v3/\"\ntoken = \"from-file\"\n",
        )
        .unwrap();

        let mut vars = HashMap::new();
        vars.insert("ACTIONSCTL_TOKEN".to_string(), "from-env".to_string());
        let env = Environment::with_prefix(ENV_PREFIX).source(Some(vars));

        let settings = Settings::load_with(path.to_str().unwrap(), env).unwrap();
        assert_eq!(settings.base_url, "https://ghe.example.com/api/v3/");
        assert_eq!(settings.token.as_deref(), Some("from-env"));
    }

    #[test]
    fn test_token_override() {
        let settings = Settings {
            base_url: "https://api.github.com/".to_string(),
            token: Some("from-file".to_string()),
            user_agent: "ua".to_string(),
        };

        let kept = settings.clone().with_token_override(Some(String::new()));
        assert_eq!(kept.token.as_deref(), Some("from-file"));

        let replaced = settings.with_token_override(Some("from-cli".to_string()));
        assert_eq!(replaced.token.as_deref(), Some("from-cli"));
    }
}
