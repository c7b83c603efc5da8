use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{PilotError, Result};

/// Environment variable that overrides the config file location
pub const CONFIG_ENV: &str = "PR_PILOT_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_token_env")]
    pub token_env: Option<String>,
    #[serde(default = "default_token_command")]
    pub token_command: Option<String>,
}

fn default_token_env() -> Option<String> {
    Some("GITHUB_TOKEN".to_string())
}

fn default_token_command() -> Option<String> {
    Some("gh auth token".to_string())
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_env: default_token_env(),
            token_command: default_token_command(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Repositories to watch, as `owner/name`
    #[serde(default)]
    pub repos: Vec<String>,
    #[serde(default)]
    pub auth: AuthConfig,
}

/// Default location: ~/.config/pr-pilot/config.toml (Linux)
pub fn default_config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        if !path.is_empty() {
            return Some(PathBuf::from(path));
        }
    }
    let config_dir = dirs::config_dir()?;
    Some(config_dir.join("pr-pilot").join("config.toml"))
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            PilotError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(content).map_err(|e| PilotError::Config(e.to_string()))?;
        for repo in &config.repos {
            validate_repo(repo)?;
        }
        Ok(config)
    }
}

/// A repository must be `owner/name` with both halves present
fn validate_repo(repo: &str) -> Result<()> {
    match repo.split_once('/') {
        Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
            Ok(())
        }
        _ => Err(PilotError::Config(format!(
            "invalid repository '{}', expected owner/name",
            repo
        ))),
    }
}
