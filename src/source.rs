use std::path::PathBuf;

use async_trait::async_trait;

use crate::config::Config;
use crate::error::Result;
use crate::types::PullRequestRecord;

/// Something that can list open pull requests for a set of repositories.
///
/// Every call returns an independent snapshot.
#[async_trait]
pub trait PullRequestSource: Send + Sync {
    async fn fetch_open_pull_requests(&self, repos: &[String]) -> Result<Vec<PullRequestRecord>>;
}

/// Resolves the repositories to watch. Called once per refresh cycle.
pub trait RepoResolver: Send + Sync {
    fn resolve_repos(&self) -> Result<Vec<String>>;
}

/// Re-reads the config file on every resolution so edits apply on the next refresh
#[derive(Debug, Clone)]
pub struct ConfigFile {
    path: PathBuf,
}

impl ConfigFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl RepoResolver for ConfigFile {
    fn resolve_repos(&self) -> Result<Vec<String>> {
        Ok(Config::load(&self.path)?.repos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PilotError;

    #[test]
    fn config_file_reloads_on_each_call() {
        let path = std::env::temp_dir().join(format!("pr-pilot-resolver-{}.toml", std::process::id()));
        std::fs::write(&path, r#"repos = ["a/one"]"#).unwrap();
        let resolver = ConfigFile::new(path.clone());
        assert_eq!(resolver.resolve_repos().unwrap(), vec!["a/one"]);

        std::fs::write(&path, r#"repos = ["a/one", "b/two"]"#).unwrap();
        assert_eq!(resolver.resolve_repos().unwrap(), vec!["a/one", "b/two"]);

        std::fs::remove_file(&path).unwrap();
        assert!(matches!(resolver.resolve_repos(), Err(PilotError::Config(_))));
    }
}
