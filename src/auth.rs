use tracing::debug;

use crate::config::AuthConfig;
use crate::error::{PilotError, Result};

/// Try to run a CLI command and capture stdout as a token
fn try_cli_token(command: &str) -> Option<String> {
    let output = std::process::Command::new("sh")
        .args(["-c", command])
        .output()
        .ok()?;

    if output.status.success() {
        let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if !token.is_empty() {
            return Some(token);
        }
    }
    None
}

/// Resolve the GitHub token, trying in order:
/// 1. The configured environment variable
/// 2. The configured CLI command (e.g. `gh auth token`)
pub fn load_token(auth: &AuthConfig) -> Result<String> {
    if let Some(env_var) = &auth.token_env {
        if let Ok(token) = std::env::var(env_var) {
            let token = token.trim().to_string();
            if !token.is_empty() {
                debug!(source = %env_var, "using token from environment");
                return Ok(token);
            }
        }
    }

    if let Some(cmd) = &auth.token_command {
        if let Some(token) = try_cli_token(cmd) {
            debug!(command = %cmd, "using token from command");
            return Ok(token);
        }
    }

    Err(PilotError::Auth(format!(
        "No GitHub token found. Set {} or configure auth.token_command.",
        auth.token_env.as_deref().unwrap_or("a token env var")
    )))
}
