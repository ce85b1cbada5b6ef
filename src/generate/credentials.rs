//! @acp:module "Credentials"
//! @acp:summary "Locate the completion service API key"
//! @acp:domain cli
//! @acp:layer config
//!
//! Lookup order: the environment variable named in the generator config,
//! then `<config_dir>/stratnav/secrets.json` shaped like
//! `{"openai": {"api_key": "..."}}`.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::config::GeneratorConfig;
use crate::error::{Result, StrategyError};

#[derive(Debug, Deserialize)]
struct SecretsFile {
    openai: Option<OpenAiSecrets>,
}

#[derive(Debug, Deserialize)]
struct OpenAiSecrets {
    api_key: Option<String>,
}

/// Default location of the secrets file
pub fn secrets_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("stratnav").join("secrets.json"))
}

/// Resolve the API key or fail with a configuration error
pub fn resolve_api_key(config: &GeneratorConfig) -> Result<String> {
    let from_env = std::env::var(&config.api_key_env).ok();
    resolve_from(from_env, secrets_path().as_deref(), &config.api_key_env)
}

pub(crate) fn resolve_from(
    from_env: Option<String>,
    secrets: Option<&Path>,
    env_name: &str,
) -> Result<String> {
    if let Some(key) = from_env.filter(|k| !k.trim().is_empty()) {
        tracing::debug!("Using API key from ${}", env_name);
        return Ok(key.trim().to_string());
    }

    if let Some(path) = secrets.filter(|p| p.exists()) {
        let content = std::fs::read_to_string(path)?;
        let parsed: SecretsFile = serde_json::from_str(&content).map_err(|e| {
            StrategyError::Configuration(format!("invalid secrets file {}: {}", path.display(), e))
        })?;
        if let Some(key) = parsed
            .openai
            .and_then(|o| o.api_key)
            .filter(|k| !k.trim().is_empty())
        {
            tracing::debug!("Using API key from {}", path.display());
            return Ok(key.trim().to_string());
        }
    }

    let hint = secrets
        .map(|p| format!(" or add it to {}", p.display()))
        .unwrap_or_default();
    Err(StrategyError::Configuration(format!(
        "API key not found. Set ${}{}",
        env_name, hint
    )))
}
