//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use crate::config::schema::{ProxyConfig, Secret};
use crate::config::validation::{validate_config, ValidationError};

/// Primary environment variable holding the upstream token.
pub const TOKEN_ENV: &str = "GH_PROXY_TOKEN";
/// Fallback token variable, commonly already present in CI and dev shells.
pub const FALLBACK_TOKEN_ENV: &str = "GITHUB_TOKEN";
/// Overrides `listener.bind_address`.
pub const BIND_ENV: &str = "GH_PROXY_BIND";

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load, apply environment overrides to, and validate a TOML file.
pub fn load_config(path: &Path) -> Result<ProxyConfig, ConfigError> {
    finish(read_file(path)?, |key| std::env::var(key).ok())
}

/// Build a configuration from defaults plus environment overrides.
pub fn load_from_env() -> Result<ProxyConfig, ConfigError> {
    finish(ProxyConfig::default(), |key| std::env::var(key).ok())
}

fn read_file(path: &Path) -> Result<ProxyConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

fn finish<F>(mut config: ProxyConfig, env: F) -> Result<ProxyConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    apply_env_overrides(&mut config, env);
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Apply environment overrides. `env` is injected so tests never touch process state.
pub fn apply_env_overrides<F>(config: &mut ProxyConfig, env: F)
where
    F: Fn(&str) -> Option<String>,
{
    let token = env(TOKEN_ENV)
        .filter(|v| !v.trim().is_empty())
        .or_else(|| env(FALLBACK_TOKEN_ENV).filter(|v| !v.trim().is_empty()));
    if let Some(token) = token {
        config.upstream.token = Secret::new(token);
    }

    if let Some(bind) = env(BIND_ENV).filter(|v| !v.is_empty()) {
        config.listener.bind_address = bind;
    }
}
