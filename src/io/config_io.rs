use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::AppConfig;

/// Environment variable naming the config file
pub const CONFIG_ENV: &str = "MLF_CONFIG";
/// Looked up in the working directory when nothing else is given
pub const DEFAULT_CONFIG_FILE: &str = "mlf.toml";

/// Error type for loading and validating configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("access_key is not set in the config")]
    MissingAccessKey,
    #[error("user/password are not configured")]
    MissingCredentials,
    #[error("limit must be a positive integer")]
    InvalidLimit,
    #[error("invalid value for {name}: {value:?}")]
    InvalidEnv { name: &'static str, value: String },
}

/// `--config` wins, then `$MLF_CONFIG`, then `./mlf.toml`
pub fn resolve_config_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    match std::env::var_os(CONFIG_ENV) {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => PathBuf::from(DEFAULT_CONFIG_FILE),
    }
}

/// Parse a config document and check the values serde cannot.
pub fn parse_config(text: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = toml::from_str(text)?;
    if config.limit == 0 {
        return Err(ConfigError::InvalidLimit);
    }
    Ok(config)
}

pub fn read_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_config(&text)
}

/// Override connection settings from `MLF_USER`, `MLF_PASSWORD`,
/// `MLF_SERVER` and `MLF_PORT`. Unset or empty variables are ignored.
pub fn apply_env_overrides(
    config: &mut AppConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<(), ConfigError> {
    let var = |name: &str| lookup(name).filter(|v| !v.is_empty());

    if let Some(user) = var("MLF_USER") {
        config.user = Some(user);
    }
    if let Some(password) = var("MLF_PASSWORD") {
        config.password = Some(password);
    }
    if let Some(server) = var("MLF_SERVER") {
        config.server = server;
    }
    if let Some(port) = var("MLF_PORT") {
        config.port = port.parse().map_err(|_| ConfigError::InvalidEnv {
            name: "MLF_PORT",
            value: port.clone(),
        })?;
    }
    Ok(())
}

/// Read the config file and layer the environment on top.
pub fn load_config(explicit: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let path = resolve_config_path(explicit);
    let mut config = read_config(&path)?;
    apply_env_overrides(&mut config, |name| std::env::var(name).ok())?;
    log::debug!("config loaded from {}", path.display());
    Ok(config)
}
