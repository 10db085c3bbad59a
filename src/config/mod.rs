mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Environment variable holding the TMDb API key
pub const API_KEY_ENV: &str = "TMDB_API_KEY";

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    apply_env_overrides(&mut config);
    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    // A missing .env file is the common case
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!("Loaded environment from {:?}", path);
    }

    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = [
        "./config.toml",
        "./masxflix.toml",
        "~/.config/masxflix/config.toml",
        "/etc/masxflix/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    let mut config = Config::default();
    apply_env_overrides(&mut config);
    validate_config(&config)?;
    Ok(config)
}

/// Fill in values that may come from the process environment.
///
/// `TMDB_API_KEY` wins over the file so deployments can keep the key out of
/// the config.
pub fn apply_env_overrides(config: &mut Config) {
    if let Ok(key) = std::env::var(API_KEY_ENV) {
        if !key.trim().is_empty() {
            config.tmdb.api_key = Some(key);
        }
    }
}

/// Validate configuration
fn validate_config(config: &Config) -> Result<()> {
    if config.server.port == 0 {
        anyhow::bail!("Server port cannot be 0");
    }

    if config.tmdb.base_url.trim().is_empty() {
        anyhow::bail!("TMDb base URL cannot be empty");
    }

    let auth = &config.server.auth;
    if auth.enforce && auth.api_key.as_deref().map_or(true, str::is_empty) {
        anyhow::bail!("Route protection is enforced but no auth api_key is set");
    }

    for pattern in &auth.public_routes {
        regex::Regex::new(&format!("^(?:{pattern})$"))
            .with_context(|| format!("Invalid public route pattern: {pattern}"))?;
    }

    if config.tmdb.api_key.is_none() {
        tracing::warn!(
            "No TMDb API key configured; set {} or [tmdb] api_key",
            API_KEY_ENV
        );
    }

    Ok(())
}
