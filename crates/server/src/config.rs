use std::{collections::HashMap, fmt, fs, io};

use catalog_client::DEFAULT_API_VERSION;
use thiserror::Error;

pub const SETTINGS_FILE: &str = "server.toml";

pub struct Settings {
    pub server_bind: String,
    pub shopify_domain: String,
    pub shopify_access_token: String,
    pub shopify_api_version: String,
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("server_bind", &self.server_bind)
            .field("shopify_domain", &self.shopify_domain)
            .field("shopify_access_token", &"<redacted>")
            .field("shopify_api_version", &self.shopify_api_version)
            .finish()
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required configuration value {0}; set it in the environment or server.toml")]
    Missing(&'static str),
    #[error("failed to read server.toml: {0}")]
    Read(#[source] io::Error),
    #[error("failed to parse server.toml: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Defaults, then `server.toml`, then the process environment. The shop
/// domain and access token have no defaults.
pub fn load_settings() -> Result<Settings, ConfigError> {
    let file = match fs::read_to_string(SETTINGS_FILE) {
        Ok(raw) => Some(raw),
        Err(err) if err.kind() == io::ErrorKind::NotFound => None,
        Err(err) => return Err(ConfigError::Read(err)),
    };
    load_settings_from(file.as_deref(), |key| std::env::var(key).ok())
}

pub fn load_settings_from(
    file: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<Settings, ConfigError> {
    let file_cfg = match file {
        Some(raw) => toml::from_str::<HashMap<String, String>>(raw).map_err(ConfigError::Parse)?,
        None => HashMap::new(),
    };
    let lookup = |file_key: &str, env_keys: &[&str]| -> Option<String> {
        env_keys
            .iter()
            .rev()
            .find_map(|key| env(key))
            .or_else(|| file_cfg.get(file_key).cloned())
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    };

    let server_bind = lookup("bind_addr", &["SERVER_BIND", "APP__BIND_ADDR"])
        .unwrap_or_else(|| "127.0.0.1:3000".into());
    let shopify_domain = lookup("shopify_domain", &["SHOPIFY_DOMAIN", "APP__SHOPIFY_DOMAIN"])
        .ok_or(ConfigError::Missing("SHOPIFY_DOMAIN"))?;
    let shopify_access_token = lookup(
        "shopify_access_token",
        &["SHOPIFY_ACCESS_TOKEN", "APP__SHOPIFY_ACCESS_TOKEN"],
    )
    .ok_or(ConfigError::Missing("SHOPIFY_ACCESS_TOKEN"))?;
    let shopify_api_version = lookup("shopify_api_version", &["SHOPIFY_API_VERSION"])
        .unwrap_or_else(|| DEFAULT_API_VERSION.into());

    Ok(Settings {
        server_bind,
        shopify_domain,
        shopify_access_token,
        shopify_api_version,
    })
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
