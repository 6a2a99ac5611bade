use std::env;
use std::path::PathBuf;

use crate::error::{AppError, Result};

pub const DEFAULT_LISTINGS_URL: &str =
    "https://pro-api.coinmarketcap.com/v1/cryptocurrency/listings/latest";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_PROXY_URL: &str = "http://127.0.0.1:3000/api";
pub const DEFAULT_ICONS_DIR: &str = "assets/icons";

/// Runtime configuration sourced from the process environment.
///
/// The API key stays on the `serve` side only; the dashboard never sees it
/// and talks to the proxy instead.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub listings_url: String,
    pub bind_addr: String,
    pub proxy_url: String,
    pub icons_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let api_key = env::var("CMC_API_KEY")
            .or_else(|_| env::var("API_KEY"))
            .ok()
            .filter(|key| !key.trim().is_empty());

        Self {
            api_key,
            listings_url: env_or("CMC_LISTINGS_URL", DEFAULT_LISTINGS_URL),
            bind_addr: env_or("PROXY_BIND", DEFAULT_BIND_ADDR),
            proxy_url: env_or("PROXY_URL", DEFAULT_PROXY_URL),
            icons_dir: PathBuf::from(env_or("ICONS_DIR", DEFAULT_ICONS_DIR)),
        }
    }

    /// Fail fast at startup instead of letting every proxied request come
    /// back as an upstream authorization error.
    pub fn require_api_key(&self) -> Result<()> {
        match &self.api_key {
            Some(_) => Ok(()),
            None => Err(AppError::message(
                "CMC_API_KEY is not set; the proxy cannot authenticate against CoinMarketCap",
            )),
        }
    }
}

fn env_or(name: &str, default: &str) -> String {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => default.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_without_key() -> AppConfig {
        AppConfig {
            api_key: None,
            listings_url: DEFAULT_LISTINGS_URL.to_string(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            proxy_url: DEFAULT_PROXY_URL.to_string(),
            icons_dir: PathBuf::from(DEFAULT_ICONS_DIR),
        }
    }

    #[test]
    fn missing_api_key_is_rejected_at_startup() {
        let config = config_without_key();
        let err = config.require_api_key().unwrap_err();
        assert!(err.to_string().contains("CMC_API_KEY"));
    }

    #[test]
    fn present_api_key_passes_validation() {
        let mut config = config_without_key();
        config.api_key = Some("test-key".to_string());
        assert!(config.require_api_key().is_ok());
    }
}
