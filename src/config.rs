use anyhow::{anyhow, Result};
use serde_derive::Deserialize;

/// Production base URL of the RYM Pro customer portal.
pub const DEFAULT_BASE_URL: &str = "https://eu-customerportal-api.harmonyencoremdm.com";

fn default_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_device_id() -> String {
    "rympro-rs".to_string()
}

#[derive(Deserialize, Debug, Clone)]
pub struct RymProConfig {
    #[serde(default = "default_url")]
    pub url: String,
    pub username: String,
    pub password: String,
    #[serde(default = "default_device_id")]
    pub device_id: String,
}

pub fn load_config() -> Result<RymProConfig> {
    match envy::prefixed("RYMPRO_").from_env::<RymProConfig>() {
        Ok(config) => Ok(config),
        Err(err) => Err(anyhow!("Failed to load RymProConfig: {}", err)),
    }
}
