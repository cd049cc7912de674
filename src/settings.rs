//! Runtime settings, sourced from `ITJOBS_`-prefixed environment variables.

use anyhow::Context;
use config::{Config, Environment};
use serde::Deserialize;

const DEFAULT_BASE_URL: &str = "http://api.sandbox.itjobs.pt";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Key sent with every API request (`ITJOBS_API_KEY`). May be empty;
    /// commands that need the API reject it at client construction, so
    /// scrape-only commands still run without one.
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("ITJOBS").try_parsing(true))
            .build()?;
        config
            .try_deserialize()
            .context("invalid ITJOBS_* environment settings")
    }
}
