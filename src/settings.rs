use anyhow::{Context, Result};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use reqwest::Url;
use serde::Deserialize;

const CONFIG_FILE: &str = "limdberator";
const ENV_PREFIX: &str = "LIMDBERATOR";

pub const DEFAULT_ENDPOINT: &str = "https://schnusch.de/limdberator/";
pub const DEFAULT_LABEL: &str = "LIMDberator";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Collection endpoint records are posted to.
    pub endpoint: String,
    pub user_agent: String,
    /// Sent when fetching pages; runtime parsing only knows English and German.
    pub accept_language: String,
    pub timeout_secs: u64,
    /// Heading shown above upload notifications.
    pub label: String,
}

impl Settings {
    /// Defaults, then `limdberator.toml` if present, then `LIMDBERATOR_*` env vars.
    pub fn load() -> Result<Self> {
        let builder = Config::builder()
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX));
        Self::from_builder(builder)
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        let settings: Settings = builder
            .set_default("endpoint", DEFAULT_ENDPOINT)?
            .set_default("user_agent", concat!("limdberator/", env!("CARGO_PKG_VERSION")))?
            .set_default("accept_language", "en-US,en;q=0.8")?
            .set_default("timeout_secs", 30)?
            .set_default("label", DEFAULT_LABEL)?
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")?;
        settings.endpoint_url()?;
        Ok(settings)
    }

    pub fn endpoint_url(&self) -> Result<Url> {
        Url::parse(&self.endpoint).with_context(|| format!("Invalid endpoint URL: {}", self.endpoint))
    }
}
