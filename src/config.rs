use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub bind: SocketAddr,
    pub user_agent: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RetryConfig {
    /// Retries after the first attempt. `0` disables retrying.
    pub max_retries: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
    /// Fraction of the computed delay used as a random +/- offset.
    pub jitter: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    pub base_url: String,
    pub api_key: String,
    pub country: String,
    pub page_size: u32,
    pub timeout_ms: u64,
    pub max_body_bytes: usize,
    pub retry: RetryConfig,
}

impl ProviderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub level: String,
    pub api: ApiConfig,
    pub provider: ProviderConfig,
}

impl Config {
    /// Built-in values for every setting, before any file or environment source.
    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        config::Config::builder()
            .set_default("level", "info")?
            .set_default("api.bind", "0.0.0.0:8080")?
            .set_default("api.user_agent", concat!("headlines-api/", env!("CARGO_PKG_VERSION")))?
            .set_default("provider.base_url", "https://newsapi.org/v2/top-headlines")?
            .set_default("provider.api_key", "")?
            .set_default("provider.country", "us")?
            .set_default("provider.page_size", 20)?
            .set_default("provider.timeout_ms", 15_000)?
            .set_default("provider.max_body_bytes", 10 * 1024 * 1024)?
            .set_default("provider.retry.max_retries", 3)?
            .set_default("provider.retry.base_delay_ms", 2_000)?
            .set_default("provider.retry.max_delay_ms", 30_000)?
            .set_default("provider.retry.jitter", 0.5)
    }

    pub fn load() -> Result<Self, ConfigError> {
        let environment = env::var("RUN_ENV").unwrap_or_else(|_| "development".into());

        let config_file = match environment.as_str() {
            "production" => "prod",
            _ => "dev",
        };

        let s = Self::defaults()?
            .add_source(File::with_name("config/default.yaml").required(false))
            .add_source(File::with_name(&format!("config/{}.yaml", config_file)).required(false))
            .add_source(File::with_name("config/local.yaml").required(false))
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
