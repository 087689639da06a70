use std::sync::Arc;

use anyhow::Context as _;

use crate::config::Config;
use crate::headlines::HeadlinesFetcher;

pub struct Global {
    pub config: Config,
    pub fetcher: HeadlinesFetcher,
    pub started_at: std::time::Instant,
}

impl Global {
    pub fn init(config: Config) -> anyhow::Result<Arc<Self>> {
        if config.provider.api_key.is_empty() {
            tracing::warn!("provider.api_key is not set, upstream requests will be rejected");
        }

        let http_client = reqwest::Client::builder()
            .user_agent(&config.api.user_agent)
            .build()
            .context("http client")?;

        let fetcher = HeadlinesFetcher::new(http_client, &config.provider);

        tracing::info!(
            base_url = %config.provider.base_url,
            timeout_ms = config.provider.timeout_ms,
            max_retries = config.provider.retry.max_retries,
            "headlines fetcher ready"
        );

        Ok(Arc::new(Self {
            config,
            fetcher,
            started_at: std::time::Instant::now(),
        }))
    }
}
