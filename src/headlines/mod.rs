//! Upstream headlines client.
//!
//! Every fetch resolves to a [`HeadlinesResponse`]. Transient failures are
//! retried according to the configured [`RetryPolicy`]; anything still failing
//! afterwards is replaced with the sample articles from [`fallback`].

use std::time::Duration;

use crate::config::ProviderConfig;
use crate::types::{HeadlinesRequest, HeadlinesResponse};

pub mod error;
pub mod fallback;
pub mod retry;


pub use error::FetchError;
pub use retry::RetryPolicy;

#[derive(Debug, Clone)]
pub struct HeadlinesFetcher {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    country: String,
    page_size: u32,
    timeout: Duration,
    max_body_bytes: usize,
    retry: RetryPolicy,
}

impl HeadlinesFetcher {
    pub fn new(client: reqwest::Client, config: &ProviderConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            country: config.country.clone(),
            page_size: config.page_size,
            timeout: config.timeout(),
            max_body_bytes: config.max_body_bytes,
            retry: RetryPolicy::from(&config.retry),
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub async fn fetch_top_headlines(&self) -> HeadlinesResponse {
        self.fetch(&HeadlinesRequest::top()).await
    }

    pub async fn fetch_headlines_by_category(&self, topic: &str) -> HeadlinesResponse {
        self.fetch(&HeadlinesRequest::category(topic)).await
    }

    #[tracing::instrument(skip(self), fields(topic = request.topic.as_deref().unwrap_or(fallback::ALL_NEWS)))]
    pub async fn fetch(&self, request: &HeadlinesRequest) -> HeadlinesResponse {
        match self.fetch_with_retry(request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(error = %e, "failed to fetch headlines, using fallback data");
                fallback::fallback_response(request.topic.as_deref().unwrap_or(fallback::ALL_NEWS))
            }
        }
    }

    async fn fetch_with_retry(&self, request: &HeadlinesRequest) -> Result<HeadlinesResponse, FetchError> {
        let mut retry = 0;

        loop {
            match self.fetch_once(request).await {
                Ok(response) => return Ok(response),
                Err(e) if e.is_retryable() && retry < self.retry.max_retries => {
                    let delay = self.retry.delay_for(retry);
                    retry += 1;
                    tracing::warn!(
                        error = %e,
                        retry,
                        max_retries = self.retry.max_retries,
                        delay = ?delay,
                        "headlines request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn fetch_once(&self, request: &HeadlinesRequest) -> Result<HeadlinesResponse, FetchError> {
        tracing::info!(url = %self.base_url, "fetching headlines");

        let mut resp = self
            .client
            .get(&self.base_url)
            .query(&self.query(request))
            .timeout(self.timeout)
            .send()
            .await?
            .error_for_status()?;

        if resp
            .content_length()
            .is_some_and(|len| len > self.max_body_bytes as u64)
        {
            return Err(FetchError::BodyTooLarge {
                limit: self.max_body_bytes,
            });
        }

        let mut body = Vec::new();
        while let Some(chunk) = resp.chunk().await? {
            if body.len() + chunk.len() > self.max_body_bytes {
                return Err(FetchError::BodyTooLarge {
                    limit: self.max_body_bytes,
                });
            }
            body.extend_from_slice(&chunk);
        }

        let response: HeadlinesResponse = serde_json::from_slice(&body)?;

        tracing::debug!(
            status = ?response.status,
            total_results = response.total_results,
            articles = response.articles.len(),
            "fetched headlines"
        );

        Ok(response)
    }

    fn query(&self, request: &HeadlinesRequest) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("apiKey", self.api_key.clone()),
            ("country", self.country.clone()),
        ];

        if let Some(topic) = &request.topic {
            params.push(("category", topic.clone()));
        }

        params.push(("pageSize", self.page_size.to_string()));
        params
    }
}
