use anyhow::{Context, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::config::settings::SourceSettings;
use crate::rate_limiter::RateLimiter;

/// Rate limited client for the schedule feed
pub struct RateLimitedClient {
    client: Client,
    rate_limiter: RateLimiter,
}

impl RateLimitedClient {
    pub fn new(user_agent: &str, timeout_secs: u64, rate_limit_ms: u64) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            rate_limiter: RateLimiter::new(rate_limit_ms),
        })
    }

    pub fn from_settings(settings: &SourceSettings) -> Result<Self> {
        Self::new(&settings.user_agent, settings.timeout_secs, settings.rate_limit_ms)
    }

    /// GET `url` and return the body, failing on non-2xx statuses
    pub async fn get_text(&mut self, url: &str) -> Result<String> {
        self.rate_limiter.wait().await;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to send GET request to {}", url))?;

        if !response.status().is_success() {
            anyhow::bail!("HTTP error {} from {}", response.status(), url);
        }

        response
            .text()
            .await
            .with_context(|| format!("Failed to read response body from {}", url))
    }

    pub async fn get_json<T: DeserializeOwned>(&mut self, url: &str) -> Result<T> {
        let text = self.get_text(url).await?;
        serde_json::from_str(&text).with_context(|| format!("Failed to parse JSON from {}", url))
    }
}
