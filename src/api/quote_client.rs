//! HTTP client for the market data provider's quote endpoint.

use std::time::Duration;

use anyhow::{Context, Result};
use backoff::ExponentialBackoff;
use reqwest::Client;
use tracing::{debug, warn};

use super::types::Quote;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// How long transient fetch failures are retried before giving up.
const RETRY_BUDGET: Duration = Duration::from_secs(20);

/// Client for the quote API (read-only operations).
///
/// Quote freshness is the provider's responsibility; this client reports
/// whatever the endpoint returns as the live price.
pub struct QuoteClient {
    client: Client,
    base_url: String,
}

impl QuoteClient {
    /// Create a client from the `QUOTE_API_URL` environment variable.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("QUOTE_API_URL")
            .context("QUOTE_API_URL not set (required for live quotes)")?;
        Self::with_base_url(base_url)
    }

    /// Create with an explicit base URL (for testing).
    pub fn with_base_url(base_url: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, base_url })
    }

    /// Fetch the latest quote for a symbol, retrying transient failures
    /// with exponential backoff.
    pub async fn get_quote(&self, symbol: &str) -> Result<Quote> {
        let policy = ExponentialBackoff {
            max_elapsed_time: Some(RETRY_BUDGET),
            ..Default::default()
        };

        backoff::future::retry(policy, || async {
            self.fetch_quote(symbol).await.map_err(|e| {
                warn!(symbol = %symbol, error = %e, "Quote fetch failed, retrying");
                backoff::Error::transient(e)
            })
        })
        .await
    }

    async fn fetch_quote(&self, symbol: &str) -> Result<Quote> {
        let url = format!("{}/quote?symbol={}", self.base_url, symbol);

        debug!(url = %url, "Fetching quote");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to fetch quote")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Quote request failed: {} - {}", status, body);
        }

        response.json().await.context("Failed to parse quote response")
    }
}
