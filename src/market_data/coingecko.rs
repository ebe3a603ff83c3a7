//! CoinGecko REST client
//!
//! One request shape: `GET /coins/markets` in USD with 24h change and
//! sparkline data. The response is handed back raw so the proxy can relay it.

use anyhow::{Context, Result};
use reqwest::{
    header::{ACCEPT, CACHE_CONTROL},
    Client,
};
use std::time::Duration;
use tracing::debug;

use super::join_ids;

pub const COINGECKO_API_BASE: &str = "https://api.coingecko.com/api/v3";

/// Header CoinGecko reads demo-plan API keys from.
const API_KEY_HEADER: &str = "x-cg-demo-api-key";

/// Revalidation hint for caches between us and CoinGecko. The handler keeps
/// no cache of its own; freshness is left to intermediary HTTP caches.
const UPSTREAM_CACHE_CONTROL: &str = "max-age=60";

/// Status and body of an upstream reply, success or not.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: String,
}

impl UpstreamResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Clone)]
pub struct CoinGeckoClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl CoinGeckoClient {
    pub fn new(base_url: &str, api_key: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("WolvCapital/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build CoinGecko HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
        })
    }

    pub fn markets_url(&self) -> String {
        format!("{}/coins/markets", self.base_url)
    }

    /// Fetch market listings for `ids`.
    ///
    /// Non-success statuses are returned, not raised; only transport and
    /// body-read failures are errors.
    pub async fn fetch_markets(&self, ids: &[&str]) -> Result<UpstreamResponse, reqwest::Error> {
        let ids = join_ids(ids);

        let mut request = self
            .client
            .get(self.markets_url())
            .query(&[
                ("vs_currency", "usd"),
                ("ids", ids.as_str()),
                ("sparkline", "true"),
                ("price_change_percentage", "24h"),
            ])
            .header(ACCEPT, "application/json")
            .header(CACHE_CONTROL, UPSTREAM_CACHE_CONTROL);

        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        debug!(ids = %ids, status, body_len = body.len(), "coingecko markets response received");

        Ok(UpstreamResponse { status, body })
    }
}
