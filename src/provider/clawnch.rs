use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use log::{debug, info};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::error::{Error, Result};
use crate::models::token::{
    MarketData, NetworkStats, SentimentMetrics, TokenInfo, TrackedToken, Transaction,
};
use crate::provider::DataProvider;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
// Token metadata barely changes; everything else is fetched fresh each cycle.
const INFO_CACHE_TTL: Duration = Duration::from_secs(300);

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    success: bool,
    data: Option<T>,
    error: Option<String>,
}

#[derive(Debug)]
struct Cache<T> {
    data: Mutex<HashMap<String, (T, Instant)>>,
    ttl: Duration,
}

impl<T: Clone> Cache<T> {
    fn new(ttl: Duration) -> Self {
        Self {
            data: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    async fn get(&self, key: &str) -> Option<T> {
        let data = self.data.lock().await;
        if let Some((value, timestamp)) = data.get(key) {
            if timestamp.elapsed() < self.ttl {
                return Some(value.clone());
            }
        }
        None
    }

    async fn set(&self, key: String, value: T) {
        let mut data = self.data.lock().await;
        data.insert(key, (value, Instant::now()));
    }
}

/// Client for the Clawnch token data service. One GET route per capability;
/// any transport, status or decode problem maps to `ProviderUnavailable` so
/// the refresh loop can carry on with the previous data.
pub struct ClawnchProvider {
    client: Client,
    base_url: String,
    info_cache: Cache<TokenInfo>,
}

impl ClawnchProvider {
    pub fn new(endpoint: impl Into<String>) -> Self {
        let base_url = endpoint.into().trim_end_matches('/').to_string();
        info!("Using Clawnch data service at {}", base_url);

        Self {
            client: Client::new(),
            base_url,
            info_cache: Cache::new(INFO_CACHE_TTL),
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, path: &str, params: &[(&str, &str)]) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .query(params)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| Error::ProviderUnavailable(format!("{}: {}", url, e)))?;

        match response.status() {
            status if status.is_success() => {
                let body: ApiResponse<T> = response.json().await.map_err(|e| {
                    Error::ProviderUnavailable(format!("invalid response from {}: {}", url, e))
                })?;

                if !body.success {
                    return Err(Error::ProviderUnavailable(
                        body.error
                            .unwrap_or_else(|| format!("{} reported failure", url)),
                    ));
                }

                body.data
                    .ok_or_else(|| Error::ProviderUnavailable(format!("{} returned no data", url)))
            }
            StatusCode::SERVICE_UNAVAILABLE => Err(Error::ProviderUnavailable(format!(
                "{} is under maintenance",
                url
            ))),
            status => Err(Error::ProviderUnavailable(format!(
                "{} failed with status {}",
                url, status
            ))),
        }
    }
}

#[async_trait]
impl DataProvider for ClawnchProvider {
    async fn list_tracked_tokens(&self) -> Result<Vec<TrackedToken>> {
        self.fetch("/api/tokens", &[]).await
    }

    async fn get_token_info(&self, address: &str) -> Result<TokenInfo> {
        if let Some(cached) = self.info_cache.get(address).await {
            debug!("Using cached token info for {}", address);
            return Ok(cached);
        }

        let info: TokenInfo = self
            .fetch("/api/token-info", &[("address", address)])
            .await?;
        self.info_cache.set(address.to_string(), info.clone()).await;

        Ok(info)
    }

    async fn get_market_data(&self, address: &str) -> Result<MarketData> {
        self.fetch("/api/market-data", &[("address", address)])
            .await
    }

    async fn get_recent_transactions(&self, address: &str) -> Result<Vec<Transaction>> {
        self.fetch("/api/transactions", &[("address", address)])
            .await
    }

    async fn get_social_sentiment(&self) -> Result<SentimentMetrics> {
        self.fetch("/api/sentiment", &[]).await
    }

    async fn get_network_stats(&self) -> Result<NetworkStats> {
        self.fetch("/api/network", &[]).await
    }
}
