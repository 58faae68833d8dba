use async_trait::async_trait;

use crate::error::Result;
use crate::models::token::{
    MarketData, NetworkStats, SentimentMetrics, TokenInfo, TrackedToken, Transaction,
};

pub mod clawnch;
pub mod synthetic;

pub use clawnch::ClawnchProvider;
pub use synthetic::SyntheticProvider;

/// Capability set every market data source offers. The monitoring service
/// depends only on this trait; failures surface as
/// [`Error::ProviderUnavailable`](crate::Error::ProviderUnavailable) and must
/// never take the refresh loop down with them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DataProvider: Send + Sync {
    async fn list_tracked_tokens(&self) -> Result<Vec<TrackedToken>>;

    async fn get_token_info(&self, address: &str) -> Result<TokenInfo>;

    async fn get_market_data(&self, address: &str) -> Result<MarketData>;

    async fn get_recent_transactions(&self, address: &str) -> Result<Vec<Transaction>>;

    /// Sentiment is collected per platform, not per token.
    async fn get_social_sentiment(&self) -> Result<SentimentMetrics>;

    async fn get_network_stats(&self) -> Result<NetworkStats>;
}
