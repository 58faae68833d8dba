use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A token on the monitoring list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedToken {
    pub address: String,
    pub name: String,
    pub symbol: String,
}

/// Static token metadata as reported by the data provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenInfo {
    pub address: String,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub total_supply: String,
    pub holders: u64,
    pub created: DateTime<Utc>,
}

/// Market-side numbers for a single token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketData {
    pub price: f64,
    pub price_change_24h: f64,
    pub market_cap: f64,
    pub volume_24h: f64,
    pub liquidity: f64,
    pub fdv: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxKind {
    Buy,
    Sell,
    Transfer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TxKind,
    pub platform: String,
    pub amount: f64,
    #[serde(rename = "valueUSD")]
    pub value_usd: String,
    pub timestamp: DateTime<Utc>,
    pub from: String,
    pub to: String,
    pub tx_hash: String,
}

/// Mention counters per monitored platform plus aggregate sentiment shares.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentMetrics {
    pub moltbook: u64,
    pub moltx: u64,
    pub discord: u64,
    pub fourclaw: u64,
    pub sentiment_score: f64,
    pub positive: f64,
    pub neutral: f64,
    pub negative: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkStats {
    pub active_wallets: u64,
    pub unique_addresses: u64,
    pub transactions_24h: u64,
    pub weth_fees: f64,
}

/// Latest known state for one token. Replaced wholesale on every successful
/// refresh; there is no partial-field merge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenSnapshot {
    pub info: TokenInfo,
    pub market: MarketData,
    pub transactions: Vec<Transaction>,
    pub sentiment: SentimentMetrics,
    pub network: NetworkStats,
    pub last_updated: DateTime<Utc>,
}

/// One (timestamp, price, volume) sample of the rolling history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
    pub volume: f64,
}

/// History sample in the shape the dashboard chart consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalPrice {
    pub time: DateTime<Utc>,
    pub price: f64,
}

/// Flattened per-token view served to the front end. Field names serialize
/// to the camelCase keys the dashboard reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenView {
    pub price: f64,
    pub price_change_24h: f64,
    pub market_cap: f64,
    pub volume_24h: f64,
    pub holders: u64,
    pub transactions_24h: u64,
    pub unique_addresses: u64,
    pub active_wallets: u64,
    pub moltbook_mentions: u64,
    pub moltx_mentions: u64,
    pub discord_activity: u64,
    pub fourclaw_activity: u64,
    pub weth_fees: f64,
    pub transactions_list: Vec<Transaction>,
    pub historical_prices: Vec<HistoricalPrice>,
}

impl TokenView {
    /// Flattens a snapshot plus the tail of its history into the wire view.
    /// At most `max_points` of the newest history entries are included.
    pub fn from_snapshot(
        snapshot: &TokenSnapshot,
        history: &VecDeque<HistoryPoint>,
        max_points: usize,
    ) -> Self {
        let skip = history.len().saturating_sub(max_points);
        let historical_prices = history
            .iter()
            .skip(skip)
            .map(|point| HistoricalPrice {
                time: point.timestamp,
                price: point.price,
            })
            .collect();

        Self {
            price: snapshot.market.price,
            price_change_24h: snapshot.market.price_change_24h,
            market_cap: snapshot.market.market_cap,
            volume_24h: snapshot.market.volume_24h,
            holders: snapshot.info.holders,
            transactions_24h: snapshot.network.transactions_24h,
            unique_addresses: snapshot.network.unique_addresses,
            active_wallets: snapshot.network.active_wallets,
            moltbook_mentions: snapshot.sentiment.moltbook,
            moltx_mentions: snapshot.sentiment.moltx,
            discord_activity: snapshot.sentiment.discord,
            fourclaw_activity: snapshot.sentiment.fourclaw,
            weth_fees: snapshot.network.weth_fees,
            transactions_list: snapshot.transactions.clone(),
            historical_prices,
        }
    }
}
