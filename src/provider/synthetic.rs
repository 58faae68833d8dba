use async_trait::async_trait;
use chrono::{Duration, Utc};
use rand::Rng;

use crate::error::Result;
use crate::models::token::{
    MarketData, NetworkStats, SentimentMetrics, TokenInfo, TrackedToken, Transaction, TxKind,
};
use crate::provider::DataProvider;

const TX_BATCH_SIZE: usize = 15;
const TX_PLATFORMS: [&str; 3] = ["4claw", "Base", "Other"];

/// Demo data source. Produces randomized values in the same ranges the real
/// data service reports. The tracked-token list comes from configuration.
pub struct SyntheticProvider {
    tokens: Vec<TrackedToken>,
}

impl SyntheticProvider {
    pub fn new(tokens: Vec<TrackedToken>) -> Self {
        Self { tokens }
    }

    fn random_price(rng: &mut impl Rng) -> f64 {
        0.000001 + rng.gen::<f64>() * 0.000005
    }

    /// -10% to +10%
    fn random_change(rng: &mut impl Rng) -> f64 {
        (rng.gen::<f64>() - 0.5) * 20.0
    }

    fn random_hex(rng: &mut impl Rng, len: usize) -> String {
        const HEX: &[u8] = b"0123456789abcdef";
        (0..len).map(|_| HEX[rng.gen_range(0..HEX.len())] as char).collect()
    }

    fn short_address(rng: &mut impl Rng) -> String {
        format!("0x{}...{}", Self::random_hex(rng, 6), Self::random_hex(rng, 4))
    }
}

#[async_trait]
impl DataProvider for SyntheticProvider {
    async fn list_tracked_tokens(&self) -> Result<Vec<TrackedToken>> {
        Ok(self.tokens.clone())
    }

    async fn get_token_info(&self, address: &str) -> Result<TokenInfo> {
        let mut rng = rand::thread_rng();
        let tracked = self.tokens.iter().find(|token| token.address == address);

        Ok(TokenInfo {
            address: address.to_string(),
            name: tracked
                .map(|token| token.name.clone())
                .unwrap_or_else(|| "Unknown Token".to_string()),
            symbol: tracked
                .map(|token| token.symbol.clone())
                .unwrap_or_else(|| "UNKNOWN".to_string()),
            decimals: 18,
            total_supply: "1000000000000000000000000".to_string(),
            holders: rng.gen_range(1_000..11_000),
            created: Utc::now(),
        })
    }

    async fn get_market_data(&self, _address: &str) -> Result<MarketData> {
        let mut rng = rand::thread_rng();

        Ok(MarketData {
            price: Self::random_price(&mut rng),
            price_change_24h: Self::random_change(&mut rng),
            market_cap: rng.gen::<f64>() * 50_000.0,
            volume_24h: rng.gen::<f64>() * 10_000.0,
            liquidity: rng.gen::<f64>() * 25_000.0,
            fdv: rng.gen::<f64>() * 100_000.0,
        })
    }

    async fn get_recent_transactions(&self, _address: &str) -> Result<Vec<Transaction>> {
        let mut rng = rand::thread_rng();
        let now = Utc::now();

        let transactions = (0..TX_BATCH_SIZE)
            .map(|i| {
                let kind = match rng.gen_range(0..3) {
                    0 => TxKind::Buy,
                    1 => TxKind::Sell,
                    _ => TxKind::Transfer,
                };

                Transaction {
                    id: format!("tx_{}_{}", now.timestamp_millis(), i),
                    kind,
                    platform: TX_PLATFORMS[rng.gen_range(0..TX_PLATFORMS.len())].to_string(),
                    amount: rng.gen::<f64>() * 1_000.0,
                    value_usd: format!("${:.4}", rng.gen::<f64>() * 10.0),
                    timestamp: now - Duration::milliseconds(rng.gen_range(0..3_600_000)),
                    from: Self::short_address(&mut rng),
                    to: Self::short_address(&mut rng),
                    tx_hash: format!("0x{}", Self::random_hex(&mut rng, 64)),
                }
            })
            .collect();

        Ok(transactions)
    }

    async fn get_social_sentiment(&self) -> Result<SentimentMetrics> {
        let mut rng = rand::thread_rng();

        Ok(SentimentMetrics {
            moltbook: rng.gen_range(10..110),
            moltx: rng.gen_range(5..85),
            discord: rng.gen_range(15..75),
            fourclaw: rng.gen_range(20..60),
            sentiment_score: 75.0 + rng.gen::<f64>() * 20.0,
            positive: 65.0 + rng.gen::<f64>() * 20.0,
            neutral: 20.0 + rng.gen::<f64>() * 15.0,
            negative: 5.0 + rng.gen::<f64>() * 10.0,
        })
    }

    async fn get_network_stats(&self) -> Result<NetworkStats> {
        let mut rng = rand::thread_rng();

        Ok(NetworkStats {
            active_wallets: rng.gen_range(200..3_200),
            unique_addresses: rng.gen_range(500..8_500),
            transactions_24h: rng.gen_range(100..5_100),
            weth_fees: rng.gen::<f64>() * 5.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> SyntheticProvider {
        SyntheticProvider::new(vec![TrackedToken {
            address: "0xT1".to_string(),
            name: "Test Token".to_string(),
            symbol: "TST".to_string(),
        }])
    }

    #[tokio::test]
    async fn lists_configured_tokens() {
        let tokens = provider().list_tracked_tokens().await.unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].address, "0xT1");
    }

    #[tokio::test]
    async fn token_info_uses_tracked_metadata() {
        let info = provider().get_token_info("0xT1").await.unwrap();
        assert_eq!(info.name, "Test Token");
        assert_eq!(info.symbol, "TST");
        assert!(info.holders >= 1_000 && info.holders < 11_000);
    }

    #[tokio::test]
    async fn unknown_address_still_resolves() {
        let info = provider().get_token_info("0xdead").await.unwrap();
        assert_eq!(info.name, "Unknown Token");
        assert_eq!(info.address, "0xdead");
    }

    #[tokio::test]
    async fn market_data_stays_in_documented_ranges() {
        for _ in 0..50 {
            let market = provider().get_market_data("0xT1").await.unwrap();
            assert!(market.price >= 0.000001 && market.price <= 0.000006);
            assert!(market.price_change_24h >= -10.0 && market.price_change_24h <= 10.0);
            assert!(market.market_cap >= 0.0 && market.market_cap <= 50_000.0);
        }
    }

    #[tokio::test]
    async fn produces_a_full_transaction_batch() {
        let transactions = provider().get_recent_transactions("0xT1").await.unwrap();
        assert_eq!(transactions.len(), TX_BATCH_SIZE);
        for tx in &transactions {
            assert!(TX_PLATFORMS.contains(&tx.platform.as_str()));
            assert!(tx.value_usd.starts_with('$'));
            assert!(tx.tx_hash.starts_with("0x"));
            assert!(tx.timestamp <= Utc::now());
        }
    }

    #[tokio::test]
    async fn sentiment_counters_stay_in_range() {
        let sentiment = provider().get_social_sentiment().await.unwrap();
        assert!(sentiment.moltbook >= 10 && sentiment.moltbook < 110);
        assert!(sentiment.fourclaw >= 20 && sentiment.fourclaw < 60);
        assert!(sentiment.sentiment_score >= 75.0 && sentiment.sentiment_score <= 95.0);
    }
}
