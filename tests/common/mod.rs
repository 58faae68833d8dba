use std::sync::Arc;

use prometheus::Registry;
use token_monitor::config::Config;
use token_monitor::metrics::Metrics;
use token_monitor::models::token::TrackedToken;
use token_monitor::monitor::TokenMonitorService;
use token_monitor::provider::SyntheticProvider;

pub fn test_token() -> TrackedToken {
    TrackedToken {
        address: "0xT1".to_string(),
        name: "Test Token".to_string(),
        symbol: "TST".to_string(),
    }
}

pub fn create_test_config() -> Config {
    let mut config = Config::default();
    config.server.host = "127.0.0.1".to_string();
    config.server.port = 0;
    config.monitor.update_interval_secs = 1;
    config.monitor.tokens = vec![test_token()];
    config
}

pub fn create_test_service(config: &Config) -> Arc<TokenMonitorService> {
    let registry = Registry::new();
    let metrics = Arc::new(Metrics::new(&registry).unwrap());
    let provider = Arc::new(SyntheticProvider::new(config.monitor.tokens.clone()));

    Arc::new(TokenMonitorService::new(
        provider,
        metrics,
        config.monitor.history_retention,
        config.monitor.export_history_points,
    ))
}
