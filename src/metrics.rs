use prometheus::{Counter, Gauge, Registry};

use crate::error::Result;

/// Counters and gauges the monitoring service and the web layer report into,
/// registered on an explicitly constructed registry.
#[derive(Clone)]
pub struct Metrics {
    pub refresh_cycles: Counter,
    pub token_updates: Counter,
    pub provider_errors: Counter,
    pub http_requests: Counter,
    pub tokens_tracked: Gauge,
}

impl Metrics {
    pub fn new(registry: &Registry) -> Result<Self> {
        let metrics = Self {
            refresh_cycles: Counter::new(
                "refresh_cycles_total",
                "Total number of completed refresh cycles",
            )?,
            token_updates: Counter::new(
                "token_updates_total",
                "Total number of successful per-token updates",
            )?,
            provider_errors: Counter::new(
                "provider_errors_total",
                "Total number of failed data provider calls",
            )?,
            http_requests: Counter::new(
                "http_requests_total",
                "Total number of HTTP API requests",
            )?,
            tokens_tracked: Gauge::new(
                "tokens_tracked",
                "Number of tokens currently in the store",
            )?,
        };

        registry.register(Box::new(metrics.refresh_cycles.clone()))?;
        registry.register(Box::new(metrics.token_updates.clone()))?;
        registry.register(Box::new(metrics.provider_errors.clone()))?;
        registry.register(Box::new(metrics.http_requests.clone()))?;
        registry.register(Box::new(metrics.tokens_tracked.clone()))?;

        Ok(metrics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registers_on_a_fresh_registry() {
        let registry = Registry::new();
        let metrics = Metrics::new(&registry).unwrap();

        metrics.refresh_cycles.inc();
        metrics.provider_errors.inc();
        metrics.tokens_tracked.set(3.0);

        let families = registry.gather();
        assert_eq!(families.len(), 5);
    }

    #[test]
    fn double_registration_fails() {
        let registry = Registry::new();
        let _metrics = Metrics::new(&registry).unwrap();
        assert!(Metrics::new(&registry).is_err());
    }
}
