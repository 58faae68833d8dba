use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use log::{debug, error, info, warn};
use tokio::sync::{Notify, RwLock};
use tokio::time::MissedTickBehavior;

use crate::error::Result;
use crate::metrics::Metrics;
use crate::models::token::{HistoryPoint, TokenSnapshot, TokenView};
use crate::provider::DataProvider;

pub const DEFAULT_HISTORY_RETENTION: usize = 100;
pub const DEFAULT_EXPORT_POINTS: usize = 24;

struct TokenRecord {
    snapshot: TokenSnapshot,
    history: VecDeque<HistoryPoint>,
}

#[derive(Default)]
struct Store {
    tokens: HashMap<String, TokenRecord>,
    last_update: Option<DateTime<Utc>>,
}

/// Owns the in-memory token store and the timer-driven refresh loop.
///
/// Provider calls run without the store lock held; the write lock is taken
/// only for the per-token assignment step. A token's snapshot is replaced
/// wholesale, and only when every provider call for it succeeded.
pub struct TokenMonitorService {
    provider: Arc<dyn DataProvider>,
    store: Arc<RwLock<Store>>,
    metrics: Arc<Metrics>,
    running: AtomicBool,
    refreshing: AtomicBool,
    shutdown: Notify,
    history_retention: usize,
    export_points: usize,
}

impl TokenMonitorService {
    pub fn new(
        provider: Arc<dyn DataProvider>,
        metrics: Arc<Metrics>,
        history_retention: usize,
        export_points: usize,
    ) -> Self {
        Self {
            provider,
            store: Arc::new(RwLock::new(Store::default())),
            metrics,
            running: AtomicBool::new(false),
            refreshing: AtomicBool::new(false),
            shutdown: Notify::new(),
            history_retention,
            export_points,
        }
    }

    /// Starts the refresh loop: one immediate cycle, then one every
    /// `interval`. Calling while already running is a no-op.
    pub async fn start(self: &Arc<Self>, interval: Duration) {
        if self.running.swap(true, Ordering::SeqCst) {
            warn!("Monitoring is already running");
            return;
        }

        info!("Starting token monitoring every {}ms", interval.as_millis());
        self.refresh_all().await;

        let service = Arc::clone(self);
        tokio::spawn(async move {
            let start = tokio::time::Instant::now() + interval;
            let mut ticker = tokio::time::interval_at(start, interval);
            // A cycle slower than the interval skips ticks instead of
            // piling overlapping cycles onto the store.
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if !service.running.load(Ordering::SeqCst) {
                            break;
                        }
                        if service.refreshing.load(Ordering::SeqCst) {
                            debug!("Previous refresh cycle still in flight, skipping tick");
                            continue;
                        }
                        service.refresh_all().await;
                    }
                    _ = service.shutdown.notified() => break,
                }
            }

            info!("Token monitoring stopped");
        });
    }

    /// Cancels the recurring schedule. An in-flight cycle finishes; no
    /// further cycles run. Safe to call from a shutdown signal handler,
    /// and calling when already stopped is a no-op.
    pub fn stop(&self) {
        if !self.running.swap(false, Ordering::SeqCst) {
            return;
        }
        info!("Stopping token monitoring");
        self.shutdown.notify_one();
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Runs one full refresh cycle. Provider failures are contained at
    /// per-token granularity; this never propagates an error to the caller.
    pub async fn refresh_all(&self) {
        self.refreshing.store(true, Ordering::SeqCst);
        self.refresh_cycle().await;
        self.refreshing.store(false, Ordering::SeqCst);
    }

    async fn refresh_cycle(&self) {
        debug!("Updating token data from provider");

        let tokens = match self.provider.list_tracked_tokens().await {
            Ok(tokens) => tokens,
            Err(e) => {
                self.metrics.provider_errors.inc();
                error!("Failed to list tracked tokens: {}", e);
                return;
            }
        };

        let mut updated = 0usize;
        for token in &tokens {
            match self.refresh_token(&token.address).await {
                Ok(()) => updated += 1,
                Err(e) => {
                    self.metrics.provider_errors.inc();
                    error!("Error updating data for token {}: {}", token.address, e);
                }
            }
        }

        let tracked = {
            let mut store = self.store.write().await;
            store.last_update = Some(Utc::now());
            store.tokens.len()
        };

        self.metrics.refresh_cycles.inc();
        self.metrics.tokens_tracked.set(tracked as f64);
        info!("Updated data for {}/{} tokens", updated, tokens.len());
    }

    async fn refresh_token(&self, address: &str) -> Result<()> {
        // Collect everything before touching the store, so a failure at any
        // point leaves the previous snapshot and history intact.
        let info = self.provider.get_token_info(address).await?;
        let market = self.provider.get_market_data(address).await?;
        let transactions = self.provider.get_recent_transactions(address).await?;
        let sentiment = self.provider.get_social_sentiment().await?;
        let network = self.provider.get_network_stats().await?;

        let now = Utc::now();
        let point = HistoryPoint {
            timestamp: now,
            price: market.price,
            volume: market.volume_24h,
        };
        let snapshot = TokenSnapshot {
            info,
            market,
            transactions,
            sentiment,
            network,
            last_updated: now,
        };

        let mut store = self.store.write().await;
        match store.tokens.get_mut(address) {
            Some(record) => {
                record.snapshot = snapshot;
                record.history.push_back(point);
                while record.history.len() > self.history_retention {
                    record.history.pop_front();
                }
            }
            None => {
                let mut history = VecDeque::with_capacity(self.history_retention);
                history.push_back(point);
                store
                    .tokens
                    .insert(address.to_string(), TokenRecord { snapshot, history });
            }
        }
        drop(store);

        self.metrics.token_updates.inc();
        debug!("Updated data for token {}", address);
        Ok(())
    }

    pub async fn get_snapshot(&self, address: &str) -> Option<TokenSnapshot> {
        self.store
            .read()
            .await
            .tokens
            .get(address)
            .map(|record| record.snapshot.clone())
    }

    /// Flattened view of one token, as served by `/api/token`.
    pub async fn export_token(&self, address: &str) -> Option<TokenView> {
        let store = self.store.read().await;
        store.tokens.get(address).map(|record| {
            TokenView::from_snapshot(&record.snapshot, &record.history, self.export_points)
        })
    }

    /// Flattened views of every token in the store, as served by `/api/data`.
    pub async fn export_all(&self) -> HashMap<String, TokenView> {
        let store = self.store.read().await;
        store
            .tokens
            .iter()
            .map(|(address, record)| {
                (
                    address.clone(),
                    TokenView::from_snapshot(&record.snapshot, &record.history, self.export_points),
                )
            })
            .collect()
    }

    pub async fn token_count(&self) -> usize {
        self.store.read().await.tokens.len()
    }

    pub async fn last_update(&self) -> Option<DateTime<Utc>> {
        self.store.read().await.last_update
    }

    /// True once at least one refresh cycle has completed.
    pub async fn is_initialized(&self) -> bool {
        self.store.read().await.last_update.is_some()
    }

    /// History length for one token; test and diagnostics helper.
    pub async fn history_len(&self, address: &str) -> usize {
        self.store
            .read()
            .await
            .tokens
            .get(address)
            .map(|record| record.history.len())
            .unwrap_or(0)
    }
}
