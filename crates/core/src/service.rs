//! The dashboard's service facade: cached entry points over the
//! aggregator, the metrics collector and the mempool clients.

use std::sync::Arc;

use log::{debug, warn};

use blockdash_chain_metrics::{
    BitfinexClient, MempoolSnapshot, MempoolSpaceClient, MempoolStats, MetricsBundle,
    MetricsCollector, OhlcHistory,
};
use blockdash_market_data::{AggregationResult, PriceAggregator};

use crate::cache::CacheStore;

/// Explicit context object owning the fetch pipeline and its caches.
///
/// Every getter memoizes through one [`CacheStore`] slot; within the
/// TTL repeated calls issue no network traffic, and concurrent
/// callers on a cold slot share one in-flight fetch. Partial and
/// total failures are cached like successes.
pub struct DashboardService {
    aggregator: PriceAggregator,
    collector: MetricsCollector,
    mempool: MempoolSpaceClient,
    bitfinex: BitfinexClient,
    cache: CacheStore,
}

impl DashboardService {
    pub fn new() -> Self {
        Self::with_components(
            PriceAggregator::new(),
            MetricsCollector::new(),
            MempoolSpaceClient::new(),
            BitfinexClient::new(),
            CacheStore::new(),
        )
    }

    /// Assemble a service from explicit parts, used by tests to
    /// inject mock clients and short TTLs.
    pub fn with_components(
        aggregator: PriceAggregator,
        collector: MetricsCollector,
        mempool: MempoolSpaceClient,
        bitfinex: BitfinexClient,
        cache: CacheStore,
    ) -> Self {
        Self {
            aggregator,
            collector,
            mempool,
            bitfinex,
            cache,
        }
    }

    /// Current tracked-asset prices, cached.
    pub async fn get_prices(&self) -> Arc<AggregationResult> {
        self.cache
            .prices
            .get_or_fetch(self.aggregator.fetch_prices())
            .await
    }

    /// One chain and network metrics bundle, cached.
    pub async fn get_metrics(&self) -> Arc<MetricsBundle> {
        self.cache
            .metrics
            .get_or_fetch(self.collector.collect())
            .await
    }

    /// Composite mempool snapshot, cached.
    pub async fn get_mempool_snapshot(&self) -> Arc<MempoolSnapshot> {
        self.cache
            .mempool_snapshot
            .get_or_fetch(self.mempool.network_snapshot())
            .await
    }

    /// Supplementary mining statistics, cached.
    pub async fn get_mempool_stats(&self) -> Arc<MempoolStats> {
        self.cache
            .mempool_stats
            .get_or_fetch(self.mempool.mempool_stats())
            .await
    }

    /// Weekly BTC/USD candle history from 2013, cached.
    ///
    /// A total fetch failure degrades to an empty history; the empty
    /// result is cached like any other, so a dead upstream is retried
    /// only after the TTL.
    pub async fn get_btc_ohlc(&self) -> Arc<OhlcHistory> {
        self.cache
            .ohlc
            .get_or_fetch(async {
                match self.bitfinex.btc_ohlc_history().await {
                    Ok(history) => history,
                    Err(e) => {
                        warn!("ohlc history fetch failed: {e}");
                        OhlcHistory::default()
                    }
                }
            })
            .await
    }

    pub async fn invalidate_price_cache(&self) {
        debug!("price cache invalidated");
        self.cache.prices.invalidate().await;
    }

    pub async fn invalidate_metrics_cache(&self) {
        debug!("metrics cache invalidated");
        self.cache.metrics.invalidate().await;
    }

    pub async fn invalidate_mempool_caches(&self) {
        debug!("mempool caches invalidated");
        self.cache.mempool_snapshot.invalidate().await;
        self.cache.mempool_stats.invalidate().await;
    }

    pub async fn invalidate_ohlc_cache(&self) {
        debug!("ohlc cache invalidated");
        self.cache.ohlc.invalidate().await;
    }
}

impl Default for DashboardService {
    fn default() -> Self {
        Self::new()
    }
}
