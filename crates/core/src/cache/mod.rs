//! Short-TTL result caching with single-flight fetches, using moka.

use moka::future::Cache;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use blockdash_chain_metrics::{MempoolSnapshot, MempoolStats, MetricsBundle, OhlcHistory};
use blockdash_market_data::AggregationResult;

/// TTL applied to every cached fetch operation.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

/// One cached fetch operation.
///
/// A single moka slot memoizes the last result for the TTL. During a
/// miss, concurrent callers converge on one in-flight fetch instead
/// of issuing redundant network rounds. Results are stored even when
/// they encode partial or total failure, so a dead upstream is not
/// hammered every call.
pub struct CachedFetch<T> {
    slot: Cache<(), Arc<T>>,
}

impl<T: Send + Sync + 'static> CachedFetch<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            slot: Cache::builder().time_to_live(ttl).max_capacity(1).build(),
        }
    }

    /// Return the memoized value, running `fetch` once on a miss.
    pub async fn get_or_fetch<F>(&self, fetch: F) -> Arc<T>
    where
        F: Future<Output = T>,
    {
        self.slot
            .entry(())
            .or_insert_with(async { Arc::new(fetch.await) })
            .await
            .into_value()
    }

    /// Forcibly expire the slot; the next read fetches fresh.
    pub async fn invalidate(&self) {
        self.slot.invalidate(&()).await;
    }
}

/// One cache slot per distinct fetch operation.
pub struct CacheStore {
    pub prices: CachedFetch<AggregationResult>,
    pub metrics: CachedFetch<MetricsBundle>,
    pub mempool_snapshot: CachedFetch<MempoolSnapshot>,
    pub mempool_stats: CachedFetch<MempoolStats>,
    pub ohlc: CachedFetch<OhlcHistory>,
}

impl CacheStore {
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_CACHE_TTL)
    }

    /// Build a store with a uniform TTL; short TTLs are used in tests.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            prices: CachedFetch::new(ttl),
            metrics: CachedFetch::new(ttl),
            mempool_snapshot: CachedFetch::new(ttl),
            mempool_stats: CachedFetch::new(ttl),
            ohlc: CachedFetch::new(ttl),
        }
    }
}

impl Default for CacheStore {
    fn default() -> Self {
        Self::new()
    }
}
