use serde::Serialize;
use std::collections::HashMap;

use super::asset::Asset;
use super::quote::PriceQuote;

/// Result of one multi-exchange aggregation round.
///
/// Constructed fresh at the start of each round and never mutated
/// after being returned. Partial failure is normal: an absent entry in
/// `prices` plus an explanatory string in `errors` is how a failed
/// asset is reported - the aggregator never raises.
#[derive(Clone, Debug, Serialize)]
pub struct AggregationResult {
    /// Best available quote per tracked asset; absent means every
    /// source failed for that asset.
    pub prices: HashMap<Asset, PriceQuote>,

    /// Attributed diagnostics, in the order they were recorded.
    pub errors: Vec<String>,

    /// Exchanges that contributed at least one price, in priority order.
    pub sources_used: Vec<&'static str>,

    /// Number of tracked assets with a price present.
    pub success_count: usize,

    /// Number of tracked assets, fixed at 4.
    pub total_count: usize,
}

impl AggregationResult {
    /// A fresh, empty round over the tracked asset set.
    pub fn empty() -> Self {
        Self {
            prices: HashMap::with_capacity(Asset::TRACKED.len()),
            errors: Vec::new(),
            sources_used: Vec::new(),
            success_count: 0,
            total_count: Asset::TRACKED.len(),
        }
    }

    /// True once every tracked asset has a price.
    pub fn is_complete(&self) -> bool {
        self.success_count == self.total_count
    }

    /// The quote for one asset, if any source supplied it.
    pub fn price(&self, asset: Asset) -> Option<&PriceQuote> {
        self.prices.get(&asset)
    }
}

impl Default for AggregationResult {
    fn default() -> Self {
        Self::empty()
    }
}
