//! The aggregate metrics bundle and its section models.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

use super::charts::{ChartKind, ChartSeries};

/// A single spot price with source attribution.
#[derive(Clone, Debug, Serialize)]
pub struct SpotPrice {
    pub usd: f64,
    pub source: &'static str,
}

/// Multi-currency BTC market snapshot.
#[derive(Clone, Debug, Default, Serialize)]
pub struct MarketSnapshot {
    pub price_usd: Option<f64>,
    pub price_eur: Option<f64>,
    pub price_gbp: Option<f64>,
    pub price_inr: Option<f64>,
    pub market_cap_usd: Option<f64>,
    pub volume_24h_usd: Option<f64>,
    pub change_24h_pct: Option<f64>,
    pub last_updated_at: Option<i64>,
}

/// Global crypto market totals.
#[derive(Clone, Debug, Serialize)]
pub struct GlobalMarket {
    pub total_market_cap_usd: f64,
    pub total_volume_24h_usd: f64,
    pub btc_dominance_pct: f64,
    pub active_cryptocurrencies: u64,
    pub markets: u64,
}

/// Fear & Greed index reading.
#[derive(Clone, Debug, Serialize)]
pub struct FearGreed {
    pub value: u32,
    pub classification: String,
    pub timestamp: i64,
}

/// Basic chain facts from the simple-query endpoints.
///
/// Each field is independently optional: the queries are issued
/// separately and one failing does not spoil the others.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ChainBasics {
    pub difficulty: Option<f64>,
    pub block_reward_btc: Option<f64>,
    pub block_count: Option<u64>,
    pub total_supply_sats: Option<f64>,
}

impl ChainBasics {
    /// Circulating supply in BTC.
    pub fn total_supply_btc(&self) -> Option<f64> {
        self.total_supply_sats.map(|sats| sats / 1e8)
    }

    pub fn is_empty(&self) -> bool {
        self.difficulty.is_none()
            && self.block_reward_btc.is_none()
            && self.block_count.is_none()
            && self.total_supply_sats.is_none()
    }
}

/// How a collection round went, for caller display purposes.
///
/// The thresholds are presentation hints, not correctness gates.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum CollectionOutcome {
    /// Every attempted sub-fetch produced its section
    Complete,
    /// Some failures, fewer than five
    Degraded,
    /// Five or more failures
    MajorFailure,
}

impl CollectionOutcome {
    pub fn from_error_count(errors: usize) -> Self {
        match errors {
            0 => CollectionOutcome::Complete,
            1..=4 => CollectionOutcome::Degraded,
            _ => CollectionOutcome::MajorFailure,
        }
    }
}

/// One round of collected chain and network metrics.
///
/// Every section is independently optional; presence means that source
/// succeeded this round. `avg_block_time_minutes` is the exception: it
/// always carries a value because it has a domain-meaningful default
/// (the network's 10 minute target) instead of an omission.
#[derive(Clone, Debug, Serialize)]
pub struct MetricsBundle {
    pub timestamp: DateTime<Utc>,
    pub spot_price: Option<SpotPrice>,
    pub market: Option<MarketSnapshot>,
    pub fear_greed: Option<FearGreed>,
    pub chain: Option<ChainBasics>,
    pub global: Option<GlobalMarket>,
    pub node_count: Option<u64>,
    pub avg_block_time_minutes: f64,
    pub charts: HashMap<ChartKind, ChartSeries>,
    pub errors: Vec<String>,
}

/// Sub-fetches attempted per collection round: six sections, the block
/// time probe, and one fetch per chart kind.
pub const ATTEMPTED_FETCHES: usize = 7 + ChartKind::ALL.len();

impl MetricsBundle {
    pub fn new() -> Self {
        Self {
            timestamp: Utc::now(),
            spot_price: None,
            market: None,
            fear_greed: None,
            chain: None,
            global: None,
            node_count: None,
            avg_block_time_minutes: crate::collector::DEFAULT_AVG_BLOCK_TIME_MINUTES,
            charts: HashMap::new(),
            errors: Vec::new(),
        }
    }

    pub fn outcome(&self) -> CollectionOutcome {
        CollectionOutcome::from_error_count(self.errors.len())
    }

    /// Fraction of attempted sub-fetches that produced their section.
    pub fn success_rate(&self) -> f64 {
        let failed = self.errors.len().min(ATTEMPTED_FETCHES);
        (ATTEMPTED_FETCHES - failed) as f64 / ATTEMPTED_FETCHES as f64
    }
}

impl Default for MetricsBundle {
    fn default() -> Self {
        Self::new()
    }
}
