//! Metrics collection: fan out to every source, merge into one bundle.

use futures::future::join_all;
use log::{debug, info, warn};

use crate::clients::{
    AlternativeMeClient, BitnodesClient, BlockchainInfoClient, CoinGeckoMarketsClient,
    MempoolSpaceClient,
};
use crate::models::{ChartKind, MetricsBundle};
use crate::units;

/// The network's block interval target, used whenever the measured
/// average is unavailable.
pub const DEFAULT_AVG_BLOCK_TIME_MINUTES: f64 = 10.0;

/// Collects one [`MetricsBundle`] per round from all sources.
///
/// Every sub-fetch runs inside its own failure boundary: a failed
/// source omits its section and appends one attributed error string,
/// and the round always completes. Sections are fetched concurrently
/// but merged in a fixed order so the errors list is deterministic.
pub struct MetricsCollector {
    blockchain: BlockchainInfoClient,
    mempool: MempoolSpaceClient,
    sentiment: AlternativeMeClient,
    markets: CoinGeckoMarketsClient,
    bitnodes: BitnodesClient,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self {
            blockchain: BlockchainInfoClient::new(),
            mempool: MempoolSpaceClient::new(),
            sentiment: AlternativeMeClient::new(),
            markets: CoinGeckoMarketsClient::new(),
            bitnodes: BitnodesClient::new(),
        }
    }

    /// Point every client at one base URL, for mock servers.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            blockchain: BlockchainInfoClient::with_base_url(base_url),
            mempool: MempoolSpaceClient::with_base_url(base_url),
            sentiment: AlternativeMeClient::with_base_url(base_url),
            markets: CoinGeckoMarketsClient::with_base_url(base_url),
            bitnodes: BitnodesClient::with_base_url(base_url),
        }
    }

    /// Collect one full metrics round.
    pub async fn collect(&self) -> MetricsBundle {
        let charts = join_all(
            ChartKind::ALL
                .iter()
                .map(|&kind| async move { (kind, self.blockchain.chart(kind).await) }),
        );

        let (spot, market, fng, chain, global, nodes, difficulty, charts) = tokio::join!(
            self.markets.spot_price(),
            self.markets.market_snapshot(),
            self.sentiment.fear_greed(),
            self.blockchain.chain_basics(),
            self.markets.global_market(),
            self.bitnodes.node_count(),
            self.mempool.difficulty_adjustment(),
            charts,
        );

        let mut bundle = MetricsBundle::new();

        match spot {
            Ok(spot) => bundle.spot_price = Some(spot),
            Err(e) => bundle.errors.push(format!("spot price: {e}")),
        }
        match market {
            Ok(market) => bundle.market = Some(market),
            Err(e) => bundle.errors.push(format!("market snapshot: {e}")),
        }
        match fng {
            Ok(fng) => bundle.fear_greed = Some(fng),
            Err(e) => bundle.errors.push(format!("fear & greed index: {e}")),
        }
        match chain {
            Ok(chain) => bundle.chain = Some(chain),
            Err(e) => bundle.errors.push(format!("chain basics: {e}")),
        }
        match global {
            Ok(global) => bundle.global = Some(global),
            Err(e) => bundle.errors.push(format!("global market: {e}")),
        }
        match nodes {
            Ok(count) => bundle.node_count = Some(count),
            Err(e) => bundle.errors.push(format!("node count: {e}")),
        }

        bundle.avg_block_time_minutes = match difficulty {
            Ok(adjustment) => match adjustment.time_avg {
                Some(time_avg_ms) => time_avg_ms as f64 / 1000.0 / 60.0,
                None => {
                    warn!("difficulty adjustment lacked timeAvg, using target interval");
                    DEFAULT_AVG_BLOCK_TIME_MINUTES
                }
            },
            Err(e) => {
                bundle.errors.push(format!("avg block time: {e}"));
                DEFAULT_AVG_BLOCK_TIME_MINUTES
            }
        };

        for (kind, result) in charts {
            match result {
                Ok(mut series) => {
                    if kind == ChartKind::HashRate {
                        normalize_hashrate_chart(&mut series.values);
                        series.unit = "EH/s".to_string();
                    }
                    bundle.charts.insert(kind, series);
                }
                Err(e) => bundle.errors.push(format!("{} chart: {e}", kind.slug())),
            }
        }

        let outcome = bundle.outcome();
        if bundle.errors.is_empty() {
            info!("metrics round complete, all sources succeeded");
        } else {
            warn!(
                "metrics round {:?}: {} of {} sub-fetches failed",
                outcome,
                bundle.errors.len(),
                crate::models::ATTEMPTED_FETCHES
            );
        }
        debug!("metrics success rate {:.0}%", bundle.success_rate() * 100.0);
        bundle
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize_hashrate_chart(points: &mut [crate::models::ChartPoint]) {
    let mut values: Vec<f64> = points.iter().map(|p| p.y).collect();
    let scale = units::normalize_hashrate_series(&mut values);
    debug!("hash-rate chart normalized from {:?}", scale);
    for (point, value) in points.iter_mut().zip(values) {
        point.y = value;
    }
}
