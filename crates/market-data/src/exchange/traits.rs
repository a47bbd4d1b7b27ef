//! Exchange client trait definition.

use async_trait::async_trait;
use log::debug;
use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::errors::ExchangeError;
use crate::models::Asset;

/// Outcome of asking one exchange for every tracked asset.
///
/// A per-asset failure inside the round does not abort the other
/// fetches; it becomes one entry in `errors` and an absence in
/// `prices`.
#[derive(Debug, Default)]
pub struct ExchangeRound {
    /// Valid prices this exchange produced, keyed by asset.
    pub prices: HashMap<Asset, Decimal>,

    /// One diagnostic per asset that failed, in tracked-asset order.
    pub errors: Vec<String>,
}

impl ExchangeRound {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of assets this exchange priced successfully.
    pub fn success_count(&self) -> usize {
        self.prices.len()
    }
}

/// Trait implemented by each exchange wrapper.
///
/// Implementations translate a tracked asset into the exchange's quote
/// endpoint and normalize the answer. No retries, no caching - retry
/// policy and memoization belong to the caller.
#[async_trait]
pub trait ExchangeClient: Send + Sync {
    /// Human-readable exchange name, used for source attribution.
    fn id(&self) -> &'static str;

    /// Fetch the current USD price for one tracked asset.
    async fn fetch_price(&self, asset: Asset) -> Result<Decimal, ExchangeError>;

    /// Fetch every tracked asset this exchange can supply.
    ///
    /// The default implementation fans out one concurrent
    /// [`fetch_price`](Self::fetch_price) per tracked asset; exchanges
    /// with a batched quote endpoint override this.
    async fn fetch_tracked_prices(&self) -> ExchangeRound {
        let fetches = Asset::TRACKED
            .iter()
            .map(|&asset| async move { (asset, self.fetch_price(asset).await) });
        let results = futures::future::join_all(fetches).await;

        let mut round = ExchangeRound::new();
        for (asset, result) in results {
            match result {
                Ok(price) => {
                    debug!("{} {}: {}", self.id(), asset, price);
                    round.prices.insert(asset, price);
                }
                Err(e) => {
                    debug!("{} {} failed: {}", self.id(), asset, e);
                    round.errors.push(format!("{}: {}", asset.symbol(), e));
                }
            }
        }
        round
    }
}
