//! Multi-exchange price aggregation with priority fallback.
//!
//! Exchanges are consulted in a fixed priority order. The first
//! exchange to price an asset owns that quote; later exchanges only
//! fill the gaps. Once every tracked asset has a price the remaining
//! exchanges are not contacted at all.

use std::sync::Arc;

use log::{debug, warn};

use crate::exchange::{
    BinanceClient, CoinGeckoClient, CoinbaseClient, ExchangeClient, KucoinClient,
};
use crate::models::{AggregationResult, Asset, PriceQuote};

/// Aggregates tracked-asset prices across exchanges in priority order.
///
/// Aggregation itself is infallible. Every exchange can be down and
/// the call still returns a result; the failures are carried inside
/// [`AggregationResult::errors`].
pub struct PriceAggregator {
    clients: Vec<Arc<dyn ExchangeClient>>,
}

impl PriceAggregator {
    /// The default exchange stack: Binance, KuCoin, Coinbase,
    /// CoinGecko, most reliable first.
    pub fn new() -> Self {
        Self::with_clients(vec![
            Arc::new(BinanceClient::new()),
            Arc::new(KucoinClient::new()),
            Arc::new(CoinbaseClient::new()),
            Arc::new(CoinGeckoClient::new()),
        ])
    }

    /// Build an aggregator over an explicit client stack, highest
    /// priority first.
    pub fn with_clients(clients: Vec<Arc<dyn ExchangeClient>>) -> Self {
        Self { clients }
    }

    /// Fetch current prices for all tracked assets.
    ///
    /// Exchanges are queried sequentially so a fully successful
    /// high-priority round skips the rest of the stack. Within one
    /// exchange the per-asset fetches run concurrently.
    pub async fn fetch_prices(&self) -> AggregationResult {
        let mut result = AggregationResult::empty();

        for client in &self.clients {
            if result.is_complete() {
                break;
            }

            let round = client.fetch_tracked_prices().await;

            if round.success_count() == 0 {
                let reason = round
                    .errors
                    .first()
                    .cloned()
                    .unwrap_or_else(|| "no prices returned".to_string());
                warn!("{} produced no prices: {}", client.id(), reason);
                result.errors.push(format!("{} failed: {}", client.id(), reason));
                continue;
            }

            for (asset, price) in round.prices {
                if result.prices.contains_key(&asset) {
                    continue;
                }
                result
                    .prices
                    .insert(asset, PriceQuote::new(asset, price, client.id()));
            }
            result.success_count = result.prices.len();
            debug!(
                "{} answered; {}/{} assets priced",
                client.id(),
                result.success_count,
                result.total_count
            );
            // Any exchange that returned at least one valid price was
            // consulted, even if every quote it gave us was for an
            // asset a higher-priority exchange already owned.
            result.sources_used.push(client.id());
        }

        for asset in Asset::TRACKED {
            if !result.prices.contains_key(&asset) {
                result
                    .errors
                    .push(format!("{}: all sources failed", asset.symbol()));
            }
        }
        result
    }
}

impl Default for PriceAggregator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ExchangeError;
    use crate::models::Asset;
    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Scripted exchange: prices some assets, fails the rest, and
    /// counts how many rounds it was asked for.
    struct MockExchange {
        id: &'static str,
        prices: HashMap<Asset, Decimal>,
        calls: Arc<AtomicUsize>,
    }

    impl MockExchange {
        fn new(id: &'static str, quotes: &[(Asset, Decimal)]) -> (Arc<Self>, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            let client = Arc::new(Self {
                id,
                prices: quotes.iter().copied().collect(),
                calls: Arc::clone(&calls),
            });
            (client, calls)
        }
    }

    #[async_trait]
    impl ExchangeClient for MockExchange {
        fn id(&self) -> &'static str {
            self.id
        }

        async fn fetch_price(&self, asset: Asset) -> Result<Decimal, ExchangeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.prices
                .get(&asset)
                .copied()
                .ok_or_else(|| ExchangeError::Unavailable {
                    exchange: self.id,
                    message: "scripted failure".to_string(),
                })
        }
    }

    fn all_four(base: Decimal) -> Vec<(Asset, Decimal)> {
        vec![
            (Asset::Btc, base),
            (Asset::Eth, base + dec!(1)),
            (Asset::Bnb, base + dec!(2)),
            (Asset::Pol, base + dec!(3)),
        ]
    }

    #[tokio::test]
    async fn test_complete_first_round_skips_lower_priority() {
        let (first, _) = MockExchange::new("First", &all_four(dec!(100)));
        let (second, second_calls) = MockExchange::new("Second", &all_four(dec!(200)));

        let aggregator = PriceAggregator::with_clients(vec![first, second]);
        let result = aggregator.fetch_prices().await;

        assert!(result.is_complete());
        assert_eq!(result.success_count, 4);
        assert!(result.errors.is_empty());
        assert_eq!(result.sources_used, vec!["First"]);
        assert_eq!(second_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_first_source_wins_per_asset() {
        let (first, _) = MockExchange::new("First", &[(Asset::Btc, dec!(65000))]);
        let (second, _) = MockExchange::new("Second", &all_four(dec!(1)));

        let aggregator = PriceAggregator::with_clients(vec![first, second]);
        let result = aggregator.fetch_prices().await;

        assert!(result.is_complete());
        let btc = result.price(Asset::Btc).unwrap();
        assert_eq!(btc.price, dec!(65000));
        assert_eq!(btc.source, "First");
        assert_eq!(result.price(Asset::Eth).unwrap().source, "Second");
        assert_eq!(result.sources_used, vec!["First", "Second"]);
    }

    #[tokio::test]
    async fn test_duplicate_only_round_still_counts_as_consulted() {
        let (first, _) = MockExchange::new(
            "First",
            &[(Asset::Btc, dec!(65000)), (Asset::Eth, dec!(3200))],
        );
        // Answers, but only for an asset the first exchange already owns.
        let (echo, _) = MockExchange::new("Echo", &[(Asset::Btc, dec!(64990))]);
        let (third, _) = MockExchange::new(
            "Third",
            &[(Asset::Bnb, dec!(550)), (Asset::Pol, dec!(0.8))],
        );

        let aggregator = PriceAggregator::with_clients(vec![first, echo, third]);
        let result = aggregator.fetch_prices().await;

        assert!(result.is_complete());
        assert_eq!(result.price(Asset::Btc).unwrap().source, "First");
        assert_eq!(result.sources_used, vec!["First", "Echo", "Third"]);
    }

    #[tokio::test]
    async fn test_total_failure_attributes_one_error_per_exchange() {
        let (dead, _) = MockExchange::new("Dead", &[]);
        let (partial, _) = MockExchange::new(
            "Partial",
            &[
                (Asset::Btc, dec!(65000)),
                (Asset::Eth, dec!(3200)),
                (Asset::Bnb, dec!(550)),
            ],
        );

        let aggregator = PriceAggregator::with_clients(vec![dead, partial]);
        let result = aggregator.fetch_prices().await;

        assert!(!result.is_complete());
        assert_eq!(result.success_count, 3);
        assert_eq!(result.sources_used, vec!["Partial"]);
        // One attributed failure for the dead exchange, one gap entry
        // for the asset nobody priced.
        assert_eq!(result.errors.len(), 2);
        assert!(result.errors[0].starts_with("Dead failed:"));
        assert_eq!(result.errors[1], "POL: all sources failed");
    }

    #[tokio::test]
    async fn test_all_exchanges_down_yields_empty_result() {
        let (a, _) = MockExchange::new("A", &[]);
        let (b, _) = MockExchange::new("B", &[]);

        let aggregator = PriceAggregator::with_clients(vec![a, b]);
        let result = aggregator.fetch_prices().await;

        assert_eq!(result.success_count, 0);
        assert!(result.prices.is_empty());
        assert!(result.sources_used.is_empty());
        // Two exchange failures plus four per-asset gap entries.
        assert_eq!(result.errors.len(), 6);
    }

    #[tokio::test]
    async fn test_empty_client_stack_reports_every_gap() {
        let aggregator = PriceAggregator::with_clients(Vec::new());
        let result = aggregator.fetch_prices().await;

        assert_eq!(result.success_count, 0);
        assert_eq!(result.errors.len(), 4);
    }
}
