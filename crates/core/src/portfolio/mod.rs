//! Portfolio holdings and valuation against an aggregation round.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use blockdash_market_data::{AggregationResult, Asset};

/// One valued position.
#[derive(Clone, Debug, Serialize)]
pub struct PositionValue {
    pub asset: Asset,
    pub quantity: Decimal,
    pub price: Decimal,
    pub value: Decimal,
    pub source: &'static str,
}

/// A portfolio valued against one aggregation round.
///
/// Assets whose price was absent from the round are listed in
/// `missing` and excluded from `total`; their value is never guessed.
#[derive(Clone, Debug, Default, Serialize)]
pub struct PortfolioValuation {
    pub positions: Vec<PositionValue>,
    pub total: Decimal,
    pub missing: Vec<Asset>,
}

/// Tracked-asset holdings with explicit ownership, no ambient state.
pub struct PortfolioStore {
    holdings: RwLock<HashMap<Asset, Decimal>>,
}

fn default_holdings() -> HashMap<Asset, Decimal> {
    HashMap::from([
        (Asset::Btc, dec!(0.9997)),
        (Asset::Eth, dec!(9.9983)),
        (Asset::Bnb, dec!(29.5623)),
        (Asset::Pol, dec!(4986.01)),
    ])
}

impl PortfolioStore {
    /// A store seeded with the default demo holdings.
    pub fn new() -> Self {
        Self {
            holdings: RwLock::new(default_holdings()),
        }
    }

    pub fn holdings(&self) -> HashMap<Asset, Decimal> {
        self.holdings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set_holding(&self, asset: Asset, quantity: Decimal) {
        self.holdings
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(asset, quantity);
    }

    pub fn reset_to_default(&self) {
        *self
            .holdings
            .write()
            .unwrap_or_else(PoisonError::into_inner) = default_holdings();
    }

    pub fn clear(&self) {
        self.holdings
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Value the holdings against one aggregation round.
    ///
    /// Iterates in tracked-asset order so the output is deterministic.
    pub fn value(&self, prices: &AggregationResult) -> PortfolioValuation {
        let holdings = self.holdings();
        let mut valuation = PortfolioValuation::default();

        for asset in Asset::TRACKED {
            let quantity = match holdings.get(&asset) {
                Some(&quantity) if !quantity.is_zero() => quantity,
                _ => continue,
            };
            match prices.price(asset) {
                Some(quote) => {
                    let value = quantity * quote.price;
                    valuation.total += value;
                    valuation.positions.push(PositionValue {
                        asset,
                        quantity,
                        price: quote.price,
                        value,
                        source: quote.source,
                    });
                }
                None => valuation.missing.push(asset),
            }
        }
        valuation
    }
}

impl Default for PortfolioStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockdash_market_data::PriceQuote;

    fn round_with(entries: &[(Asset, Decimal)]) -> AggregationResult {
        let mut result = AggregationResult::empty();
        for &(asset, price) in entries {
            result
                .prices
                .insert(asset, PriceQuote::new(asset, price, "Test"));
        }
        result.success_count = result.prices.len();
        result
    }

    #[test]
    fn test_default_holdings_valued_in_tracked_order() {
        let store = PortfolioStore::new();
        let prices = round_with(&[
            (Asset::Btc, dec!(65000)),
            (Asset::Eth, dec!(3200)),
            (Asset::Bnb, dec!(550)),
            (Asset::Pol, dec!(0.8)),
        ]);

        let valuation = store.value(&prices);

        assert_eq!(valuation.positions.len(), 4);
        assert!(valuation.missing.is_empty());
        assert_eq!(valuation.positions[0].asset, Asset::Btc);
        assert_eq!(valuation.positions[0].value, dec!(64980.5));
        let expected = dec!(64980.5)
            + dec!(9.9983) * dec!(3200)
            + dec!(29.5623) * dec!(550)
            + dec!(4986.01) * dec!(0.8);
        assert_eq!(valuation.total, expected);
    }

    #[test]
    fn test_absent_prices_are_reported_not_guessed() {
        let store = PortfolioStore::new();
        let prices = round_with(&[(Asset::Btc, dec!(65000)), (Asset::Eth, dec!(3200))]);

        let valuation = store.value(&prices);

        assert_eq!(valuation.positions.len(), 2);
        assert_eq!(valuation.missing, vec![Asset::Bnb, Asset::Pol]);
        assert_eq!(
            valuation.total,
            dec!(0.9997) * dec!(65000) + dec!(9.9983) * dec!(3200)
        );
    }

    #[test]
    fn test_zero_and_cleared_holdings_are_skipped() {
        let store = PortfolioStore::new();
        store.set_holding(Asset::Btc, Decimal::ZERO);

        let prices = round_with(&[(Asset::Btc, dec!(65000))]);
        let valuation = store.value(&prices);
        assert!(valuation.positions.is_empty());

        store.clear();
        assert!(store.holdings().is_empty());
        let valuation = store.value(&prices);
        assert!(valuation.positions.is_empty());
        assert!(valuation.missing.is_empty());
    }

    #[test]
    fn test_reset_restores_defaults() {
        let store = PortfolioStore::new();
        store.clear();
        store.reset_to_default();
        assert_eq!(store.holdings().get(&Asset::Pol), Some(&dec!(4986.01)));
    }
}
