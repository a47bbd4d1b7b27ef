use rust_decimal::Decimal;
use serde::Serialize;

use super::asset::Asset;

/// A single source-attributed spot price.
///
/// Created fresh on every aggregation round and discarded with the
/// containing [`AggregationResult`](super::AggregationResult); never
/// persisted.
#[derive(Clone, Debug, Serialize)]
pub struct PriceQuote {
    /// The tracked asset this quote prices
    pub asset: Asset,

    /// Spot price in USD, always positive
    pub price: Decimal,

    /// Name of the exchange that supplied the price
    pub source: &'static str,
}

impl PriceQuote {
    pub fn new(asset: Asset, price: Decimal, source: &'static str) -> Self {
        Self {
            asset,
            price,
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_quote_new() {
        let quote = PriceQuote::new(Asset::Btc, dec!(65000), "Binance");
        assert_eq!(quote.asset, Asset::Btc);
        assert_eq!(quote.price, dec!(65000));
        assert_eq!(quote.source, "Binance");
    }
}
