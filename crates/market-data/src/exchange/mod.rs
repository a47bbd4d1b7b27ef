//! Exchange client implementations.
//!
//! One thin module per exchange, each translating a tracked asset into
//! that exchange's quote endpoint and normalizing the response to a
//! positive price or a typed [`ExchangeError`]. Clients never retry
//! and never cache - both belong to the caller.

mod binance;
mod coinbase;
mod coingecko;
mod headers;
mod kucoin;
mod traits;

pub use binance::BinanceClient;
pub use coinbase::CoinbaseClient;
pub use coingecko::CoinGeckoClient;
pub use kucoin::KucoinClient;
pub use traits::{ExchangeClient, ExchangeRound};

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::errors::ExchangeError;

/// Parse a raw price string into a positive [`Decimal`].
///
/// A non-numeric value is a malformed response; a non-positive value is
/// an invalid price. Neither is ever coerced to a default.
pub(crate) fn parse_positive_price(
    exchange: &'static str,
    raw: &str,
) -> Result<Decimal, ExchangeError> {
    let price = Decimal::from_str(raw).map_err(|_| ExchangeError::MalformedResponse {
        exchange,
        message: format!("non-numeric price '{raw}'"),
    })?;

    if price <= Decimal::ZERO {
        return Err(ExchangeError::InvalidPrice {
            exchange,
            value: raw.to_string(),
        });
    }

    Ok(price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_positive_price() {
        assert_eq!(
            parse_positive_price("Binance", "65000.12").unwrap(),
            dec!(65000.12)
        );
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        let err = parse_positive_price("Binance", "n/a").unwrap_err();
        assert!(matches!(err, ExchangeError::MalformedResponse { .. }));
    }

    #[test]
    fn test_parse_rejects_non_positive() {
        let err = parse_positive_price("Binance", "0").unwrap_err();
        assert!(matches!(err, ExchangeError::InvalidPrice { .. }));

        let err = parse_positive_price("Binance", "-12.5").unwrap_err();
        assert!(matches!(err, ExchangeError::InvalidPrice { .. }));
    }
}
