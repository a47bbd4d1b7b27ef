//! Coinbase Exchange product ticker client.
//!
//! Coinbase does not list BNB, so that asset is reported as
//! unavailable without issuing a request; the round still records the
//! gap so downstream fallback can fill it from another source.

use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::headers::build_client;
use super::{parse_positive_price, ExchangeClient};
use crate::errors::ExchangeError;
use crate::models::Asset;

const COINBASE_BASE_URL: &str = "https://api.exchange.coinbase.com";
const EXCHANGE_ID: &str = "Coinbase";

#[derive(Debug, Deserialize)]
struct ProductTicker {
    price: String,
}

/// Client for `GET /products/<pair>/ticker`.
#[derive(Clone)]
pub struct CoinbaseClient {
    client: Client,
    base_url: String,
}

impl CoinbaseClient {
    pub fn new() -> Self {
        Self::with_base_url(COINBASE_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: build_client(),
            base_url: base_url.into(),
        }
    }

    fn pair(asset: Asset) -> Option<&'static str> {
        match asset {
            Asset::Btc => Some("BTC-USD"),
            Asset::Eth => Some("ETH-USD"),
            Asset::Bnb => None,
            Asset::Pol => Some("MATIC-USD"),
        }
    }
}

impl Default for CoinbaseClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExchangeClient for CoinbaseClient {
    fn id(&self) -> &'static str {
        EXCHANGE_ID
    }

    async fn fetch_price(&self, asset: Asset) -> Result<Decimal, ExchangeError> {
        let pair = Self::pair(asset).ok_or_else(|| ExchangeError::Unavailable {
            exchange: EXCHANGE_ID,
            message: format!("{} is not listed on Coinbase", asset.symbol()),
        })?;

        let url = format!("{}/products/{}/ticker", self.base_url, pair);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ExchangeError::from_reqwest(EXCHANGE_ID, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExchangeError::HttpStatus {
                exchange: EXCHANGE_ID,
                status: status.as_u16(),
            });
        }

        let ticker: ProductTicker =
            response
                .json()
                .await
                .map_err(|e| ExchangeError::MalformedResponse {
                    exchange: EXCHANGE_ID,
                    message: e.to_string(),
                })?;

        parse_positive_price(EXCHANGE_ID, &ticker.price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_fetch_price_parses_ticker() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/products/ETH-USD/ticker")
            .with_status(200)
            .with_body(r#"{"trade_id":1,"price":"3201.44","size":"0.01"}"#)
            .create_async()
            .await;

        let client = CoinbaseClient::with_base_url(server.url());
        let price = client.fetch_price(Asset::Eth).await.unwrap();

        assert_eq!(price, dec!(3201.44));
    }

    #[tokio::test]
    async fn test_bnb_is_unavailable_without_a_request() {
        // No mock server at all: the BNB gap must be decided locally.
        let client = CoinbaseClient::with_base_url("http://127.0.0.1:0");
        let err = client.fetch_price(Asset::Bnb).await.unwrap_err();

        match err {
            ExchangeError::Unavailable { message, .. } => {
                assert!(message.contains("BNB"));
            }
            other => panic!("expected Unavailable, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_round_reports_bnb_gap() {
        let mut server = mockito::Server::new_async().await;
        for pair in ["BTC-USD", "ETH-USD", "MATIC-USD"] {
            server
                .mock("GET", format!("/products/{pair}/ticker").as_str())
                .with_status(200)
                .with_body(r#"{"price":"42.0"}"#)
                .create_async()
                .await;
        }

        let client = CoinbaseClient::with_base_url(server.url());
        let round = client.fetch_tracked_prices().await;

        assert_eq!(round.success_count(), 3);
        assert!(!round.prices.contains_key(&Asset::Bnb));
        assert_eq!(round.errors.len(), 1);
        assert!(round.errors[0].starts_with("BNB:"));
    }
}
