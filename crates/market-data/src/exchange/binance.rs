//! Binance spot ticker client.

use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::headers::build_client;
use super::{parse_positive_price, ExchangeClient};
use crate::errors::ExchangeError;
use crate::models::Asset;

const BINANCE_BASE_URL: &str = "https://api.binance.com";
const EXCHANGE_ID: &str = "Binance";

#[derive(Debug, Deserialize)]
struct TickerPrice {
    price: String,
}

/// Client for `GET /api/v3/ticker/price`.
#[derive(Clone)]
pub struct BinanceClient {
    client: Client,
    base_url: String,
}

impl BinanceClient {
    pub fn new() -> Self {
        Self::with_base_url(BINANCE_BASE_URL)
    }

    /// Point the client at a different host, e.g. a mock server.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: build_client(),
            base_url: base_url.into(),
        }
    }

    fn pair(asset: Asset) -> &'static str {
        match asset {
            Asset::Btc => "BTCUSDT",
            Asset::Eth => "ETHUSDT",
            Asset::Bnb => "BNBUSDT",
            Asset::Pol => "POLUSDT",
        }
    }
}

impl Default for BinanceClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExchangeClient for BinanceClient {
    fn id(&self) -> &'static str {
        EXCHANGE_ID
    }

    async fn fetch_price(&self, asset: Asset) -> Result<Decimal, ExchangeError> {
        let url = format!(
            "{}/api/v3/ticker/price?symbol={}",
            self.base_url,
            Self::pair(asset)
        );

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

        let ticker: TickerPrice =
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
