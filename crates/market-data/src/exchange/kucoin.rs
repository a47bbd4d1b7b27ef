//! KuCoin level-1 orderbook client.
//!
//! KuCoin wraps every payload in an envelope with an application-level
//! `code`; anything other than `"200000"` is a failure even when the
//! HTTP status is 200.

use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::headers::build_client;
use super::{parse_positive_price, ExchangeClient};
use crate::errors::ExchangeError;
use crate::models::Asset;

const KUCOIN_BASE_URL: &str = "https://api.kucoin.com";
const EXCHANGE_ID: &str = "KuCoin";
const SUCCESS_CODE: &str = "200000";

#[derive(Debug, Deserialize)]
struct Level1Envelope {
    code: String,
    msg: Option<String>,
    data: Option<Level1Ticker>,
}

#[derive(Debug, Deserialize)]
struct Level1Ticker {
    price: String,
}

/// Client for `GET /api/v1/market/orderbook/level1`.
#[derive(Clone)]
pub struct KucoinClient {
    client: Client,
    base_url: String,
}

impl KucoinClient {
    pub fn new() -> Self {
        Self::with_base_url(KUCOIN_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: build_client(),
            base_url: base_url.into(),
        }
    }

    // POL still trades under its pre-rebrand MATIC ticker here.
    fn pair(asset: Asset) -> &'static str {
        match asset {
            Asset::Btc => "BTC-USDT",
            Asset::Eth => "ETH-USDT",
            Asset::Bnb => "BNB-USDT",
            Asset::Pol => "MATIC-USDT",
        }
    }
}

impl Default for KucoinClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExchangeClient for KucoinClient {
    fn id(&self) -> &'static str {
        EXCHANGE_ID
    }

    async fn fetch_price(&self, asset: Asset) -> Result<Decimal, ExchangeError> {
        let url = format!(
            "{}/api/v1/market/orderbook/level1?symbol={}",
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

        let envelope: Level1Envelope =
            response
                .json()
                .await
                .map_err(|e| ExchangeError::MalformedResponse {
                    exchange: EXCHANGE_ID,
                    message: e.to_string(),
                })?;

        if envelope.code != SUCCESS_CODE {
            return Err(ExchangeError::Unavailable {
                exchange: EXCHANGE_ID,
                message: envelope
                    .msg
                    .unwrap_or_else(|| format!("API code {}", envelope.code)),
            });
        }

        let ticker = envelope
            .data
            .ok_or_else(|| ExchangeError::MalformedResponse {
                exchange: EXCHANGE_ID,
                message: "no data in level1 response".to_string(),
            })?;

        parse_positive_price(EXCHANGE_ID, &ticker.price)
    }
}
