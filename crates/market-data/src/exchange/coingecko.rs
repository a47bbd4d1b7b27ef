//! CoinGecko simple-price client, the terminal fallback.
//!
//! CoinGecko is the most available source but the least
//! exchange-specific, so it sits last in the priority order. Unlike
//! the exchanges it can quote every tracked asset in one batched
//! request, so the tracked-prices round overrides the default
//! per-asset fan-out.

use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

use super::headers::build_client;
use super::{ExchangeClient, ExchangeRound};
use crate::errors::ExchangeError;
use crate::models::Asset;

const COINGECKO_BASE_URL: &str = "https://api.coingecko.com";
const EXCHANGE_ID: &str = "CoinGecko";

#[derive(Debug, Deserialize)]
struct VsPrices {
    usd: Option<f64>,
}

type SimplePriceResponse = HashMap<String, VsPrices>;

/// Client for `GET /api/v3/simple/price`.
#[derive(Clone)]
pub struct CoinGeckoClient {
    client: Client,
    base_url: String,
}

impl CoinGeckoClient {
    pub fn new() -> Self {
        Self::with_base_url(COINGECKO_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: build_client(),
            base_url: base_url.into(),
        }
    }

    fn coin_id(asset: Asset) -> &'static str {
        match asset {
            Asset::Btc => "bitcoin",
            Asset::Eth => "ethereum",
            Asset::Bnb => "binancecoin",
            Asset::Pol => "polygon",
        }
    }

    async fn simple_price(&self, ids: &str) -> Result<SimplePriceResponse, ExchangeError> {
        let url = format!(
            "{}/api/v3/simple/price?ids={}&vs_currencies=usd",
            self.base_url, ids
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

        response
            .json()
            .await
            .map_err(|e| ExchangeError::MalformedResponse {
                exchange: EXCHANGE_ID,
                message: e.to_string(),
            })
    }

    fn extract_price(
        data: &SimplePriceResponse,
        asset: Asset,
    ) -> Result<Decimal, ExchangeError> {
        let usd = data
            .get(Self::coin_id(asset))
            .and_then(|vs| vs.usd)
            .ok_or_else(|| ExchangeError::MalformedResponse {
                exchange: EXCHANGE_ID,
                message: format!("{} missing from response", asset.symbol()),
            })?;

        if usd <= 0.0 {
            return Err(ExchangeError::InvalidPrice {
                exchange: EXCHANGE_ID,
                value: usd.to_string(),
            });
        }

        Decimal::from_f64(usd).ok_or_else(|| ExchangeError::InvalidPrice {
            exchange: EXCHANGE_ID,
            value: usd.to_string(),
        })
    }
}

impl Default for CoinGeckoClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExchangeClient for CoinGeckoClient {
    fn id(&self) -> &'static str {
        EXCHANGE_ID
    }

    async fn fetch_price(&self, asset: Asset) -> Result<Decimal, ExchangeError> {
        let data = self.simple_price(Self::coin_id(asset)).await?;
        Self::extract_price(&data, asset)
    }

    /// One batched request for all four tracked assets.
    async fn fetch_tracked_prices(&self) -> ExchangeRound {
        let ids = Asset::TRACKED
            .iter()
            .map(|&a| Self::coin_id(a))
            .collect::<Vec<_>>()
            .join(",");

        let mut round = ExchangeRound::new();
        let data = match self.simple_price(&ids).await {
            Ok(data) => data,
            Err(e) => {
                log::debug!("{} batched fetch failed: {}", EXCHANGE_ID, e);
                for asset in Asset::TRACKED {
                    round.errors.push(format!("{}: {}", asset.symbol(), e));
                }
                return round;
            }
        };

        for asset in Asset::TRACKED {
            match Self::extract_price(&data, asset) {
                Ok(price) => {
                    round.prices.insert(asset, price);
                }
                Err(e) => round.errors.push(format!("{}: {}", asset.symbol(), e)),
            }
        }
        round
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use rust_decimal_macros::dec;

    fn full_body() -> &'static str {
        r#"{
            "bitcoin": {"usd": 65000.0},
            "ethereum": {"usd": 3200.0},
            "binancecoin": {"usd": 550.0},
            "polygon": {"usd": 0.8}
        }"#
    }

    #[tokio::test]
    async fn test_batched_round_fills_all_assets() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/v3/simple/price")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded(
                    "ids".into(),
                    "bitcoin,ethereum,binancecoin,polygon".into(),
                ),
                Matcher::UrlEncoded("vs_currencies".into(), "usd".into()),
            ]))
            .with_status(200)
            .with_body(full_body())
            .create_async()
            .await;

        let client = CoinGeckoClient::with_base_url(server.url());
        let round = client.fetch_tracked_prices().await;

        assert_eq!(round.success_count(), 4);
        assert!(round.errors.is_empty());
        assert_eq!(round.prices[&Asset::Pol], dec!(0.8));
    }

    #[tokio::test]
    async fn test_missing_id_is_a_per_asset_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/v3/simple/price")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"bitcoin": {"usd": 65000.0}}"#)
            .create_async()
            .await;

        let client = CoinGeckoClient::with_base_url(server.url());
        let round = client.fetch_tracked_prices().await;

        assert_eq!(round.success_count(), 1);
        assert_eq!(round.errors.len(), 3);
    }

    #[tokio::test]
    async fn test_non_positive_usd_is_invalid() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/v3/simple/price")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"bitcoin": {"usd": 0.0}}"#)
            .create_async()
            .await;

        let client = CoinGeckoClient::with_base_url(server.url());
        let err = client.fetch_price(Asset::Btc).await.unwrap_err();

        assert!(matches!(err, ExchangeError::InvalidPrice { .. }));
    }
}
