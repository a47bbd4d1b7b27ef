//! Bitfinex candle client for weekly BTC/USD OHLC history.
//!
//! Weekly candles cap at 120 per request, so the full history from
//! 2013 is walked in batches: each request starts one week after the
//! previous batch's last candle, until the walk reaches the present
//! or the request budget runs out.

use reqwest::Client;
use std::time::Duration;

use chrono::Utc;

use crate::errors::MetricsError;
use crate::http::{build_client, get_json};
use crate::models::{Candle, OhlcHistory};

const BITFINEX_BASE_URL: &str = "https://api-pub.bitfinex.com";
const SOURCE: &str = "Bitfinex";

const SYMBOL: &str = "tBTCUSD";
const TIMEFRAME: &str = "7D";

/// 2013-01-01T00:00:00Z, when BTC trading began on major exchanges.
const HISTORY_START_MS: i64 = 1_356_998_400_000;

/// Bitfinex maximum for weekly candles per request.
const BATCH_LIMIT: u32 = 120;

/// Requests allowed per full history walk. Six batches of 120 weekly
/// candles cover 2013 to present with headroom.
const MAX_BATCH_REQUESTS: usize = 6;

const WEEK_MS: i64 = 7 * 24 * 60 * 60 * 1000;

/// Pause between batch requests.
const BATCH_DELAY: Duration = Duration::from_millis(200);

// Candles arrive as bare arrays: [ts, open, close, high, low, volume].
type WireCandle = (i64, f64, f64, f64, f64, f64);

#[derive(Clone)]
pub struct BitfinexClient {
    client: Client,
    base_url: String,
}

impl BitfinexClient {
    pub fn new() -> Self {
        Self::with_base_url(BITFINEX_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: build_client(),
            base_url: base_url.into(),
        }
    }

    /// Fetch one batch of weekly candles, oldest first.
    pub async fn candles_batch(
        &self,
        start_ms: i64,
        limit: u32,
    ) -> Result<Vec<Candle>, MetricsError> {
        let url = format!(
            "{}/v2/candles/trade:{}:{}/hist?limit={}&sort=1&start={}",
            self.base_url, TIMEFRAME, SYMBOL, limit, start_ms
        );
        let wire: Vec<WireCandle> = get_json(&self.client, SOURCE, &url).await?;

        Ok(wire
            .into_iter()
            .map(|(timestamp_ms, open, close, high, low, volume)| Candle {
                timestamp_ms,
                open,
                close,
                high,
                low,
                volume,
            })
            .collect())
    }

    /// Walk the full weekly history from 2013 to the present.
    ///
    /// A failed batch ends the walk; whatever was collected so far is
    /// still returned, so a transient upstream error degrades the tail
    /// of the series instead of losing all of it.
    pub async fn btc_ohlc_history(&self) -> Result<OhlcHistory, MetricsError> {
        let mut candles: Vec<Candle> = Vec::new();
        let mut start_ms = HISTORY_START_MS;
        let mut requests_made = 0;
        let now_ms = Utc::now().timestamp_millis();

        while requests_made < MAX_BATCH_REQUESTS {
            let batch = match self.candles_batch(start_ms, BATCH_LIMIT).await {
                Ok(batch) => batch,
                Err(e) if candles.is_empty() => return Err(e),
                Err(e) => {
                    log::warn!("{} history walk stopped early: {}", SOURCE, e);
                    break;
                }
            };
            requests_made += 1;

            let last_ts = match batch.last() {
                Some(candle) => candle.timestamp_ms,
                None => break,
            };
            log::debug!(
                "{} batch {}: {} candles up to {}",
                SOURCE,
                requests_made,
                batch.len(),
                last_ts
            );
            candles.extend(batch);

            start_ms = last_ts + WEEK_MS;
            if start_ms >= now_ms {
                break;
            }
            tokio::time::sleep(BATCH_DELAY).await;
        }

        candles.sort_by_key(|c| c.timestamp_ms);
        candles.dedup_by_key(|c| c.timestamp_ms);

        Ok(OhlcHistory {
            candles,
            requests_made,
        })
    }
}

impl Default for BitfinexClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    #[tokio::test]
    async fn test_batch_parses_bare_array_candles() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/v2/candles/trade:7D:tBTCUSD/hist")
            .match_query(Matcher::Any)
            .with_body(
                r#"[
                    [1356998400000, 13.5, 13.8, 14.0, 13.2, 120000.0],
                    [1357603200000, 13.8, 14.1, 14.5, 13.6, 98000.0]
                ]"#,
            )
            .create_async()
            .await;

        let client = BitfinexClient::with_base_url(server.url());
        let batch = client.candles_batch(HISTORY_START_MS, 120).await.unwrap();

        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].timestamp_ms, 1_356_998_400_000);
        assert_eq!(batch[0].open, 13.5);
        assert_eq!(batch[1].high, 14.5);
    }

    #[tokio::test]
    async fn test_history_walk_stops_on_empty_batch_and_dedups() {
        let mut server = mockito::Server::new_async().await;
        // First request returns two overlapping candles, the second
        // request (new start) returns nothing.
        let _first = server
            .mock("GET", "/v2/candles/trade:7D:tBTCUSD/hist")
            .match_query(Matcher::Regex(format!("start={HISTORY_START_MS}")))
            .with_body(
                r#"[
                    [1356998400000, 13.5, 13.8, 14.0, 13.2, 120000.0],
                    [1356998400000, 13.5, 13.8, 14.0, 13.2, 120000.0],
                    [1357603200000, 13.8, 14.1, 14.5, 13.6, 98000.0]
                ]"#,
            )
            .create_async()
            .await;
        let _rest = server
            .mock("GET", "/v2/candles/trade:7D:tBTCUSD/hist")
            .match_query(Matcher::Regex("start=1358208000000".to_string()))
            .with_body("[]")
            .create_async()
            .await;

        let client = BitfinexClient::with_base_url(server.url());
        let history = client.btc_ohlc_history().await.unwrap();

        assert_eq!(history.candles.len(), 2);
        assert_eq!(history.requests_made, 2);
        assert_eq!(
            history.first_date().unwrap().to_rfc3339(),
            "2013-01-01T00:00:00+00:00"
        );
    }

    #[tokio::test]
    async fn test_history_fails_only_when_nothing_was_collected() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/v2/candles/trade:7D:tBTCUSD/hist")
            .match_query(Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let client = BitfinexClient::with_base_url(server.url());
        let err = client.btc_ohlc_history().await.unwrap_err();
        assert!(matches!(err, MetricsError::Status { status: 500, .. }));
    }
}
