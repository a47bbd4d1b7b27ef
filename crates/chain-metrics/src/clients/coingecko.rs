//! CoinGecko market-data client: multi-currency BTC snapshot, USD
//! spot price and global market totals.

use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;

use crate::errors::MetricsError;
use crate::http::{build_client, get_json};
use crate::models::{GlobalMarket, MarketSnapshot, SpotPrice};

const COINGECKO_BASE_URL: &str = "https://api.coingecko.com";
const SOURCE: &str = "CoinGecko";

#[derive(Debug, Deserialize)]
struct BtcEntry {
    usd: Option<f64>,
    eur: Option<f64>,
    gbp: Option<f64>,
    inr: Option<f64>,
    usd_market_cap: Option<f64>,
    usd_24h_vol: Option<f64>,
    usd_24h_change: Option<f64>,
    last_updated_at: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct GlobalEnvelope {
    data: GlobalData,
}

#[derive(Debug, Deserialize)]
struct GlobalData {
    total_market_cap: HashMap<String, f64>,
    total_volume: HashMap<String, f64>,
    market_cap_percentage: HashMap<String, f64>,
    #[serde(default)]
    active_cryptocurrencies: u64,
    #[serde(default)]
    markets: u64,
}

#[derive(Clone)]
pub struct CoinGeckoMarketsClient {
    client: Client,
    base_url: String,
}

impl CoinGeckoMarketsClient {
    pub fn new() -> Self {
        Self::with_base_url(COINGECKO_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: build_client(),
            base_url: base_url.into(),
        }
    }

    async fn simple_price(&self, params: &str) -> Result<BtcEntry, MetricsError> {
        let url = format!(
            "{}/api/v3/simple/price?ids=bitcoin&{}",
            self.base_url, params
        );
        let mut response: HashMap<String, BtcEntry> =
            get_json(&self.client, SOURCE, &url).await?;
        response.remove("bitcoin").ok_or(MetricsError::MissingField {
            origin: SOURCE,
            field: "bitcoin",
        })
    }

    /// Fetch the plain USD spot price.
    pub async fn spot_price(&self) -> Result<SpotPrice, MetricsError> {
        let entry = self.simple_price("vs_currencies=usd").await?;
        let usd = entry.usd.ok_or(MetricsError::MissingField {
            origin: SOURCE,
            field: "usd",
        })?;
        Ok(SpotPrice { usd, source: SOURCE })
    }

    /// Fetch the full multi-currency snapshot with market cap, volume
    /// and 24h change.
    pub async fn market_snapshot(&self) -> Result<MarketSnapshot, MetricsError> {
        let entry = self
            .simple_price(
                "vs_currencies=usd,eur,gbp,inr\
                 &include_market_cap=true\
                 &include_24hr_vol=true\
                 &include_24hr_change=true\
                 &include_last_updated_at=true",
            )
            .await?;

        Ok(MarketSnapshot {
            price_usd: entry.usd,
            price_eur: entry.eur,
            price_gbp: entry.gbp,
            price_inr: entry.inr,
            market_cap_usd: entry.usd_market_cap,
            volume_24h_usd: entry.usd_24h_vol,
            change_24h_pct: entry.usd_24h_change,
            last_updated_at: entry.last_updated_at,
        })
    }

    /// Fetch global market totals and BTC dominance.
    pub async fn global_market(&self) -> Result<GlobalMarket, MetricsError> {
        let url = format!("{}/api/v3/global", self.base_url);
        let envelope: GlobalEnvelope = get_json(&self.client, SOURCE, &url).await?;
        let data = envelope.data;

        Ok(GlobalMarket {
            total_market_cap_usd: data.total_market_cap.get("usd").copied().unwrap_or(0.0),
            total_volume_24h_usd: data.total_volume.get("usd").copied().unwrap_or(0.0),
            btc_dominance_pct: data.market_cap_percentage.get("btc").copied().unwrap_or(0.0),
            active_cryptocurrencies: data.active_cryptocurrencies,
            markets: data.markets,
        })
    }
}

impl Default for CoinGeckoMarketsClient {
    fn default() -> Self {
        Self::new()
    }
}
