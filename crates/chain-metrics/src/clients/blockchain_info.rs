//! blockchain.info client: simple numeric queries and chart series.

use reqwest::Client;

use crate::errors::MetricsError;
use crate::http::{build_client, get_json};
use crate::models::{ChainBasics, ChartKind, ChartSeries};

const QUERY_BASE_URL: &str = "https://blockchain.info";
const CHARTS_BASE_URL: &str = "https://api.blockchain.info";
const SOURCE: &str = "Blockchain.info";

/// Timespan requested for every chart series.
const CHART_TIMESPAN: &str = "1weeks";

/// Client for the blockchain.info `/q/` and `/charts/` endpoints.
///
/// The simple queries return bare numeric text bodies, not JSON.
#[derive(Clone)]
pub struct BlockchainInfoClient {
    client: Client,
    query_base: String,
    charts_base: String,
}

impl BlockchainInfoClient {
    pub fn new() -> Self {
        Self {
            client: build_client(),
            query_base: QUERY_BASE_URL.to_string(),
            charts_base: CHARTS_BASE_URL.to_string(),
        }
    }

    /// Point both endpoint families at one base, for mock servers.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base = base_url.into();
        Self {
            client: build_client(),
            query_base: base.clone(),
            charts_base: base,
        }
    }

    /// Fetch one `/q/` endpoint's plain-text numeric body.
    async fn query_numeric(&self, endpoint: &'static str) -> Result<f64, MetricsError> {
        let url = format!("{}/q/{}", self.query_base, endpoint);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(MetricsError::Status {
                origin: SOURCE,
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        body.trim().parse().map_err(|_| MetricsError::Parse {
            origin: SOURCE,
            message: format!("{} returned non-numeric body '{}'", endpoint, body.trim()),
        })
    }

    /// Fetch the basic chain facts.
    ///
    /// The four queries run concurrently and fail independently. Only
    /// a round in which every query failed is reported as an error.
    pub async fn chain_basics(&self) -> Result<ChainBasics, MetricsError> {
        let (difficulty, reward, count, supply) = tokio::join!(
            self.query_numeric("getdifficulty"),
            self.query_numeric("bcperblock"),
            self.query_numeric("getblockcount"),
            self.query_numeric("totalbc"),
        );

        let basics = ChainBasics {
            difficulty: log_discard("getdifficulty", difficulty),
            block_reward_btc: log_discard("bcperblock", reward),
            block_count: log_discard("getblockcount", count).map(|v| v as u64),
            total_supply_sats: log_discard("totalbc", supply),
        };

        if basics.is_empty() {
            return Err(MetricsError::Parse {
                origin: SOURCE,
                message: "every simple query failed".to_string(),
            });
        }
        Ok(basics)
    }

    /// Fetch one chart series over the standard timespan.
    pub async fn chart(&self, kind: ChartKind) -> Result<ChartSeries, MetricsError> {
        let url = format!(
            "{}/charts/{}?timespan={}&format=json",
            self.charts_base,
            kind.slug(),
            CHART_TIMESPAN
        );
        let series: ChartSeries = get_json(&self.client, SOURCE, &url).await?;

        if series.values.is_empty() {
            return Err(MetricsError::MissingField {
                origin: SOURCE,
                field: "values",
            });
        }
        Ok(series)
    }
}

impl Default for BlockchainInfoClient {
    fn default() -> Self {
        Self::new()
    }
}

fn log_discard(endpoint: &str, result: Result<f64, MetricsError>) -> Option<f64> {
    match result {
        Ok(v) => Some(v),
        Err(e) => {
            log::debug!("{} {} failed: {}", SOURCE, endpoint, e);
            None
        }
    }
}
