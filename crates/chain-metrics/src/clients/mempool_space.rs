//! mempool.space client: fees, projected blocks, difficulty epoch,
//! recent blocks, mining pools and network hashrate.

use reqwest::Client;

use crate::errors::MetricsError;
use crate::http::{build_client, get_json};
use crate::models::{
    BlockSummary, DifficultyAdjustment, HashrateSummary, MempoolBlock, MempoolSnapshot,
    MempoolStats, MiningPools, RecommendedFees,
};

const MEMPOOL_BASE_URL: &str = "https://mempool.space";
const SOURCE: &str = "mempool.space";

/// Recent blocks kept in a snapshot.
const LATEST_BLOCKS_KEPT: usize = 5;

#[derive(Clone)]
pub struct MempoolSpaceClient {
    client: Client,
    base_url: String,
}

impl MempoolSpaceClient {
    pub fn new() -> Self {
        Self::with_base_url(MEMPOOL_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: build_client(),
            base_url: base_url.into(),
        }
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, MetricsError> {
        let url = format!("{}{}", self.base_url, path);
        get_json(&self.client, SOURCE, &url).await
    }

    pub async fn recommended_fees(&self) -> Result<RecommendedFees, MetricsError> {
        self.get("/api/v1/fees/recommended").await
    }

    pub async fn mempool_blocks(&self) -> Result<Vec<MempoolBlock>, MetricsError> {
        self.get("/api/v1/fees/mempool-blocks").await
    }

    pub async fn difficulty_adjustment(&self) -> Result<DifficultyAdjustment, MetricsError> {
        self.get("/api/v1/difficulty-adjustment").await
    }

    pub async fn latest_blocks(&self) -> Result<Vec<BlockSummary>, MetricsError> {
        let mut blocks: Vec<BlockSummary> = self.get("/api/v1/blocks").await?;
        blocks.truncate(LATEST_BLOCKS_KEPT);
        Ok(blocks)
    }

    pub async fn mining_pools(&self) -> Result<MiningPools, MetricsError> {
        self.get("/api/v1/mining/pools/1w").await
    }

    pub async fn hashrate_week(&self) -> Result<HashrateSummary, MetricsError> {
        self.get("/api/v1/mining/hashrate/1w").await
    }

    /// Composite snapshot over five endpoints.
    ///
    /// Each endpoint has its own failure boundary: a failed fetch
    /// leaves its placeholder value and one attributed entry in
    /// `errors`, and the snapshot itself is always returned.
    pub async fn network_snapshot(&self) -> MempoolSnapshot {
        let (fees, blocks, difficulty, latest, pools) = tokio::join!(
            self.recommended_fees(),
            self.mempool_blocks(),
            self.difficulty_adjustment(),
            self.latest_blocks(),
            self.mining_pools(),
        );

        let mut snapshot = MempoolSnapshot::default();

        match fees {
            Ok(fees) => snapshot.fees = fees,
            Err(e) => snapshot.errors.push(format!("recommended fees: {e}")),
        }
        match blocks {
            Ok(blocks) => snapshot.mempool_blocks = blocks,
            Err(e) => snapshot.errors.push(format!("mempool blocks: {e}")),
        }
        match difficulty {
            Ok(difficulty) => snapshot.difficulty = difficulty,
            Err(e) => snapshot.errors.push(format!("difficulty adjustment: {e}")),
        }
        match latest {
            Ok(latest) => snapshot.latest_blocks = latest,
            Err(e) => snapshot.errors.push(format!("latest blocks: {e}")),
        }
        match pools {
            Ok(pools) => snapshot.mining_pools = pools,
            Err(e) => snapshot.errors.push(format!("mining pools: {e}")),
        }

        if !snapshot.errors.is_empty() {
            log::warn!(
                "{} snapshot degraded, {} endpoint(s) failed",
                SOURCE,
                snapshot.errors.len()
            );
        }
        snapshot
    }

    /// Supplementary mining statistics, same failure-boundary shape.
    pub async fn mempool_stats(&self) -> MempoolStats {
        let mut stats = MempoolStats::default();
        match self.hashrate_week().await {
            Ok(hashrate) => stats.hashrate = Some(hashrate),
            Err(e) => stats.errors.push(format!("hashrate: {e}")),
        }
        stats
    }
}

impl Default for MempoolSpaceClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEES_BODY: &str =
        r#"{"fastestFee":22,"halfHourFee":18,"hourFee":12,"economyFee":6,"minimumFee":2}"#;

    const DIFFICULTY_BODY: &str = r#"{
        "progressPercent": 71.3,
        "difficultyChange": 2.1,
        "estimatedRetargetDate": 1700000000000,
        "remainingBlocks": 578,
        "remainingTime": 340000000,
        "timeAvg": 588000
    }"#;

    #[tokio::test]
    async fn test_snapshot_with_all_endpoints_up() {
        let mut server = mockito::Server::new_async().await;
        let _fees = server
            .mock("GET", "/api/v1/fees/recommended")
            .with_body(FEES_BODY)
            .create_async()
            .await;
        let _blocks = server
            .mock("GET", "/api/v1/fees/mempool-blocks")
            .with_body(
                r#"[{"blockSize":1500000,"blockVSize":997000.5,"nTx":3500,"totalFees":12000000,"medianFee":14.2,"feeRange":[1.0,30.0]}]"#,
            )
            .create_async()
            .await;
        let _diff = server
            .mock("GET", "/api/v1/difficulty-adjustment")
            .with_body(DIFFICULTY_BODY)
            .create_async()
            .await;
        let _latest = server
            .mock("GET", "/api/v1/blocks")
            .with_body(
                r#"[
                {"id":"a","height":860005,"timestamp":1700000500,"tx_count":3000,"size":1500000},
                {"id":"b","height":860004,"timestamp":1700000000,"tx_count":2900,"size":1400000},
                {"id":"c","height":860003,"timestamp":1699999500,"tx_count":2800,"size":1300000},
                {"id":"d","height":860002,"timestamp":1699999000,"tx_count":2700,"size":1200000},
                {"id":"e","height":860001,"timestamp":1699998500,"tx_count":2600,"size":1100000},
                {"id":"f","height":860000,"timestamp":1699998000,"tx_count":2500,"size":1000000}
            ]"#,
            )
            .create_async()
            .await;
        let _pools = server
            .mock("GET", "/api/v1/mining/pools/1w")
            .with_body(r#"{"pools":[{"name":"Foundry USA","blockCount":310}]}"#)
            .create_async()
            .await;

        let client = MempoolSpaceClient::with_base_url(server.url());
        let snapshot = client.network_snapshot().await;

        assert!(snapshot.errors.is_empty());
        assert_eq!(snapshot.fees.fastest_fee, 22);
        assert_eq!(snapshot.difficulty.time_avg, Some(588_000));
        // Only the five most recent blocks are kept.
        assert_eq!(snapshot.latest_blocks.len(), 5);
        assert_eq!(snapshot.latest_blocks[0].height, 860_005);
        assert_eq!(snapshot.mining_pools.pools[0].block_count, 310);
    }

    #[tokio::test]
    async fn test_snapshot_falls_back_to_placeholder_fees() {
        let mut server = mockito::Server::new_async().await;
        let _fees = server
            .mock("GET", "/api/v1/fees/recommended")
            .with_status(503)
            .create_async()
            .await;
        let _diff = server
            .mock("GET", "/api/v1/difficulty-adjustment")
            .with_body(DIFFICULTY_BODY)
            .create_async()
            .await;
        let _blocks = server
            .mock("GET", "/api/v1/fees/mempool-blocks")
            .with_body("[]")
            .create_async()
            .await;
        let _latest = server
            .mock("GET", "/api/v1/blocks")
            .with_body("[]")
            .create_async()
            .await;
        let _pools = server
            .mock("GET", "/api/v1/mining/pools/1w")
            .with_body(r#"{"pools":[]}"#)
            .create_async()
            .await;

        let client = MempoolSpaceClient::with_base_url(server.url());
        let snapshot = client.network_snapshot().await;

        assert_eq!(snapshot.fees, RecommendedFees::default());
        assert_eq!(snapshot.errors.len(), 1);
        assert!(snapshot.errors[0].starts_with("recommended fees:"));
        assert_eq!(snapshot.difficulty.progress_percent, 71.3);
    }

    #[tokio::test]
    async fn test_stats_hashrate_failure_is_recorded() {
        let mut server = mockito::Server::new_async().await;
        let _hash = server
            .mock("GET", "/api/v1/mining/hashrate/1w")
            .with_status(500)
            .create_async()
            .await;

        let client = MempoolSpaceClient::with_base_url(server.url());
        let stats = client.mempool_stats().await;

        assert!(stats.hashrate.is_none());
        assert_eq!(stats.errors.len(), 1);
        assert_eq!(stats.current_hashrate_ehs(), None);
    }
}
