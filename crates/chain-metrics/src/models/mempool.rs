//! Mempool and mining models, shaped after the mempool.space wire
//! formats.

use serde::{Deserialize, Serialize};

/// Recommended fee tiers in sat/vB.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedFees {
    pub fastest_fee: u64,
    pub half_hour_fee: u64,
    pub hour_fee: u64,
    pub economy_fee: u64,
    pub minimum_fee: u64,
}

impl Default for RecommendedFees {
    /// Conservative placeholder tiers used when the fee endpoint is
    /// unreachable.
    fn default() -> Self {
        Self {
            fastest_fee: 15,
            half_hour_fee: 12,
            hour_fee: 8,
            economy_fee: 5,
            minimum_fee: 1,
        }
    }
}

/// One projected mempool block.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MempoolBlock {
    pub block_size: u64,
    #[serde(rename = "blockVSize")]
    pub block_vsize: f64,
    pub n_tx: u64,
    pub total_fees: u64,
    pub median_fee: f64,
    #[serde(default)]
    pub fee_range: Vec<f64>,
}

/// Current difficulty epoch progress.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyAdjustment {
    pub progress_percent: f64,
    pub difficulty_change: f64,
    pub estimated_retarget_date: i64,
    pub remaining_blocks: u64,
    pub remaining_time: i64,
    /// Observed average block interval in milliseconds.
    pub time_avg: Option<i64>,
}

impl Default for DifficultyAdjustment {
    /// Neutral placeholder used when the endpoint is unreachable.
    fn default() -> Self {
        Self {
            progress_percent: 50.0,
            difficulty_change: 0.0,
            estimated_retarget_date: 0,
            remaining_blocks: 1000,
            remaining_time: 604_800,
            time_avg: None,
        }
    }
}

/// One mined block from the recent-blocks listing.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BlockSummary {
    pub id: String,
    pub height: u64,
    pub timestamp: i64,
    pub tx_count: u64,
    pub size: u64,
}

/// One mining pool's share of recent blocks.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MiningPool {
    pub name: String,
    pub block_count: u64,
}

/// Mining pool distribution over the lookback window.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MiningPools {
    #[serde(default)]
    pub pools: Vec<MiningPool>,
}

/// One network hashrate sample.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HashratePoint {
    pub timestamp: i64,
    pub avg_hashrate: f64,
}

/// Network hashrate over the lookback window, raw units as served.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HashrateSummary {
    #[serde(default)]
    pub hashrates: Vec<HashratePoint>,
    pub current_hashrate: f64,
    pub current_difficulty: f64,
}

/// Composite mempool snapshot.
///
/// Each constituent endpoint is fetched inside its own failure
/// boundary; a failed endpoint leaves its placeholder value and one
/// entry in `errors`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MempoolSnapshot {
    pub fees: RecommendedFees,
    pub mempool_blocks: Vec<MempoolBlock>,
    pub difficulty: DifficultyAdjustment,
    pub latest_blocks: Vec<BlockSummary>,
    pub mining_pools: MiningPools,
    pub errors: Vec<String>,
}

/// Supplementary mining statistics.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MempoolStats {
    pub hashrate: Option<HashrateSummary>,
    pub errors: Vec<String>,
}

impl MempoolStats {
    /// Current network hashrate normalized to EH/s.
    pub fn current_hashrate_ehs(&self) -> Option<f64> {
        self.hashrate
            .as_ref()
            .map(|h| crate::units::normalize_hashrate_ehs(h.current_hashrate).0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_fees_are_the_placeholder_tiers() {
        let fees = RecommendedFees::default();
        assert_eq!(fees.fastest_fee, 15);
        assert_eq!(fees.half_hour_fee, 12);
        assert_eq!(fees.hour_fee, 8);
        assert_eq!(fees.economy_fee, 5);
        assert_eq!(fees.minimum_fee, 1);
    }

    #[test]
    fn test_fees_deserialize_from_wire_format() {
        let json = r#"{"fastestFee":22,"halfHourFee":18,"hourFee":12,"economyFee":6,"minimumFee":2}"#;
        let fees: RecommendedFees = serde_json::from_str(json).unwrap();
        assert_eq!(fees.fastest_fee, 22);
        assert_eq!(fees.minimum_fee, 2);
    }

    #[test]
    fn test_difficulty_time_avg_is_optional() {
        let json = r#"{
            "progressPercent": 71.3,
            "difficultyChange": 2.1,
            "estimatedRetargetDate": 1700000000000,
            "remainingBlocks": 578,
            "remainingTime": 340000000
        }"#;
        let adj: DifficultyAdjustment = serde_json::from_str(json).unwrap();
        assert_eq!(adj.time_avg, None);
        assert_eq!(adj.remaining_blocks, 578);
    }

    #[test]
    fn test_current_hashrate_normalized() {
        let stats = MempoolStats {
            hashrate: Some(HashrateSummary {
                hashrates: Vec::new(),
                current_hashrate: 6.5e20,
                current_difficulty: 9.0e13,
            }),
            errors: Vec::new(),
        };
        let ehs = stats.current_hashrate_ehs().unwrap();
        assert!((ehs - 650.0).abs() < 1e-9);
    }
}
