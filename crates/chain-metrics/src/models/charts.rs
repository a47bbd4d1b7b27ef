//! Chart time-series models.

use serde::{Deserialize, Serialize};

/// The chart categories collected each round.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum ChartKind {
    HashRate,
    Transactions,
    TransactionVolumeUsd,
    MinersRevenue,
    TransactionFees,
    MempoolSize,
    AvgBlockSize,
}

impl ChartKind {
    pub const ALL: [ChartKind; 7] = [
        ChartKind::HashRate,
        ChartKind::Transactions,
        ChartKind::TransactionVolumeUsd,
        ChartKind::MinersRevenue,
        ChartKind::TransactionFees,
        ChartKind::MempoolSize,
        ChartKind::AvgBlockSize,
    ];

    /// The upstream chart identifier.
    pub fn slug(self) -> &'static str {
        match self {
            ChartKind::HashRate => "hash-rate",
            ChartKind::Transactions => "n-transactions",
            ChartKind::TransactionVolumeUsd => "estimated-transaction-volume-usd",
            ChartKind::MinersRevenue => "miners-revenue",
            ChartKind::TransactionFees => "transaction-fees-usd",
            ChartKind::MempoolSize => "mempool-size",
            ChartKind::AvgBlockSize => "avg-block-size",
        }
    }
}

/// One chart sample: unix seconds and a value.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub x: i64,
    pub y: f64,
}

/// One chart series as returned by the chart source, with its
/// self-described metadata.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChartSeries {
    pub values: Vec<ChartPoint>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub description: String,
}

impl ChartSeries {
    /// The most recent value, if any.
    pub fn latest(&self) -> Option<f64> {
        self.values.last().map(|p| p.y)
    }
}
