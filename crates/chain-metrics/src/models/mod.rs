//! Data models for chain and network metrics.

mod bundle;
mod charts;
mod mempool;
mod ohlc;

pub use bundle::{
    ChainBasics, CollectionOutcome, FearGreed, GlobalMarket, MarketSnapshot, MetricsBundle,
    SpotPrice, ATTEMPTED_FETCHES,
};
pub use charts::{ChartKind, ChartPoint, ChartSeries};
pub use mempool::{
    BlockSummary, DifficultyAdjustment, HashratePoint, HashrateSummary, MempoolBlock,
    MempoolSnapshot, MempoolStats, MiningPool, MiningPools, RecommendedFees,
};
pub use ohlc::{Candle, OhlcHistory};
