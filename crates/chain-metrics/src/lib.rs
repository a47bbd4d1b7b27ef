//! Blockdash Chain Metrics Crate
//!
//! Blockchain and network statistics for the Blockdash dashboard:
//! spot price, global market totals, sentiment, chain basics, mempool
//! state, mining statistics and chart time series.
//!
//! Each upstream source has a thin typed client; the
//! [`MetricsCollector`] fans out to all of them concurrently and
//! merges one [`MetricsBundle`] per round. A failed source degrades
//! its own section and contributes one attributed error string; a
//! collection round never fails as a whole.

pub mod clients;
pub mod collector;
pub mod errors;
pub mod models;
pub mod units;

mod http;

pub use clients::{
    AlternativeMeClient, BitfinexClient, BitnodesClient, BlockchainInfoClient,
    CoinGeckoMarketsClient, MempoolSpaceClient,
};
pub use collector::{MetricsCollector, DEFAULT_AVG_BLOCK_TIME_MINUTES};
pub use errors::MetricsError;
pub use models::{
    CollectionOutcome, MempoolSnapshot, MempoolStats, MetricsBundle, OhlcHistory,
};
