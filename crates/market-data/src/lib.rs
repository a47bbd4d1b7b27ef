//! Blockdash Market Data Crate
//!
//! Multi-exchange spot price aggregation with fallback for the
//! Blockdash dashboard.
//!
//! # Overview
//!
//! A fixed set of tracked assets (BTC, ETH, BNB, POL) is priced by
//! trying exchange clients in a fixed priority order:
//!
//! ```text
//! Binance -> KuCoin -> Coinbase -> CoinGecko
//! ```
//!
//! Each client normalizes its own wire format to a positive
//! [`Decimal`](rust_decimal::Decimal) price or a typed
//! [`ExchangeError`]. The [`PriceAggregator`] merges client rounds
//! into one [`AggregationResult`]: the first successful source for an
//! asset wins, iteration stops early once every tracked asset is
//! priced, and all failure is expressed as per-asset absence plus
//! attributed error strings - the aggregator itself never fails.
//!
//! # Core Types
//!
//! - [`Asset`] - one of the fixed tracked assets
//! - [`PriceQuote`] - a single source-attributed price
//! - [`AggregationResult`] - merged prices, errors and source list
//! - [`ExchangeClient`] - trait implemented by each exchange wrapper

pub mod aggregator;
pub mod errors;
pub mod exchange;
pub mod models;

pub use aggregator::PriceAggregator;
pub use errors::ExchangeError;
pub use exchange::{
    BinanceClient, CoinGeckoClient, CoinbaseClient, ExchangeClient, ExchangeRound, KucoinClient,
};
pub use models::{AggregationResult, Asset, PriceQuote};
