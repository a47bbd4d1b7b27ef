//! API clients for the metric sources.
//!
//! One thin module per upstream. Every client validates the wire
//! format at the boundary and returns a typed [`MetricsError`] on
//! failure; none of them retries or caches.
//!
//! [`MetricsError`]: crate::errors::MetricsError

mod alternative_me;
mod bitfinex;
mod bitnodes;
mod blockchain_info;
mod coingecko;
mod mempool_space;

pub use alternative_me::AlternativeMeClient;
pub use bitfinex::BitfinexClient;
pub use bitnodes::BitnodesClient;
pub use blockchain_info::BlockchainInfoClient;
pub use coingecko::CoinGeckoMarketsClient;
pub use mempool_space::MempoolSpaceClient;
