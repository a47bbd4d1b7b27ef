//! Blockdash Core Crate
//!
//! The dashboard-facing facade over the Blockdash fetch pipeline:
//! short-TTL result caching with single-flight fetches, the
//! [`DashboardService`] entry points, and explicit portfolio state.
//!
//! The design rule throughout is explicit context objects with owned
//! lifecycles. The service owns its aggregator, collector, clients
//! and cache; the portfolio owns its holdings. Nothing lives in
//! ambient global state.

pub mod cache;
pub mod portfolio;
pub mod service;

pub use cache::{CacheStore, CachedFetch, DEFAULT_CACHE_TTL};
pub use portfolio::{PortfolioStore, PortfolioValuation, PositionValue};
pub use service::DashboardService;
