mod aggregation;
mod asset;
mod quote;

pub use aggregation::AggregationResult;
pub use asset::Asset;
pub use quote::PriceQuote;
