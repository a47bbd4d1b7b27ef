//! Weekly OHLC history models.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// One weekly candle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp_ms: i64,
    pub open: f64,
    pub close: f64,
    pub high: f64,
    pub low: f64,
    pub volume: f64,
}

impl Candle {
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.timestamp_ms).single()
    }
}

/// Batched candle history, oldest first, deduplicated by timestamp.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct OhlcHistory {
    pub candles: Vec<Candle>,
    /// Upstream requests issued to assemble this history.
    pub requests_made: usize,
}

impl OhlcHistory {
    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn first_date(&self) -> Option<DateTime<Utc>> {
        self.candles.first().and_then(Candle::datetime)
    }

    pub fn last_date(&self) -> Option<DateTime<Utc>> {
        self.candles.last().and_then(Candle::datetime)
    }
}
