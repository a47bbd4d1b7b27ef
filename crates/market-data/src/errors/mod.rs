//! Error types for exchange clients.
//!
//! Every variant is recoverable at the aggregator level: a failed
//! client degrades a single source, it never aborts an aggregation
//! round. Errors carry the exchange name so that diagnostics in
//! [`AggregationResult::errors`](crate::models::AggregationResult)
//! stay attributed.

use thiserror::Error;

/// Typed failure returned by an exchange client for a single price fetch.
#[derive(Error, Debug)]
pub enum ExchangeError {
    /// The request did not complete within the configured timeout.
    #[error("{exchange}: request timed out")]
    Timeout {
        /// The exchange that timed out
        exchange: &'static str,
    },

    /// The exchange could not be reached at all (DNS, TCP, TLS).
    #[error("{exchange}: connection failed")]
    ConnectionFailed {
        /// The exchange that was unreachable
        exchange: &'static str,
    },

    /// The exchange answered with a non-success HTTP status.
    #[error("{exchange}: HTTP status {status}")]
    HttpStatus {
        /// The exchange that returned the status
        exchange: &'static str,
        /// The HTTP status code
        status: u16,
    },

    /// The response body could not be parsed into the expected shape,
    /// or the expected price field was missing or non-numeric.
    #[error("{exchange}: malformed response: {message}")]
    MalformedResponse {
        /// The exchange that returned the payload
        exchange: &'static str,
        /// What was wrong with the payload
        message: String,
    },

    /// The exchange returned a syntactically valid but non-positive price.
    /// Never coerced to a default.
    #[error("{exchange}: invalid price value: {value}")]
    InvalidPrice {
        /// The exchange that returned the price
        exchange: &'static str,
        /// The offending raw value
        value: String,
    },

    /// The exchange cannot serve this request at all, e.g. an asset it
    /// does not list or an application-level error code.
    #[error("{exchange}: unavailable: {message}")]
    Unavailable {
        /// The exchange that declined the request
        exchange: &'static str,
        /// Why the source is unavailable
        message: String,
    },
}

impl ExchangeError {
    /// Classify a transport-level [`reqwest::Error`] into the typed taxonomy.
    pub fn from_reqwest(exchange: &'static str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout { exchange }
        } else if err.is_connect() {
            Self::ConnectionFailed { exchange }
        } else if let Some(status) = err.status() {
            Self::HttpStatus {
                exchange,
                status: status.as_u16(),
            }
        } else if err.is_decode() {
            Self::MalformedResponse {
                exchange,
                message: err.to_string(),
            }
        } else {
            Self::Unavailable {
                exchange,
                message: err.to_string(),
            }
        }
    }

    /// The exchange this error is attributed to.
    pub fn exchange(&self) -> &'static str {
        match self {
            Self::Timeout { exchange }
            | Self::ConnectionFailed { exchange }
            | Self::HttpStatus { exchange, .. }
            | Self::MalformedResponse { exchange, .. }
            | Self::InvalidPrice { exchange, .. }
            | Self::Unavailable { exchange, .. } => exchange,
        }
    }
}
