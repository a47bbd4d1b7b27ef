//! Chain metrics error types

use thiserror::Error;

/// Errors that can occur when fetching blockchain and network metrics.
///
/// Every variant is recoverable at the collector level. A failed
/// sub-fetch degrades one section of the bundle and becomes one
/// attributed entry in its errors list.
#[derive(Error, Debug)]
pub enum MetricsError {
    /// HTTP request failed (timeout, connect, decode)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("{origin} returned HTTP {status}")]
    Status { origin: &'static str, status: u16 },

    /// Failed to parse a response body
    #[error("{origin} parse error: {message}")]
    Parse {
        origin: &'static str,
        message: String,
    },

    /// Response was structurally valid but missing an expected field
    #[error("{origin} response missing field '{field}'")]
    MissingField {
        origin: &'static str,
        field: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_attributes_the_source() {
        let err = MetricsError::Status {
            origin: "mempool.space",
            status: 503,
        };
        assert_eq!(err.to_string(), "mempool.space returned HTTP 503");

        let err = MetricsError::MissingField {
            origin: "Alternative.me",
            field: "value",
        };
        assert_eq!(
            err.to_string(),
            "Alternative.me response missing field 'value'"
        );
    }
}
