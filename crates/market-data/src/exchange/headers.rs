//! Shared HTTP client construction for exchange requests.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONNECTION, USER_AGENT};
use reqwest::Client;
use std::time::Duration;

const DEFAULT_USER_AGENT: &str = "blockdash/0.3";

/// One unified request timeout for every outbound exchange call.
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Default headers for exchange API requests.
///
/// `Connection: close` avoids stale keep-alive sockets on constrained
/// cloud hosts, where several of these APIs were observed to hang.
pub(crate) fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(CONNECTION, HeaderValue::from_static("close"));
    headers.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));
    headers
}

/// Build the shared `reqwest` client used by every exchange wrapper.
pub(crate) fn build_client() -> Client {
    Client::builder()
        .default_headers(default_headers())
        .timeout(REQUEST_TIMEOUT)
        .build()
        .expect("Failed to create HTTP client")
}
