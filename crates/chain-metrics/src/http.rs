//! Shared HTTP client construction for metrics requests.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONNECTION, USER_AGENT};
use reqwest::Client;
use std::time::Duration;

use crate::errors::MetricsError;

const DEFAULT_USER_AGENT: &str = "blockdash/0.3";

/// One unified request timeout for every outbound metrics call.
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Default headers for metrics API requests.
///
/// `Connection: close` avoids stale keep-alive sockets on constrained
/// cloud hosts.
pub(crate) fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(CONNECTION, HeaderValue::from_static("close"));
    headers.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));
    headers
}

/// Build the shared `reqwest` client used by every metrics wrapper.
pub(crate) fn build_client() -> Client {
    Client::builder()
        .default_headers(default_headers())
        .timeout(REQUEST_TIMEOUT)
        .build()
        .expect("Failed to create HTTP client")
}

/// Issue a GET and decode the JSON body, rejecting non-success
/// statuses before attempting the decode.
pub(crate) async fn get_json<T: serde::de::DeserializeOwned>(
    client: &Client,
    origin: &'static str,
    url: &str,
) -> Result<T, MetricsError> {
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(MetricsError::Status {
            origin,
            status: status.as_u16(),
        });
    }

    response.json().await.map_err(|e| MetricsError::Parse {
        origin,
        message: e.to_string(),
    })
}
