//! Alternative.me Fear & Greed index client.

use reqwest::Client;
use serde::Deserialize;

use crate::errors::MetricsError;
use crate::http::{build_client, get_json};
use crate::models::FearGreed;

const ALTERNATIVE_ME_BASE_URL: &str = "https://api.alternative.me";
const SOURCE: &str = "Alternative.me";

// The index endpoint encodes its numbers as JSON strings.
#[derive(Debug, Deserialize)]
struct FngEnvelope {
    data: Vec<FngEntry>,
}

#[derive(Debug, Deserialize)]
struct FngEntry {
    value: String,
    value_classification: String,
    timestamp: String,
}

#[derive(Clone)]
pub struct AlternativeMeClient {
    client: Client,
    base_url: String,
}

impl AlternativeMeClient {
    pub fn new() -> Self {
        Self::with_base_url(ALTERNATIVE_ME_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: build_client(),
            base_url: base_url.into(),
        }
    }

    /// Fetch the latest Fear & Greed reading.
    pub async fn fear_greed(&self) -> Result<FearGreed, MetricsError> {
        let url = format!("{}/fng/", self.base_url);
        let envelope: FngEnvelope = get_json(&self.client, SOURCE, &url).await?;

        let entry = envelope
            .data
            .into_iter()
            .next()
            .ok_or(MetricsError::MissingField {
                origin: SOURCE,
                field: "data",
            })?;

        let value = entry.value.parse().map_err(|_| MetricsError::Parse {
            origin: SOURCE,
            message: format!("non-numeric index value '{}'", entry.value),
        })?;
        let timestamp = entry.timestamp.parse().map_err(|_| MetricsError::Parse {
            origin: SOURCE,
            message: format!("non-numeric timestamp '{}'", entry.timestamp),
        })?;

        Ok(FearGreed {
            value,
            classification: entry.value_classification,
            timestamp,
        })
    }
}

impl Default for AlternativeMeClient {
    fn default() -> Self {
        Self::new()
    }
}
