//! Bitnodes reachable-node count client.

use reqwest::Client;
use serde::Deserialize;

use crate::errors::MetricsError;
use crate::http::{build_client, get_json};

const BITNODES_BASE_URL: &str = "https://bitnodes.io";
const SOURCE: &str = "Bitnodes";

#[derive(Debug, Deserialize)]
struct Snapshot {
    total_nodes: u64,
}

#[derive(Clone)]
pub struct BitnodesClient {
    client: Client,
    base_url: String,
}

impl BitnodesClient {
    pub fn new() -> Self {
        Self::with_base_url(BITNODES_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: build_client(),
            base_url: base_url.into(),
        }
    }

    /// Number of reachable nodes in the latest crawl snapshot.
    pub async fn node_count(&self) -> Result<u64, MetricsError> {
        let url = format!("{}/api/v1/snapshots/latest/", self.base_url);
        let snapshot: Snapshot = get_json(&self.client, SOURCE, &url).await?;
        Ok(snapshot.total_nodes)
    }
}

impl Default for BitnodesClient {
    fn default() -> Self {
        Self::new()
    }
}
