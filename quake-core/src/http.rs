//! reqwest-backed feed client.

use crate::config::SourceConfig;
use crate::error::FetchError;
use crate::record::{parse_feed, EarthquakeRecord};
use crate::source::RecordSource;
use log::{info, warn};
use reqwest::Client;

/// Fetches the feed with a single GET per call. No retries.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    config: SourceConfig,
}

impl HttpSource {
    /// Build a client with the configured request timeout, so a stalled
    /// server surfaces as [`FetchError::Timeout`] instead of hanging.
    pub fn new(config: SourceConfig) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &SourceConfig {
        &self.config
    }
}

impl RecordSource for HttpSource {
    async fn fetch_records(&self) -> Result<Vec<EarthquakeRecord>, FetchError> {
        info!("Fetching earthquake feed from {}", self.config.url);
        let response = self.client.get(&self.config.url).send().await?;
        if !response.status().is_success() {
            warn!(
                "Bad response status for {}: {}",
                self.config.url,
                response.status()
            );
            return Err(FetchError::Status(response.status().as_u16()));
        }
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))?;
        let records = parse_feed(&body);
        info!(
            "Feed returned {} bytes, {} records",
            body.len(),
            records.len()
        );
        Ok(records)
    }

    fn describe(&self) -> String {
        self.config.url.clone()
    }
}
