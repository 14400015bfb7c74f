//! Fixed configuration for the feed and pagination.

use serde::Deserialize;
use std::time::Duration;

/// USGS summary feed: all earthquakes, past month.
pub const EARTHQUAKE_CSV_URL: &str =
    "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_month.csv";

/// Number of records per page. Shared by every pagination computation.
pub const PAGE_SIZE: usize = 10;

/// Request timeout for the feed client.
pub const FETCH_TIMEOUT_SECS: u64 = 60;

/// Where and how to fetch the feed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub url: String,
    pub timeout_secs: u64,
}

impl SourceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: EARTHQUAKE_CSV_URL.to_string(),
            timeout_secs: FETCH_TIMEOUT_SECS,
        }
    }
}
