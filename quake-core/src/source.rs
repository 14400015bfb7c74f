//! The data-source seam: anything that can produce a fresh record set.

use crate::error::FetchError;
use crate::record::{parse_feed, EarthquakeRecord};
use log::info;
use std::future::Future;
use std::path::PathBuf;

/// Produces the complete, normalized record set for one fetch.
///
/// Implementations do not retry or paginate; one call is one request.
pub trait RecordSource {
    fn fetch_records(&self) -> impl Future<Output = Result<Vec<EarthquakeRecord>, FetchError>>;

    /// Short description for log lines.
    fn describe(&self) -> String;
}

/// A feed payload that is already local: inline text or a file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CsvTextSource {
    Text(String),
    File(PathBuf),
}

impl RecordSource for CsvTextSource {
    async fn fetch_records(&self) -> Result<Vec<EarthquakeRecord>, FetchError> {
        let records = match self {
            CsvTextSource::Text(text) => parse_feed(text),
            CsvTextSource::File(path) => {
                let text = std::fs::read_to_string(path)
                    .map_err(|e| FetchError::Read(format!("{}: {}", path.display(), e)))?;
                parse_feed(&text)
            }
        };
        info!("Loaded {} records from {}", records.len(), self.describe());
        Ok(records)
    }

    fn describe(&self) -> String {
        match self {
            CsvTextSource::Text(text) => format!("inline feed ({} bytes)", text.len()),
            CsvTextSource::File(path) => path.display().to_string(),
        }
    }
}
