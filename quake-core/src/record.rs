use csv::ReaderBuilder;
use log::{debug, warn};
use quake_utils::numbers::{parse_float_or_zero, parse_int_or_zero};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A delimiter-parsed feed row keyed by column header.
pub type RawRow = HashMap<String, String>;

/// Columns that must be non-empty for a row to become a record.
pub const REQUIRED_COLUMNS: [&str; 3] = ["time", "latitude", "longitude"];

/// One normalized seismic event from the feed.
///
/// Numeric columns never hold `NaN`: unparseable cells are stored as `0.0`.
/// Text columns default to the empty string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarthquakeRecord {
    pub time: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Depth in km
    pub depth: f64,
    pub mag: f64,
    pub mag_type: String,
    /// Number of reporting stations
    pub nst: f64,
    pub gap: f64,
    pub dmin: f64,
    pub rms: f64,
    pub net: String,
    /// Unique within a fetch only.
    pub id: String,
    pub updated: String,
    pub place: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub horizontal_error: f64,
    pub depth_error: f64,
    pub mag_error: f64,
    pub mag_nst: f64,
    pub status: String,
    pub location_source: String,
    pub mag_source: String,
}

/// Severity bucket used to tint magnitude cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MagnitudeClass {
    Minor,
    Moderate,
    Major,
}

impl MagnitudeClass {
    pub fn of(mag: f64) -> Self {
        if mag >= 6.0 {
            MagnitudeClass::Major
        } else if mag >= 4.0 {
            MagnitudeClass::Moderate
        } else {
            MagnitudeClass::Minor
        }
    }
}

fn text(row: &RawRow, column: &str) -> String {
    row.get(column).cloned().unwrap_or_default()
}

fn float(row: &RawRow, column: &str) -> f64 {
    row.get(column)
        .map(|cell| parse_float_or_zero(cell))
        .unwrap_or(0.0)
}

fn int(row: &RawRow, column: &str) -> f64 {
    row.get(column)
        .map(|cell| parse_int_or_zero(cell))
        .unwrap_or(0.0)
}

impl EarthquakeRecord {
    /// Normalize one row. Returns `None` when a required column is missing
    /// or empty.
    pub fn from_row(row: &RawRow) -> Option<Self> {
        let complete = REQUIRED_COLUMNS
            .iter()
            .all(|column| row.get(*column).is_some_and(|cell| !cell.is_empty()));
        if !complete {
            return None;
        }
        Some(EarthquakeRecord {
            time: text(row, "time"),
            latitude: float(row, "latitude"),
            longitude: float(row, "longitude"),
            depth: float(row, "depth"),
            mag: float(row, "mag"),
            mag_type: text(row, "magType"),
            nst: int(row, "nst"),
            gap: float(row, "gap"),
            dmin: float(row, "dmin"),
            rms: float(row, "rms"),
            net: text(row, "net"),
            id: text(row, "id"),
            updated: text(row, "updated"),
            place: text(row, "place"),
            event_type: text(row, "type"),
            horizontal_error: float(row, "horizontalError"),
            depth_error: float(row, "depthError"),
            mag_error: float(row, "magError"),
            mag_nst: int(row, "magNst"),
            status: text(row, "status"),
            location_source: text(row, "locationSource"),
            mag_source: text(row, "magSource"),
        })
    }

    pub fn magnitude_class(&self) -> MagnitudeClass {
        MagnitudeClass::of(self.mag)
    }
}

/// Normalize rows in order, dropping the ones without time or coordinates.
pub fn normalize_rows<'a, I>(rows: I) -> Vec<EarthquakeRecord>
where
    I: IntoIterator<Item = &'a RawRow>,
{
    let mut dropped = 0usize;
    let records = rows
        .into_iter()
        .filter_map(|row| {
            let record = EarthquakeRecord::from_row(row);
            if record.is_none() {
                dropped += 1;
            }
            record
        })
        .collect::<Vec<EarthquakeRecord>>();
    if dropped > 0 {
        debug!("Dropped {} rows without time/latitude/longitude", dropped);
    }
    records
}

/// Decode a header-first CSV payload into header-keyed rows.
///
/// Blank lines are skipped, short rows leave their trailing columns absent,
/// and extra cells beyond the header are ignored. Rows the reader cannot
/// decode are dropped.
pub fn parse_csv_rows(csv_text: &str) -> Vec<RawRow> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(b',')
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_text.as_bytes());
    let headers = match rdr.headers() {
        Ok(h) => h.clone(),
        Err(e) => {
            warn!("Failed to read feed header: {}", e);
            return Vec::new();
        }
    };
    rdr.records()
        .filter_map(|row| match row {
            Ok(record) => Some(
                headers
                    .iter()
                    .zip(record.iter())
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect::<RawRow>(),
            ),
            Err(e) => {
                debug!("Skipping undecodable feed row: {}", e);
                None
            }
        })
        .collect()
}

/// Decode and normalize a feed payload.
pub fn parse_feed(csv_text: &str) -> Vec<EarthquakeRecord> {
    let rows = parse_csv_rows(csv_text);
    normalize_rows(&rows)
}
