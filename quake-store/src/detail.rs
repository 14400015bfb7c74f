//! Detail panel content for the persisted selection.

use quake_core::record::EarthquakeRecord;
use quake_utils::dates::format_event_date;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordDetail {
    pub id: String,
    pub location: String,
    pub magnitude: f64,
    pub depth_km: f64,
    /// "YYYY-MM-DD", or the raw timestamp when it does not parse.
    pub date: String,
    pub event_type: String,
    pub status: String,
}

impl RecordDetail {
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Location", self.location.clone()),
            ("Magnitude", self.magnitude.to_string()),
            ("Depth", format!("{} km", self.depth_km)),
            ("Time", self.date.clone()),
            ("Type", self.event_type.clone()),
            ("Status", self.status.clone()),
        ]
    }
}

impl From<&EarthquakeRecord> for RecordDetail {
    fn from(record: &EarthquakeRecord) -> Self {
        Self {
            id: record.id.clone(),
            location: record.place.clone(),
            magnitude: record.mag,
            depth_km: record.depth,
            date: format_event_date(&record.time),
            event_type: record.event_type.clone(),
            status: record.status.clone(),
        }
    }
}

impl fmt::Display for RecordDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Selected Earthquake Details ({})", self.id)?;
        for (label, value) in self.fields() {
            writeln!(f, "  {:<10} {}", format!("{}:", label), value)?;
        }
        Ok(())
    }
}
