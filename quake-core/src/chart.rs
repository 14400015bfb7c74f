//! Scatter-chart axis configuration and projection.

use crate::error::UnknownFieldError;
use crate::record::EarthquakeRecord;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Numeric record fields that can be plotted on an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartField {
    Mag,
    Depth,
    Latitude,
    Longitude,
    Gap,
    Rms,
    Nst,
}

impl ChartField {
    /// Selector order.
    pub const ALL: [ChartField; 7] = [
        ChartField::Mag,
        ChartField::Depth,
        ChartField::Latitude,
        ChartField::Longitude,
        ChartField::Gap,
        ChartField::Rms,
        ChartField::Nst,
    ];

    /// Feed column name.
    pub fn key(&self) -> &'static str {
        match self {
            ChartField::Mag => "mag",
            ChartField::Depth => "depth",
            ChartField::Latitude => "latitude",
            ChartField::Longitude => "longitude",
            ChartField::Gap => "gap",
            ChartField::Rms => "rms",
            ChartField::Nst => "nst",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ChartField::Mag => "Magnitude",
            ChartField::Depth => "Depth (km)",
            ChartField::Latitude => "Latitude",
            ChartField::Longitude => "Longitude",
            ChartField::Gap => "Gap",
            ChartField::Rms => "RMS",
            ChartField::Nst => "Number of Stations",
        }
    }

    pub fn value(&self, record: &EarthquakeRecord) -> f64 {
        match self {
            ChartField::Mag => record.mag,
            ChartField::Depth => record.depth,
            ChartField::Latitude => record.latitude,
            ChartField::Longitude => record.longitude,
            ChartField::Gap => record.gap,
            ChartField::Rms => record.rms,
            ChartField::Nst => record.nst,
        }
    }
}

impl fmt::Display for ChartField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ChartField {
    type Err = UnknownFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChartField::ALL
            .iter()
            .copied()
            .find(|field| field.key() == s)
            .ok_or_else(|| UnknownFieldError(s.to_string()))
    }
}

/// Which axis of the scatter chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    #[serde(rename = "xAxis")]
    X,
    #[serde(rename = "yAxis")]
    Y,
}

impl FromStr for Axis {
    type Err = UnknownFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x" | "xAxis" => Ok(Axis::X),
            "y" | "yAxis" => Ok(Axis::Y),
            other => Err(UnknownFieldError(other.to_string())),
        }
    }
}

/// Field assignment for both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartAxisConfig {
    pub x_axis: ChartField,
    pub y_axis: ChartField,
}

impl Default for ChartAxisConfig {
    fn default() -> Self {
        Self {
            x_axis: ChartField::Mag,
            y_axis: ChartField::Depth,
        }
    }
}

impl ChartAxisConfig {
    pub fn get(&self, axis: Axis) -> ChartField {
        match axis {
            Axis::X => self.x_axis,
            Axis::Y => self.y_axis,
        }
    }

    pub fn set(&mut self, axis: Axis, field: ChartField) {
        match axis {
            Axis::X => self.x_axis = field,
            Axis::Y => self.y_axis = field,
        }
    }
}

/// One plotted record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub place: String,
    pub time: String,
    /// Drawn emphasized (larger, red) when true.
    pub highlighted: bool,
}

/// Project records onto the configured axes, in input order.
pub fn project(
    records: &[EarthquakeRecord],
    config: &ChartAxisConfig,
    highlighted_id: Option<&str>,
) -> Vec<ChartPoint> {
    records
        .iter()
        .map(|record| ChartPoint {
            id: record.id.clone(),
            x: config.x_axis.value(record),
            y: config.y_axis.value(record),
            place: record.place.clone(),
            time: record.time.clone(),
            highlighted: highlighted_id.is_some_and(|id| id == record.id),
        })
        .collect()
}
