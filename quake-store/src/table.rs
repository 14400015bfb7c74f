//! Grid-local sorting and global search over the filtered view.
//!
//! This state belongs to the table surface only. It reorders and narrows
//! what the grid shows without writing to either store.

use quake_core::error::UnknownFieldError;
use quake_core::record::EarthquakeRecord;
use quake_utils::dates::{format_event_date, parse_event_time};
use quake_utils::numbers::format_fixed2;
use std::cmp::Ordering;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableColumn {
    Time,
    Place,
    Mag,
    Depth,
    Latitude,
    Longitude,
    Type,
    Status,
    Nst,
    Gap,
    Dmin,
    Rms,
    Net,
    MagType,
}

impl TableColumn {
    /// Display order.
    pub const ALL: [TableColumn; 14] = [
        TableColumn::Time,
        TableColumn::Place,
        TableColumn::Mag,
        TableColumn::Depth,
        TableColumn::Latitude,
        TableColumn::Longitude,
        TableColumn::Type,
        TableColumn::Status,
        TableColumn::Nst,
        TableColumn::Gap,
        TableColumn::Dmin,
        TableColumn::Rms,
        TableColumn::Net,
        TableColumn::MagType,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            TableColumn::Time => "time",
            TableColumn::Place => "place",
            TableColumn::Mag => "mag",
            TableColumn::Depth => "depth",
            TableColumn::Latitude => "latitude",
            TableColumn::Longitude => "longitude",
            TableColumn::Type => "type",
            TableColumn::Status => "status",
            TableColumn::Nst => "nst",
            TableColumn::Gap => "gap",
            TableColumn::Dmin => "dmin",
            TableColumn::Rms => "rms",
            TableColumn::Net => "net",
            TableColumn::MagType => "magType",
        }
    }

    pub fn header(&self) -> &'static str {
        match self {
            TableColumn::Time => "Time",
            TableColumn::Place => "Place",
            TableColumn::Mag => "Magnitude",
            TableColumn::Depth => "Depth (km)",
            TableColumn::Latitude => "Latitude",
            TableColumn::Longitude => "Longitude",
            TableColumn::Type => "Type",
            TableColumn::Status => "Status",
            TableColumn::Nst => "Stations",
            TableColumn::Gap => "Gap",
            TableColumn::Dmin => "DMin",
            TableColumn::Rms => "RMS",
            TableColumn::Net => "Network",
            TableColumn::MagType => "Mag Type",
        }
    }

    fn number(&self, record: &EarthquakeRecord) -> Option<f64> {
        match self {
            TableColumn::Mag => Some(record.mag),
            TableColumn::Depth => Some(record.depth),
            TableColumn::Latitude => Some(record.latitude),
            TableColumn::Longitude => Some(record.longitude),
            TableColumn::Nst => Some(record.nst),
            TableColumn::Gap => Some(record.gap),
            TableColumn::Dmin => Some(record.dmin),
            TableColumn::Rms => Some(record.rms),
            _ => None,
        }
    }

    /// Cell text as the grid shows it.
    pub fn cell(&self, record: &EarthquakeRecord) -> String {
        match self {
            TableColumn::Time => format_event_date(&record.time),
            TableColumn::Place => record.place.clone(),
            TableColumn::Type => record.event_type.clone(),
            TableColumn::Status => record.status.clone(),
            TableColumn::Net => record.net.clone(),
            TableColumn::MagType => record.mag_type.clone(),
            TableColumn::Nst => record.nst.to_string(),
            numeric => format_fixed2(numeric.number(record).unwrap_or_default()),
        }
    }

    fn compare(&self, a: &EarthquakeRecord, b: &EarthquakeRecord) -> Ordering {
        if let (Some(x), Some(y)) = (self.number(a), self.number(b)) {
            return x.total_cmp(&y);
        }
        match self {
            TableColumn::Time => match (parse_event_time(&a.time), parse_event_time(&b.time)) {
                (Some(x), Some(y)) => x.cmp(&y),
                _ => a.time.cmp(&b.time),
            },
            _ => self.cell(a).cmp(&self.cell(b)),
        }
    }
}

impl FromStr for TableColumn {
    type Err = UnknownFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TableColumn::ALL
            .iter()
            .copied()
            .find(|c| c.key() == s)
            .ok_or_else(|| UnknownFieldError(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub column: TableColumn,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableState {
    sort: Option<SortSpec>,
    search: String,
}

impl TableState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sort(&self) -> Option<SortSpec> {
        self.sort
    }

    pub fn set_sort(&mut self, sort: Option<SortSpec>) {
        self.sort = sort;
    }

    /// Header click: unsorted, ascending, descending, unsorted again.
    pub fn toggle_sort(&mut self, column: TableColumn) {
        self.sort = match self.sort {
            Some(SortSpec {
                column: current,
                direction: SortDirection::Ascending,
            }) if current == column => Some(SortSpec {
                column,
                direction: SortDirection::Descending,
            }),
            Some(SortSpec {
                column: current,
                direction: SortDirection::Descending,
            }) if current == column => None,
            _ => Some(SortSpec {
                column,
                direction: SortDirection::Ascending,
            }),
        };
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    /// Rows to display: search-matched, then stably sorted.
    pub fn rows<'a>(&self, records: &'a [EarthquakeRecord]) -> Vec<&'a EarthquakeRecord> {
        let needle = self.search.trim().to_lowercase();
        let mut rows: Vec<&EarthquakeRecord> = records
            .iter()
            .filter(|record| {
                needle.is_empty()
                    || TableColumn::ALL
                        .iter()
                        .any(|c| c.cell(record).to_lowercase().contains(&needle))
            })
            .collect();
        if let Some(spec) = self.sort {
            rows.sort_by(|a, b| {
                let ordering = spec.column.compare(a, b);
                match spec.direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                }
            });
        }
        rows
    }
}
