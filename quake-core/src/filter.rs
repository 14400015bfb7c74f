//! Pure record filtering.
//!
//! [`apply_filters`] has no hidden state: the same records and spec always
//! give the same subset, in the input order.

use crate::record::EarthquakeRecord;
use serde::{Deserialize, Serialize};

/// Inclusive magnitude/depth bounds plus an optional place restriction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSpec {
    pub min_magnitude: f64,
    pub max_magnitude: f64,
    pub min_depth: f64,
    pub max_depth: f64,
    /// Case-insensitive substrings of `place`. Empty means unrestricted.
    pub selected_places: Vec<String>,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            min_magnitude: 0.0,
            max_magnitude: 10.0,
            min_depth: 0.0,
            max_depth: 1000.0,
            selected_places: Vec::new(),
        }
    }
}

/// A partial update to a [`FilterSpec`]; `None` fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterPatch {
    pub min_magnitude: Option<f64>,
    pub max_magnitude: Option<f64>,
    pub min_depth: Option<f64>,
    pub max_depth: Option<f64>,
    pub selected_places: Option<Vec<String>>,
}

impl FilterPatch {
    pub fn is_empty(&self) -> bool {
        *self == FilterPatch::default()
    }
}

impl FilterSpec {
    /// Overwrite the fields the patch sets.
    pub fn merge(&mut self, patch: FilterPatch) {
        if let Some(v) = patch.min_magnitude {
            self.min_magnitude = v;
        }
        if let Some(v) = patch.max_magnitude {
            self.max_magnitude = v;
        }
        if let Some(v) = patch.min_depth {
            self.min_depth = v;
        }
        if let Some(v) = patch.max_depth {
            self.max_depth = v;
        }
        if let Some(places) = patch.selected_places {
            self.selected_places = places;
        }
    }

    pub fn matches(&self, record: &EarthquakeRecord) -> bool {
        let places = self.lowered_places();
        self.matches_with(record, &places)
    }

    fn lowered_places(&self) -> Vec<String> {
        self.selected_places
            .iter()
            .map(|p| p.to_lowercase())
            .collect()
    }

    fn matches_with(&self, record: &EarthquakeRecord, lowered_places: &[String]) -> bool {
        let in_magnitude = record.mag >= self.min_magnitude && record.mag <= self.max_magnitude;
        let in_depth = record.depth >= self.min_depth && record.depth <= self.max_depth;
        if !(in_magnitude && in_depth) {
            return false;
        }
        if lowered_places.is_empty() {
            return true;
        }
        let place = record.place.to_lowercase();
        lowered_places.iter().any(|p| place.contains(p.as_str()))
    }
}

/// Records matching `spec`, in input order.
pub fn apply_filters(records: &[EarthquakeRecord], spec: &FilterSpec) -> Vec<EarthquakeRecord> {
    let places = spec.lowered_places();
    records
        .iter()
        .filter(|r| spec.matches_with(r, &places))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{parse_feed, tests::FEED};

    fn quake(id: &str, mag: f64, depth: f64, place: &str) -> EarthquakeRecord {
        let mut record = parse_feed(FEED).remove(0);
        record.id = id.to_string();
        record.mag = mag;
        record.depth = depth;
        record.place = place.to_string();
        record
    }

    fn sample() -> Vec<EarthquakeRecord> {
        vec![
            quake("a", 1.0, 5.0, "10km N of Ridgecrest, CA"),
            quake("b", 5.5, 700.0, "Fiji region"),
            quake("c", 6.2, 10.0, "Off the coast of Oregon"),
            quake("d", 4.0, 1000.0, "Tonga"),
            quake("e", 10.0, 0.0, "ridgecrest"),
        ]
    }

    fn ids(records: &[EarthquakeRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_default_spec_keeps_everything_in_range() {
        let records = sample();
        let filtered = apply_filters(&records, &FilterSpec::default());
        assert_eq!(ids(&filtered), vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let spec = FilterSpec {
            min_magnitude: 4.0,
            max_magnitude: 6.2,
            min_depth: 10.0,
            max_depth: 1000.0,
            selected_places: Vec::new(),
        };
        let filtered = apply_filters(&sample(), &spec);
        assert_eq!(ids(&filtered), vec!["b", "c", "d"]);
    }

    #[test]
    fn test_places_match_case_insensitive_substring() {
        let spec = FilterSpec {
            selected_places: vec!["RIDGECREST".to_string(), "tong".to_string()],
            ..FilterSpec::default()
        };
        let filtered = apply_filters(&sample(), &spec);
        assert_eq!(ids(&filtered), vec!["a", "d", "e"]);
    }

    #[test]
    fn test_filter_preserves_order_and_is_idempotent() {
        let spec = FilterSpec {
            min_magnitude: 4.0,
            ..FilterSpec::default()
        };
        let once = apply_filters(&sample(), &spec);
        let twice = apply_filters(&once, &spec);
        assert_eq!(once, twice);
        assert_eq!(ids(&once), vec!["b", "c", "d", "e"]);
    }

    #[test]
    fn test_nothing_matches() {
        let spec = FilterSpec {
            min_magnitude: 9.0,
            max_magnitude: 9.5,
            ..FilterSpec::default()
        };
        assert!(apply_filters(&sample(), &spec).is_empty());
        assert!(apply_filters(&[], &FilterSpec::default()).is_empty());
    }

    #[test]
    fn test_merge_only_touches_set_fields() {
        let mut spec = FilterSpec::default();
        spec.merge(FilterPatch {
            min_magnitude: Some(5.0),
            selected_places: Some(vec!["alaska".to_string()]),
            ..FilterPatch::default()
        });
        assert_eq!(spec.min_magnitude, 5.0);
        assert_eq!(spec.max_magnitude, 10.0);
        assert_eq!(spec.max_depth, 1000.0);
        assert_eq!(spec.selected_places, vec!["alaska".to_string()]);

        spec.merge(FilterPatch {
            max_depth: Some(70.0),
            ..FilterPatch::default()
        });
        assert_eq!(spec.min_magnitude, 5.0);
        assert_eq!(spec.max_depth, 70.0);
        assert_eq!(spec.selected_places, vec!["alaska".to_string()]);
    }

    #[test]
    fn test_matches_single_record() {
        let spec = FilterSpec {
            selected_places: vec!["fiji".to_string()],
            ..FilterSpec::default()
        };
        let records = sample();
        assert!(spec.matches(&records[1]));
        assert!(!spec.matches(&records[0]));
        assert!(FilterPatch::default().is_empty());
    }
}
