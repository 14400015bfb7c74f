//! The authoritative dataset store.
//!
//! `DatasetStore` is the only writer of the full dataset, page window,
//! filtered view, filter spec, chart axes and persisted selection. Every
//! intent is synchronous except the feed fetch, which is split into
//! [`DatasetStore::begin_fetch`] and [`DatasetStore::complete_fetch`] so the
//! single suspension point sits between them.
//!
//! Filters apply to the current page slice, not the full dataset.

use crate::pagination::{PageSummary, PaginationWindow};
use log::{debug, info, warn};
use quake_core::chart::{project, Axis, ChartAxisConfig, ChartField, ChartPoint};
use quake_core::config::PAGE_SIZE;
use quake_core::error::FetchError;
use quake_core::filter::{apply_filters, FilterPatch, FilterSpec};
use quake_core::record::EarthquakeRecord;
use quake_core::source::RecordSource;
use std::cell::{Ref, RefCell};
use std::rc::Rc;

/// Shown when a fetch fails without a usable message.
pub const FETCH_FALLBACK_MESSAGE: &str = "Failed to fetch earthquake data, please try again.";

/// Lifecycle of the feed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStatus {
    /// Nothing in flight and no error to show.
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

/// Issued by [`DatasetStore::begin_fetch`]; identifies one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    requested_page: usize,
}

impl FetchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn requested_page(&self) -> usize {
        self.requested_page
    }
}

#[derive(Debug, Clone)]
pub struct DatasetStore {
    window: PaginationWindow,
    filtered: Vec<EarthquakeRecord>,
    filters: FilterSpec,
    chart: ChartAxisConfig,
    selected: Option<EarthquakeRecord>,
    status: FetchStatus,
    generation: u64,
}

impl Default for DatasetStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetStore {
    pub fn new() -> Self {
        Self::with_page_size(PAGE_SIZE)
    }

    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            window: PaginationWindow::new(page_size),
            filtered: Vec::new(),
            filters: FilterSpec::default(),
            chart: ChartAxisConfig::default(),
            selected: None,
            status: FetchStatus::Idle,
            generation: 0,
        }
    }

    // ───────────────────── Fetch lifecycle ─────────────────────

    /// Pending transition. Data from the previous fetch stays visible.
    pub fn begin_fetch(&mut self, page: usize) -> FetchTicket {
        self.generation += 1;
        self.status = FetchStatus::Loading;
        info!(
            "Fetch #{} started (requested page {}, current page index {})",
            self.generation,
            page,
            self.window.page_index()
        );
        FetchTicket {
            generation: self.generation,
            requested_page: page,
        }
    }

    /// Fulfilled/rejected transition. Returns `false` when the ticket has been
    /// superseded by a later `begin_fetch` and the outcome was discarded.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        outcome: Result<Vec<EarthquakeRecord>, FetchError>,
    ) -> bool {
        if ticket.generation != self.generation {
            debug!(
                "Discarding response of fetch #{} (latest is #{})",
                ticket.generation, self.generation
            );
            return false;
        }
        match outcome {
            Ok(records) => {
                let count = records.len();
                self.window.load(records);
                self.refilter();
                self.status = FetchStatus::Loaded;
                info!(
                    "Fetch #{} loaded {} records, {} on page {}, {} after filters",
                    ticket.generation,
                    count,
                    self.window.visible(),
                    self.window.page_index(),
                    self.filtered.len()
                );
            }
            Err(e) => {
                let message = e
                    .message()
                    .unwrap_or_else(|| FETCH_FALLBACK_MESSAGE.to_string());
                warn!("Fetch #{} failed: {}", ticket.generation, message);
                self.status = FetchStatus::Failed(message);
            }
        }
        true
    }

    // ───────────────────── Intents ─────────────────────

    /// Merge `patch` into the filter spec and re-filter the current page.
    pub fn set_filters(&mut self, patch: FilterPatch) {
        self.filters.merge(patch);
        self.refilter();
        debug!(
            "Filters updated: {:?}, {} of {} page records match",
            self.filters,
            self.filtered.len(),
            self.window.visible()
        );
    }

    pub fn set_chart_axis(&mut self, axis: Axis, field: ChartField) {
        self.chart.set(axis, field);
        debug!("Chart axis {:?} set to {}", axis, field);
    }

    /// Move to the page a zero-based pagination control reports.
    pub fn set_page(&mut self, zero_based: usize) {
        self.window.set_page(zero_based);
        self.refilter();
        debug!(
            "Page index {} shows {} records",
            self.window.page_index(),
            self.window.visible()
        );
    }

    /// Set the persisted selection. Page changes do not clear it.
    pub fn set_selected_record(&mut self, record: Option<EarthquakeRecord>) {
        self.selected = record;
    }

    pub fn clear_error(&mut self) {
        if matches!(self.status, FetchStatus::Failed(_)) {
            self.status = FetchStatus::Idle;
        }
    }

    fn refilter(&mut self) {
        self.filtered = apply_filters(self.window.slice(), &self.filters);
    }

    // ───────────────────── Reads ─────────────────────

    pub fn status(&self) -> &FetchStatus {
        &self.status
    }

    pub fn loading(&self) -> bool {
        self.status == FetchStatus::Loading
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            FetchStatus::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn full_dataset(&self) -> &[EarthquakeRecord] {
        self.window.records()
    }

    pub fn page_slice(&self) -> &[EarthquakeRecord] {
        self.window.slice()
    }

    pub fn filtered_view(&self) -> &[EarthquakeRecord] {
        &self.filtered
    }

    pub fn filters(&self) -> &FilterSpec {
        &self.filters
    }

    pub fn chart_config(&self) -> ChartAxisConfig {
        self.chart
    }

    pub fn selected_record(&self) -> Option<&EarthquakeRecord> {
        self.selected.as_ref()
    }

    pub fn total_items(&self) -> usize {
        self.window.total()
    }

    pub fn page_index(&self) -> usize {
        self.window.page_index()
    }

    pub fn window(&self) -> &PaginationWindow {
        &self.window
    }

    pub fn page_summary(&self) -> PageSummary {
        self.window.summary()
    }

    /// The filtered view projected onto the configured axes.
    pub fn chart_points(&self, highlighted_id: Option<&str>) -> Vec<ChartPoint> {
        project(&self.filtered, &self.chart, highlighted_id)
    }

    /// Look up a record on the current page by id.
    pub fn find_on_page(&self, id: &str) -> Option<&EarthquakeRecord> {
        self.page_slice().iter().find(|r| r.id == id)
    }
}

/// Cheaply cloneable shared handle for a single-threaded UI.
///
/// Borrows are never held across the fetch's `.await`.
#[derive(Clone, Default)]
pub struct DatasetHandle {
    inner: Rc<RefCell<DatasetStore>>,
}

impl DatasetHandle {
    pub fn new(store: DatasetStore) -> Self {
        Self {
            inner: Rc::new(RefCell::new(store)),
        }
    }

    pub fn read(&self) -> Ref<'_, DatasetStore> {
        self.inner.borrow()
    }

    /// Fetch the feed from `source` and apply the outcome, unless another
    /// fetch was started in the meantime. Returns whether it was applied.
    pub async fn fetch<S: RecordSource>(&self, page: usize, source: &S) -> bool {
        let ticket = self.inner.borrow_mut().begin_fetch(page);
        debug!("Fetch #{} awaiting {}", ticket.generation(), source.describe());
        let outcome = source.fetch_records().await;
        self.inner.borrow_mut().complete_fetch(ticket, outcome)
    }

    pub fn begin_fetch(&self, page: usize) -> FetchTicket {
        self.inner.borrow_mut().begin_fetch(page)
    }

    pub fn complete_fetch(
        &self,
        ticket: FetchTicket,
        outcome: Result<Vec<EarthquakeRecord>, FetchError>,
    ) -> bool {
        self.inner.borrow_mut().complete_fetch(ticket, outcome)
    }

    pub fn set_filters(&self, patch: FilterPatch) {
        self.inner.borrow_mut().set_filters(patch)
    }

    pub fn set_chart_axis(&self, axis: Axis, field: ChartField) {
        self.inner.borrow_mut().set_chart_axis(axis, field)
    }

    pub fn set_page(&self, zero_based: usize) {
        self.inner.borrow_mut().set_page(zero_based)
    }

    pub fn set_selected_record(&self, record: Option<EarthquakeRecord>) {
        self.inner.borrow_mut().set_selected_record(record)
    }

    pub fn clear_error(&self) {
        self.inner.borrow_mut().clear_error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::tests::numbered;
    use quake_core::source::CsvTextSource;

    fn ids(records: &[EarthquakeRecord]) -> Vec<String> {
        records.iter().map(|r| r.id.clone()).collect()
    }

    fn loaded(count: usize) -> DatasetStore {
        let mut store = DatasetStore::with_page_size(10);
        let ticket = store.begin_fetch(1);
        assert!(store.complete_fetch(ticket, Ok(numbered(count))));
        store
    }

    #[test]
    fn test_initial_state() {
        let store = DatasetStore::new();
        assert_eq!(store.status(), &FetchStatus::Idle);
        assert!(!store.loading());
        assert_eq!(store.error(), None);
        assert_eq!(store.page_index(), 1);
        assert_eq!(store.total_items(), 0);
        assert_eq!(store.chart_config(), ChartAxisConfig::default());
        assert_eq!(store.filters(), &FilterSpec::default());
        assert!(store.selected_record().is_none());
    }

    #[test]
    fn test_paged_filter_scenario() {
        let mut records = numbered(25);
        // Only q2, q5 and q7 on the first page reach magnitude 5.
        for (i, record) in records.iter_mut().enumerate() {
            record.mag = match i {
                2 | 5 | 7 => 5.5,
                i if i < 10 => 1.0,
                i if i % 2 == 0 => 6.0,
                _ => 2.0,
            };
        }
        let mut store = DatasetStore::with_page_size(10);
        let ticket = store.begin_fetch(1);
        store.complete_fetch(ticket, Ok(records.clone()));
        assert_eq!(ids(store.page_slice()), ids(&records[0..10]));
        assert_eq!(store.total_items(), 25);

        store.set_filters(FilterPatch {
            min_magnitude: Some(5.0),
            ..FilterPatch::default()
        });
        assert_eq!(ids(store.filtered_view()), vec!["q2", "q5", "q7"]);
        assert_eq!(store.full_dataset().len(), 25);
        assert_eq!(store.total_items(), 25);

        store.set_page(1);
        assert_eq!(ids(store.page_slice()), ids(&records[10..20]));
        assert_eq!(
            ids(store.filtered_view()),
            vec!["q10", "q12", "q14", "q16", "q18"]
        );
        assert_eq!(store.filters().min_magnitude, 5.0);
    }

    #[test]
    fn test_pending_keeps_previous_data() {
        let mut store = loaded(25);
        store.begin_fetch(1);
        assert!(store.loading());
        assert_eq!(store.error(), None);
        assert_eq!(store.total_items(), 25);
        assert_eq!(store.page_slice().len(), 10);
    }

    #[test]
    fn test_rejection_without_message_uses_fallback() {
        let mut store = loaded(25);
        let ticket = store.begin_fetch(1);
        store.complete_fetch(ticket, Err(FetchError::Unspecified));
        assert!(!store.loading());
        assert_eq!(store.error(), Some(FETCH_FALLBACK_MESSAGE));
        assert_eq!(store.total_items(), 25);
        assert_eq!(store.filtered_view().len(), 10);
    }

    #[test]
    fn test_rejection_with_message() {
        let mut store = DatasetStore::new();
        let ticket = store.begin_fetch(1);
        store.complete_fetch(ticket, Err(FetchError::Status(500)));
        assert_eq!(store.error(), Some("Bad response status: 500"));
        assert_eq!(store.total_items(), 0);

        store.clear_error();
        assert_eq!(store.error(), None);
        assert_eq!(store.status(), &FetchStatus::Idle);
    }

    #[test]
    fn test_refetch_resumes_current_page() {
        let mut store = loaded(25);
        store.set_page(1);
        let ticket = store.begin_fetch(1);
        store.complete_fetch(ticket, Ok(numbered(30)));
        assert_eq!(store.page_index(), 2);
        assert_eq!(store.page_slice()[0].id, "q10");
        assert_eq!(store.total_items(), 30);
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut store = DatasetStore::with_page_size(10);
        let first = store.begin_fetch(1);
        let second = store.begin_fetch(1);

        assert!(store.complete_fetch(second, Ok(numbered(12))));
        assert!(!store.complete_fetch(first, Ok(numbered(40))));
        assert_eq!(store.total_items(), 12);
        assert_eq!(store.status(), &FetchStatus::Loaded);

        // A stale failure cannot overwrite newer data either.
        let third = store.begin_fetch(1);
        let fourth = store.begin_fetch(1);
        assert!(store.complete_fetch(fourth, Ok(numbered(5))));
        assert!(!store.complete_fetch(third, Err(FetchError::Timeout)));
        assert_eq!(store.error(), None);
        assert_eq!(store.total_items(), 5);
    }

    #[test]
    fn test_stale_response_while_newer_in_flight() {
        let mut store = loaded(25);
        let first = store.begin_fetch(1);
        let _second = store.begin_fetch(1);
        assert!(!store.complete_fetch(first, Ok(numbered(3))));
        assert!(store.loading());
        assert_eq!(store.total_items(), 25);
    }

    #[test]
    fn test_selection_survives_page_change() {
        let mut store = loaded(25);
        let pick = store.page_slice()[3].clone();
        store.set_selected_record(Some(pick.clone()));
        store.set_page(2);
        assert_eq!(store.selected_record(), Some(&pick));
        store.set_selected_record(None);
        assert!(store.selected_record().is_none());
    }

    #[test]
    fn test_set_chart_axis_and_points() {
        let mut store = loaded(12);
        store.set_chart_axis(Axis::X, ChartField::Latitude);
        store.set_chart_axis(Axis::Y, ChartField::Mag);
        let points = store.chart_points(Some("q4"));
        assert_eq!(points.len(), 10);
        assert_eq!(points[4].x, 10.0);
        assert_eq!(points[4].y, 4.0);
        assert!(points[4].highlighted);
    }

    #[test]
    fn test_find_on_page() {
        let mut store = loaded(25);
        assert!(store.find_on_page("q3").is_some());
        assert!(store.find_on_page("q13").is_none());
        store.set_page(1);
        assert!(store.find_on_page("q13").is_some());
    }

    #[test]
    fn test_out_of_range_page_is_empty_not_error() {
        let mut store = loaded(25);
        store.set_page(9);
        assert!(store.page_slice().is_empty());
        assert!(store.filtered_view().is_empty());
        assert_eq!(store.error(), None);
    }

    #[tokio::test]
    async fn test_handle_fetch_from_source() {
        let handle = DatasetHandle::new(DatasetStore::with_page_size(2));
        let feed = "time,latitude,longitude,mag,id\n\
                    2024-01-01,1,1,2.5,a\n\
                    2024-01-02,2,2,4.5,b\n\
                    2024-01-03,3,3,6.5,c\n";
        let applied = handle.fetch(1, &CsvTextSource::Text(feed.to_string())).await;
        assert!(applied);
        let store = handle.read();
        assert_eq!(store.status(), &FetchStatus::Loaded);
        assert_eq!(ids(store.page_slice()), vec!["a", "b"]);
        assert_eq!(store.total_items(), 3);
    }

    #[tokio::test]
    async fn test_handle_fetch_failure_keeps_data() {
        let handle = DatasetHandle::new(DatasetStore::with_page_size(10));
        let ticket = handle.begin_fetch(1);
        handle.complete_fetch(ticket, Ok(numbered(4)));

        let missing = CsvTextSource::File("no/such/feed.csv".into());
        assert!(handle.fetch(1, &missing).await);
        let store = handle.read();
        assert!(store.error().unwrap().starts_with("Failed to read feed file"));
        assert_eq!(store.total_items(), 4);
    }
}
