//! Full dataset ownership and the current page window.
//!
//! The full record set is held behind an `Rc<[_]>` so that handing it out
//! or re-slicing it never copies records.

use quake_core::record::EarthquakeRecord;
use serde::Serialize;
use std::rc::Rc;

/// Item range and page count for a "start - end of total" label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageSummary {
    /// 1-based position of the first item on the page; 0 when the page is empty.
    pub start_item: usize,
    pub end_item: usize,
    pub total: usize,
    pub page_count: usize,
}

#[derive(Debug, Clone)]
pub struct PaginationWindow {
    records: Rc<[EarthquakeRecord]>,
    /// 1-based.
    page_index: usize,
    page_size: usize,
}

impl PaginationWindow {
    /// An empty window on page 1.
    pub fn new(page_size: usize) -> Self {
        Self {
            records: Rc::from(Vec::new()),
            page_index: 1,
            page_size,
        }
    }

    /// Replace the full dataset. The page index is left where it is.
    pub fn load(&mut self, records: Vec<EarthquakeRecord>) {
        self.records = Rc::from(records);
    }

    /// Move to the page a zero-based pagination control reports.
    pub fn set_page(&mut self, zero_based: usize) {
        self.page_index = zero_based.saturating_add(1);
    }

    /// Set the stored 1-based index directly, e.g. to resume on a page.
    pub fn set_page_index(&mut self, page_index: usize) {
        self.page_index = page_index;
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// `[start, end)` of the current page in the full dataset.
    ///
    /// Both ends saturate at `usize::MAX`, so an absurd page is just past the end.
    /// Index 0 maps to the window at `page_size`, the same as index 2.
    pub fn bounds(&self) -> (usize, usize) {
        let page = if self.page_index > 0 {
            self.page_index - 1
        } else {
            1
        };
        let start = page.saturating_mul(self.page_size);
        (start, start.saturating_add(self.page_size))
    }

    /// The current page. Empty when the page lies past the end of the data.
    pub fn slice(&self) -> &[EarthquakeRecord] {
        let (start, end) = self.bounds();
        let len = self.records.len();
        &self.records[start.min(len)..end.min(len)]
    }

    pub fn records(&self) -> &[EarthquakeRecord] {
        &self.records
    }

    /// Shared handle to the full dataset.
    pub fn shared(&self) -> Rc<[EarthquakeRecord]> {
        Rc::clone(&self.records)
    }

    pub fn total(&self) -> usize {
        self.records.len()
    }

    pub fn visible(&self) -> usize {
        self.slice().len()
    }

    pub fn page_count(&self) -> usize {
        if self.page_size == 0 {
            return 0;
        }
        self.total().div_ceil(self.page_size)
    }

    /// Past the end of the data both `start_item` and `end_item` are 0.
    pub fn summary(&self) -> PageSummary {
        let total = self.total();
        let (start, end) = self.bounds();
        let empty = start >= total;
        PageSummary {
            start_item: if empty { 0 } else { start + 1 },
            end_item: if empty { 0 } else { end.min(total) },
            total,
            page_count: self.page_count(),
        }
    }
}
