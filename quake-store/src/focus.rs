//! Transient pointer focus and the multi-select working set.
//!
//! Independent of the dataset lifecycle: nothing here is recomputed when
//! data is fetched, filtered or paged.

use quake_core::record::EarthquakeRecord;
use std::cell::{Ref, RefCell};
use std::rc::Rc;

#[derive(Debug, Clone, Default)]
pub struct FocusStore {
    highlighted: Option<EarthquakeRecord>,
    selection_set: Vec<EarthquakeRecord>,
}

impl FocusStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last write wins; `None` clears the highlight.
    pub fn set_highlighted(&mut self, record: Option<EarthquakeRecord>) {
        self.highlighted = record;
    }

    pub fn highlighted(&self) -> Option<&EarthquakeRecord> {
        self.highlighted.as_ref()
    }

    /// Insert keyed by id. Returns `false` if the id was already present.
    pub fn add_to_selection_set(&mut self, record: EarthquakeRecord) -> bool {
        if self.is_selected(&record.id) {
            return false;
        }
        self.selection_set.push(record);
        true
    }

    /// Returns `false` if nothing had that id.
    pub fn remove_from_selection_set(&mut self, id: &str) -> bool {
        let before = self.selection_set.len();
        self.selection_set.retain(|r| r.id != id);
        self.selection_set.len() != before
    }

    pub fn clear_selection_set(&mut self) {
        self.selection_set.clear();
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selection_set.iter().any(|r| r.id == id)
    }

    /// In insertion order.
    pub fn selection_set(&self) -> &[EarthquakeRecord] {
        &self.selection_set
    }
}

#[derive(Clone, Default)]
pub struct FocusHandle {
    inner: Rc<RefCell<FocusStore>>,
}

impl FocusHandle {
    pub fn new(store: FocusStore) -> Self {
        Self {
            inner: Rc::new(RefCell::new(store)),
        }
    }

    pub fn read(&self) -> Ref<'_, FocusStore> {
        self.inner.borrow()
    }

    pub fn set_highlighted(&self, record: Option<EarthquakeRecord>) {
        self.inner.borrow_mut().set_highlighted(record)
    }

    pub fn add_to_selection_set(&self, record: EarthquakeRecord) -> bool {
        self.inner.borrow_mut().add_to_selection_set(record)
    }

    pub fn remove_from_selection_set(&self, id: &str) -> bool {
        self.inner.borrow_mut().remove_from_selection_set(id)
    }

    pub fn clear_selection_set(&self) {
        self.inner.borrow_mut().clear_selection_set()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.inner.borrow().is_selected(id)
    }
}
