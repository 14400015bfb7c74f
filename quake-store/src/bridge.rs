//! Keeps the persisted selection (dataset store) and the transient highlight
//! (focus store) in agreement for the same user action.
//!
//! Views never write either store directly for record picking; they go
//! through a [`SelectionContext`], built once at wiring time and passed down.
//! A click sets both slots, a hover only the highlight.

use crate::dataset::DatasetHandle;
use crate::detail::RecordDetail;
use crate::focus::FocusHandle;
use log::debug;
use quake_core::record::EarthquakeRecord;
use thiserror::Error;

/// A selection context was wired without one of its stores.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WiringError {
    #[error("selection context requires a dataset store handle")]
    MissingDataset,
    #[error("selection context requires a focus store handle")]
    MissingFocus,
}

#[derive(Default)]
pub struct SelectionContextBuilder {
    dataset: Option<DatasetHandle>,
    focus: Option<FocusHandle>,
}

impl SelectionContextBuilder {
    pub fn dataset(mut self, handle: DatasetHandle) -> Self {
        self.dataset = Some(handle);
        self
    }

    pub fn focus(mut self, handle: FocusHandle) -> Self {
        self.focus = Some(handle);
        self
    }

    pub fn build(self) -> Result<SelectionContext, WiringError> {
        let dataset = self.dataset.ok_or(WiringError::MissingDataset)?;
        let focus = self.focus.ok_or(WiringError::MissingFocus)?;
        Ok(SelectionContext { dataset, focus })
    }
}

#[derive(Clone)]
pub struct SelectionContext {
    dataset: DatasetHandle,
    focus: FocusHandle,
}

impl SelectionContext {
    pub fn new(dataset: DatasetHandle, focus: FocusHandle) -> Self {
        Self { dataset, focus }
    }

    pub fn builder() -> SelectionContextBuilder {
        SelectionContextBuilder::default()
    }

    /// Click on a row or chart point: persist and emphasize.
    pub fn click(&self, record: &EarthquakeRecord) {
        debug!("Click on {}", record.id);
        self.dataset.set_selected_record(Some(record.clone()));
        self.focus.set_highlighted(Some(record.clone()));
    }

    /// Pointer enters a row or point (`Some`) or leaves it (`None`).
    pub fn hover(&self, record: Option<&EarthquakeRecord>) {
        self.focus.set_highlighted(record.cloned());
    }

    pub fn pointer_leave(&self) {
        self.hover(None);
    }

    /// Set or clear the persisted selection alone.
    pub fn select(&self, record: Option<EarthquakeRecord>) {
        self.dataset.set_selected_record(record);
    }

    pub fn selected(&self) -> Option<EarthquakeRecord> {
        self.dataset.read().selected_record().cloned()
    }

    pub fn highlighted(&self) -> Option<EarthquakeRecord> {
        self.focus.read().highlighted().cloned()
    }

    pub fn highlighted_id(&self) -> Option<String> {
        self.focus.read().highlighted().map(|r| r.id.clone())
    }

    /// Whether a table row should render as the selected one.
    pub fn is_selected_row(&self, id: &str) -> bool {
        self.dataset
            .read()
            .selected_record()
            .is_some_and(|r| r.id == id)
    }

    pub fn detail(&self) -> Option<RecordDetail> {
        self.dataset.read().selected_record().map(RecordDetail::from)
    }

    pub fn dataset(&self) -> &DatasetHandle {
        &self.dataset
    }

    pub fn focus(&self) -> &FocusHandle {
        &self.focus
    }
}
