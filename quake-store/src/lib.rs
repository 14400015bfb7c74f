//! State containers behind the table and chart views.
//!
//! This crate provides:
//! - `pagination`: the full dataset and its current page window
//! - `dataset`: the authoritative [`dataset::DatasetStore`] and its shared handle
//! - `focus`: the transient highlight and multi-select set
//! - `bridge`: the [`bridge::SelectionContext`] that keeps the two stores in agreement
//! - `table`: grid-local sort and search
//! - `detail`: detail panel content for the selected record

pub mod bridge;
pub mod dataset;
pub mod detail;
pub mod focus;
pub mod pagination;
pub mod table;
