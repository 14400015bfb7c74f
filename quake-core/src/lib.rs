//! Core types for the earthquake feed.
//!
//! - `record`: the normalized [`record::EarthquakeRecord`] and the CSV row normalizer
//! - `filter`: [`filter::FilterSpec`] and the pure filter engine
//! - `chart`: axis configuration and scatter projection
//! - `source`: the [`source::RecordSource`] seam and its offline implementation
//! - `http` (feature `api`): the reqwest-backed feed client

pub mod chart;
pub mod config;
pub mod error;
pub mod filter;
#[cfg(feature = "api")]
pub mod http;
pub mod record;
pub mod source;
