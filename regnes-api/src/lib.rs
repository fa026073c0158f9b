//! Backend record types and API client for the RegNeS sentiment dashboard.
//!
//! The record types mirror the JSON bodies returned by the dashboard backend.
//! The HTTP client lives behind the `api` feature so that the transform
//! crates can depend on the types alone.

pub mod error;
pub mod heatmap;
pub mod indicator;
pub mod region;
pub mod status;
pub mod trend;

#[cfg(feature = "api")]
pub mod client;

pub use error::{ApiError, Result};
pub use indicator::{Field, HeatMetric, Indicator, RecordShape};
