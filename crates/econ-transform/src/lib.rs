//! Normalization, coercion and trend projection for the dashboard.
//!
//! A dataset travels through three stages:
//!
//! 1. [`normalization::normalize_grid`] melts a [`econ_ingest::RawGrid`] into
//!    long rows according to the descriptor's layout
//! 2. [`normalization::coerce_value`] turns each cell into an `f64`; cells
//!    that fail are dropped and counted in [`pipeline::LoadStats`]
//! 3. the surviving rows form an [`econ_model::TidyTable`]
//!
//! [`trend::project_trend`] fits a line through one category of that table,
//! and [`frame`] exposes the table to polars for export.

pub mod error;
pub mod frame;
pub mod normalization;
pub mod pipeline;
pub mod trend;

pub use error::{LoadError, SchemaError};
pub use frame::{pivot_frame, tidy_frame, write_csv};
pub use normalization::{CoercionError, coerce_value, format_thousands, normalize_grid};
pub use pipeline::{LoadStats, LoadedDataset, load_all, load_dataset, normalize_table, read_options};
pub use trend::{LinearFit, TrendPoint, TrendProjection, fit_line, project_trend};
