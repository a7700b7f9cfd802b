//! Shared types for the macroeconomic dashboard.
//!
//! - **table**: the canonical (Category, Year, Value) table and its pivot view
//! - **descriptor**: static per-dataset loading rules
//! - **error**: selection and pivot errors surfaced to the presentation layer

pub mod descriptor;
pub mod error;
pub mod table;

pub use descriptor::{DatasetDescriptor, Layout, MetadataRowRule, Sector};
pub use error::{PivotError, SelectionError};
pub use table::{PivotRow, PivotTable, TidyRow, TidyTable};
