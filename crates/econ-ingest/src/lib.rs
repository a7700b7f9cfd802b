//! Raw table reading for spreadsheet-exported CSV files.
//!
//! Government statistics exports rarely start with a clean header: there may
//! be a title row above it, a serial-number column beside it and a banner row
//! (`Annual,Annual,...`) below it. This crate reads such a file into a
//! [`RawGrid`] with those artefacts removed; it does not interpret values.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use econ_ingest::{ReadOptions, read_raw_grid};
//!
//! let options = ReadOptions::default()
//!     .with_id_aliases(["S.N.", "S.No."])
//!     .with_metadata_detection(true);
//! let grid = read_raw_grid(Path::new("data/External Sector/Exports.csv"), &options)?;
//! ```

mod error;
mod grid;
mod reader;

pub use error::{IngestError, Result};
pub use grid::RawGrid;
pub use reader::{ReadOptions, is_metadata_row, read_raw_grid, read_raw_grid_from_reader};
