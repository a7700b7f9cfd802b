//! Raw grid to long-format normalization.
//!
//! Each [`Layout`] variant has its own melt routine:
//!
//! - **simple**: category column followed by period columns
//! - **merged**: a period column plus one column per category
//! - **hierarchical**: section/sub-item outline spread over two columns
//!
//! All of them emit [`LongRow`]s whose values are still text; rows with a
//! blank category are removed here, before any value is coerced.

mod hierarchical;
mod merged;
pub mod numeric;
mod simple;

use econ_ingest::RawGrid;
use econ_model::Layout;

use crate::error::SchemaError;

pub use hierarchical::{SectionState, section_categories};
pub use numeric::{CoercionError, coerce_value, format_thousands};

/// One melted cell, prior to value coercion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LongRow {
    pub category: String,
    pub year: String,
    pub raw_value: String,
}

impl LongRow {
    pub fn new(
        category: impl Into<String>,
        year: impl Into<String>,
        raw_value: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            year: year.into(),
            raw_value: raw_value.into(),
        }
    }
}

/// Output of [`normalize_grid`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Melted {
    pub rows: Vec<LongRow>,
    /// Cells dropped because their category label was blank.
    pub empty_category: usize,
}

/// Melts a grid into long rows according to `layout`.
pub fn normalize_grid(grid: &RawGrid, layout: &Layout) -> Result<Melted, SchemaError> {
    let mut rows = match layout {
        Layout::Simple => simple::melt(grid)?,
        Layout::MergedHeader {
            period_aliases,
            excluded_category,
        } => merged::melt(grid, period_aliases, *excluded_category)?,
        Layout::Hierarchical {
            section_headers,
            period_tokens,
        } => hierarchical::melt(grid, section_headers, period_tokens)?,
    };
    let before = rows.len();
    rows.retain(|row| !row.category.trim().is_empty());
    Ok(Melted {
        empty_category: before - rows.len(),
        rows,
    })
}

pub(crate) fn ensure_width(grid: &RawGrid, expected: usize) -> Result<(), SchemaError> {
    if grid.width() < expected {
        return Err(SchemaError::TooFewColumns {
            expected,
            found: grid.width(),
        });
    }
    Ok(())
}
