//! Wide table with the category in the first column.

use econ_ingest::RawGrid;

use super::{LongRow, ensure_width};
use crate::error::SchemaError;

/// Melts every (category, period) cell. Columns with a blank header are
/// spacer columns and carry no period.
pub(super) fn melt(grid: &RawGrid) -> Result<Vec<LongRow>, SchemaError> {
    ensure_width(grid, 2)?;
    let periods: Vec<(usize, &str)> = (1..grid.width())
        .map(|col| (col, grid.header(col)))
        .filter(|(_, header)| !header.is_empty())
        .collect();

    let mut rows = Vec::with_capacity(grid.height() * periods.len());
    for row in 0..grid.height() {
        let category = grid.cell(row, 0);
        for &(col, year) in &periods {
            rows.push(LongRow::new(category, year, grid.cell(row, col)));
        }
    }
    Ok(rows)
}
