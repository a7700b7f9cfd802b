//! Period column plus one column per category (e.g. Buying/Selling/Middle).

use econ_ingest::RawGrid;

use super::{LongRow, ensure_width};
use crate::error::SchemaError;

fn is_period_header(header: &str, aliases: &[&str]) -> bool {
    header.is_empty()
        || aliases.iter().any(|alias| alias.eq_ignore_ascii_case(header))
}

pub(super) fn melt(
    grid: &RawGrid,
    period_aliases: &[&str],
    excluded_category: Option<&str>,
) -> Result<Vec<LongRow>, SchemaError> {
    ensure_width(grid, 2)?;
    let period_col = (0..grid.width())
        .find(|&col| is_period_header(grid.header(col), period_aliases))
        .ok_or_else(|| SchemaError::MissingPeriodColumn {
            aliases: period_aliases.join(", "),
        })?;
    let categories: Vec<(usize, &str)> = (0..grid.width())
        .filter(|&col| col != period_col)
        .map(|col| (col, grid.header(col)))
        .filter(|(_, header)| !header.is_empty())
        .filter(|(_, header)| excluded_category.is_none_or(|excluded| excluded.trim() != *header))
        .collect();

    let mut rows = Vec::with_capacity(grid.height() * categories.len());
    for row in 0..grid.height() {
        let year = grid.cell(row, period_col);
        if year.is_empty() {
            continue;
        }
        for &(col, category) in &categories {
            rows.push(LongRow::new(category, year, grid.cell(row, col)));
        }
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::super::test_support::grid;
    use super::*;

    #[test]
    fn blank_header_is_period_column() {
        let raw = grid(
            &["", "Buying", "Selling", "Middle"],
            &[&["2022/23", "130.1", "130.7", "130.4"]],
        );
        let rows = melt(&raw, &["Year"], Some("Middle")).unwrap();
        assert_eq!(
            rows,
            vec![
                LongRow::new("Buying", "2022/23", "130.1"),
                LongRow::new("Selling", "2022/23", "130.7"),
            ]
        );
    }

    #[test]
    fn alias_header_is_period_column() {
        let raw = grid(&["Buying", "year"], &[&["1.5", "2024"]]);
        let rows = melt(&raw, &["Year"], None).unwrap();
        assert_eq!(rows, vec![LongRow::new("Buying", "2024", "1.5")]);
    }

    #[test]
    fn only_blank_or_alias_headers_mark_the_period() {
        let raw = grid(&["Unnamed: 0", "Year", "Buying"], &[&["x", "2024", "2"]]);
        let rows = melt(&raw, &["Year"], None).unwrap();
        assert_eq!(
            rows,
            vec![
                LongRow::new("Unnamed: 0", "2024", "x"),
                LongRow::new("Buying", "2024", "2"),
            ]
        );
    }

    #[test]
    fn rows_without_period_are_skipped() {
        let raw = grid(&["", "Buying"], &[&["", "1"], &["2024", "2"]]);
        let rows = melt(&raw, &[], None).unwrap();
        assert_eq!(rows, vec![LongRow::new("Buying", "2024", "2")]);
    }

    #[test]
    fn missing_period_column_is_schema_error() {
        let raw = grid(&["Buying", "Selling"], &[&["1", "2"]]);
        assert_eq!(
            melt(&raw, &["Year", "Fiscal Year"], None),
            Err(SchemaError::MissingPeriodColumn {
                aliases: "Year, Fiscal Year".to_string()
            })
        );
    }
}
