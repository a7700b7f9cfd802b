//! Polars views of tidy and pivoted tables, used for CSV export.

use std::fs::File;
use std::path::Path;

use econ_model::{PivotTable, TidyTable};
use polars::prelude::{
    CsvWriter, DataFrame, IntoColumn, NamedFrom, PolarsResult, SerWriter, Series,
};

pub const CATEGORY_COLUMN: &str = "Category";
pub const YEAR_COLUMN: &str = "Year";
pub const VALUE_COLUMN: &str = "Value";

/// Long frame with `Category`, `Year` and `Value` columns.
pub fn tidy_frame(table: &TidyTable) -> PolarsResult<DataFrame> {
    let categories: Vec<&str> = table.iter().map(|row| row.category.as_str()).collect();
    let years: Vec<&str> = table.iter().map(|row| row.year.as_str()).collect();
    let values: Vec<f64> = table.iter().map(|row| row.value).collect();
    DataFrame::new(vec![
        Series::new(CATEGORY_COLUMN.into(), categories).into_column(),
        Series::new(YEAR_COLUMN.into(), years).into_column(),
        Series::new(VALUE_COLUMN.into(), values).into_column(),
    ])
}

/// Wide frame: `Year` followed by one nullable Float64 column per category.
pub fn pivot_frame(pivot: &PivotTable) -> PolarsResult<DataFrame> {
    let years: Vec<&str> = pivot.years().collect();
    let mut columns = Vec::with_capacity(pivot.categories.len() + 1);
    columns.push(Series::new(YEAR_COLUMN.into(), years).into_column());
    for (idx, category) in pivot.categories.iter().enumerate() {
        let values: Vec<Option<f64>> = pivot
            .rows
            .iter()
            .map(|row| row.values.get(idx).copied().flatten())
            .collect();
        columns.push(Series::new(category.as_str().into(), values).into_column());
    }
    DataFrame::new(columns)
}

/// Writes a frame as CSV with a header row.
pub fn write_csv(frame: &mut DataFrame, path: &Path) -> PolarsResult<()> {
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file).include_header(true).finish(frame)
}

#[cfg(test)]
mod tests {
    use econ_model::TidyRow;

    use super::*;

    fn rates() -> TidyTable {
        [
            TidyRow::new("Buying", "2022/23", 130.0),
            TidyRow::new("Selling", "2022/23", 130.6),
            TidyRow::new("Buying", "2023/24", 132.5),
        ]
        .into_iter()
        .collect()
    }

    fn column_names(df: &DataFrame) -> Vec<String> {
        df.get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect()
    }

    #[test]
    fn tidy_frame_has_long_columns() {
        let df = tidy_frame(&rates()).unwrap();
        assert_eq!(df.height(), 3);
        assert_eq!(column_names(&df), vec!["Category", "Year", "Value"]);
    }

    #[test]
    fn pivot_frame_leaves_gaps_null() {
        let pivot = rates().pivot_all().unwrap();
        let df = pivot_frame(&pivot).unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(column_names(&df), vec!["Year", "Buying", "Selling"]);
        assert_eq!(df.column("Selling").unwrap().null_count(), 1);
        assert_eq!(df.column("Buying").unwrap().null_count(), 0);
    }

    #[test]
    fn write_csv_emits_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rates.csv");
        let mut df = tidy_frame(&rates()).unwrap();
        write_csv(&mut df, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("Category,Year,Value\n"));
        assert_eq!(text.lines().count(), 4);
    }
}
