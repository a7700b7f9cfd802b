//! CSV file reading with banner-row, id-column and metadata-row handling.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use crate::error::{IngestError, Result};
use crate::grid::RawGrid;

/// Quirks of one source file that the reader strips before normalization.
#[derive(Debug, Clone)]
pub struct ReadOptions {
    /// Rows before the header row.
    pub skip_rows: usize,
    /// Leading label columns; the rest are expected to hold numbers.
    pub label_columns: usize,
    /// Drop the first data row if it carries no numeric values.
    pub detect_metadata_row: bool,
    /// Header names of a serial-number column to discard.
    pub id_column_aliases: Vec<String>,
    /// Drop columns whose data cells are all blank.
    pub drop_empty_columns: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            skip_rows: 0,
            label_columns: 1,
            detect_metadata_row: false,
            id_column_aliases: Vec::new(),
            drop_empty_columns: false,
        }
    }
}

impl ReadOptions {
    #[must_use]
    pub fn with_skip_rows(mut self, rows: usize) -> Self {
        self.skip_rows = rows;
        self
    }

    #[must_use]
    pub fn with_label_columns(mut self, columns: usize) -> Self {
        self.label_columns = columns;
        self
    }

    #[must_use]
    pub fn with_metadata_detection(mut self, enable: bool) -> Self {
        self.detect_metadata_row = enable;
        self
    }

    #[must_use]
    pub fn with_id_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.id_column_aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_drop_empty_columns(mut self, enable: bool) -> Self {
        self.drop_empty_columns = enable;
        self
    }
}

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// True for cells such as `1,234.5` or `-3`; placeholders like `-` are not.
fn is_numeric_like(cell: &str) -> bool {
    let stripped: String = cell.chars().filter(|ch| *ch != ',').collect();
    let stripped = stripped.trim();
    !stripped.is_empty() && stripped.parse::<f64>().is_ok_and(f64::is_finite)
}

/// A banner row (`Annual,Annual`, `Mid-Jul,...`) or a blank spacer row has
/// no numeric cell outside the label columns.
pub fn is_metadata_row(row: &[String], label_columns: usize) -> bool {
    !row.iter()
        .skip(label_columns)
        .any(|cell| is_numeric_like(cell))
}

/// Reads a CSV file into a [`RawGrid`].
pub fn read_raw_grid(path: &Path, options: &ReadOptions) -> Result<RawGrid> {
    let file = File::open(path).map_err(|e| IngestError::open(path, e))?;
    read_raw_grid_from_reader(file, path, options)
}

/// Reads CSV text from any reader; `path` only labels errors and logs.
pub fn read_raw_grid_from_reader<R: Read>(
    input: R,
    path: &Path,
    options: &ReadOptions,
) -> Result<RawGrid> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input);
    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    // Banner rows are counted as records even when every cell is blank.
    for record in reader.records().skip(options.skip_rows) {
        let record = record.map_err(|source| IngestError::CsvParse {
            path: path.to_path_buf(),
            source,
        })?;
        let row: Vec<String> = record.iter().map(normalize_cell).collect();
        if row.iter().all(String::is_empty) {
            continue;
        }
        raw_rows.push(row);
    }

    let mut rows = raw_rows.into_iter();
    let Some(header_row) = rows.next() else {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    };
    let headers = header_row.iter().map(|h| normalize_header(h)).collect();
    let mut grid = RawGrid::new(headers, rows.collect());

    if let Some(col) = grid
        .headers
        .iter()
        .position(|h| options.id_column_aliases.iter().any(|alias| alias == h))
    {
        debug!(path = %path.display(), column = %grid.headers[col], "stripping id column");
        grid.remove_column(col);
    }

    if options.detect_metadata_row
        && grid
            .rows
            .first()
            .is_some_and(|row| is_metadata_row(row, options.label_columns))
    {
        let banner = grid.rows.remove(0);
        debug!(path = %path.display(), row = ?banner, "skipping metadata row");
    }

    if options.drop_empty_columns {
        let removed = grid.drop_empty_columns();
        if !removed.is_empty() {
            debug!(path = %path.display(), columns = ?removed, "dropped empty columns");
        }
    }

    if grid.rows.is_empty() {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    fn read_str(content: &str, options: &ReadOptions) -> Result<RawGrid> {
        read_raw_grid_from_reader(content.as_bytes(), Path::new("inline.csv"), options)
    }

    #[test]
    fn test_read_simple_grid() {
        let file = create_temp_csv("Item,2021,2022\nTea,\"1,200\",1300\n");
        let grid = read_raw_grid(file.path(), &ReadOptions::default()).unwrap();
        assert_eq!(grid.headers, vec!["Item", "2021", "2022"]);
        assert_eq!(grid.rows, vec![vec!["Tea", "1,200", "1300"]]);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let result = read_raw_grid(Path::new("/no/such/file.csv"), &ReadOptions::default());
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }

    #[test]
    fn test_skip_rows_and_bom() {
        let grid = read_str(
            "\u{feff}Table 3: GDP,,\nSector,  2020/21 ,2021/22\nAgriculture,1,2\n",
            &ReadOptions::default().with_skip_rows(1),
        )
        .unwrap();
        assert_eq!(grid.headers, vec!["Sector", "2020/21", "2021/22"]);
        assert_eq!(grid.height(), 1);
    }

    #[test]
    fn test_skip_rows_counts_blank_banner() {
        let grid = read_str(
            ",,\nSector,2021/22,2022/23\nAgriculture,1,2\nIndustry,3,4\n",
            &ReadOptions::default().with_skip_rows(1),
        )
        .unwrap();
        assert_eq!(grid.headers, vec!["Sector", "2021/22", "2022/23"]);
        assert_eq!(
            grid.rows,
            vec![vec!["Agriculture", "1", "2"], vec!["Industry", "3", "4"]]
        );
    }

    #[test]
    fn test_strips_id_column_by_alias() {
        let options = ReadOptions::default().with_id_aliases(["S.N.", "S.No."]);
        let grid = read_str("S.No.,Item,2021\n1,Tea,5\n2,Rice,6\n", &options).unwrap();
        assert_eq!(grid.headers, vec!["Item", "2021"]);
        assert_eq!(grid.rows[1], vec!["Rice", "6"]);
    }

    #[test]
    fn test_detects_annual_banner() {
        let options = ReadOptions::default().with_metadata_detection(true);
        let grid = read_str("Item,2021,2022\n,Annual,Annual\nTea,5,6\n", &options).unwrap();
        assert_eq!(grid.rows, vec![vec!["Tea", "5", "6"]]);
    }

    #[test]
    fn test_keeps_numeric_first_row() {
        let options = ReadOptions::default().with_metadata_detection(true);
        let grid = read_str("Item,2021,2022\nTea,\"1,000\",\nRice,1,2\n", &options).unwrap();
        assert_eq!(grid.height(), 2);
    }

    #[test]
    fn test_metadata_detection_off_keeps_banner() {
        let grid = read_str("Item,2021\nAnnual,Annual\nTea,5\n", &ReadOptions::default()).unwrap();
        assert_eq!(grid.height(), 2);
    }

    #[test]
    fn test_empty_after_banner_is_error() {
        let options = ReadOptions::default().with_metadata_detection(true);
        let result = read_str("Item,2021\nMid-Jul,Mid-Jul\n", &options);
        assert!(matches!(result, Err(IngestError::EmptyCsv { .. })));
        let result = read_str("", &ReadOptions::default());
        assert!(matches!(result, Err(IngestError::EmptyCsv { .. })));
    }

    #[test]
    fn test_ragged_rows_are_tolerated() {
        let grid = read_str("Item,2021,2022\nTea,5\nRice,1,2,9\n", &ReadOptions::default()).unwrap();
        assert_eq!(grid.cell(0, 2), "");
        assert_eq!(grid.rows[1].len(), 4);
    }

    #[test]
    fn test_metadata_row_predicate() {
        let row = |cells: &[&str]| cells.iter().map(ToString::to_string).collect::<Vec<_>>();
        assert!(is_metadata_row(&row(&["", "Annual", "Annual"]), 1));
        assert!(is_metadata_row(&row(&["Total", "", "-"]), 1));
        assert!(!is_metadata_row(&row(&["", "1,234", ""]), 1));
        assert!(is_metadata_row(&row(&["A", "2023", ""]), 2));
    }
}
