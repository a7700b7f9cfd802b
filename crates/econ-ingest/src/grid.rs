//! Untyped row/column grid read from a source file.

/// Header row plus data rows, all as trimmed strings.
///
/// Rows are not padded: a malformed export may produce ragged rows, so
/// read cells through [`RawGrid::cell`] rather than indexing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawGrid {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawGrid {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Number of header columns.
    pub fn width(&self) -> usize {
        self.headers.len()
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Cell text, or `""` when the row is shorter than `col`.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(col))
            .map_or("", String::as_str)
    }

    pub fn header(&self, col: usize) -> &str {
        self.headers.get(col).map_or("", String::as_str)
    }

    /// Index of the first header equal to `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Removes a column from the header and from every row long enough to
    /// have it.
    pub fn remove_column(&mut self, col: usize) {
        if col < self.headers.len() {
            self.headers.remove(col);
        }
        for row in &mut self.rows {
            if col < row.len() {
                row.remove(col);
            }
        }
    }

    /// Drops every column whose data cells are all blank. Returns the
    /// removed header names.
    pub fn drop_empty_columns(&mut self) -> Vec<String> {
        let mut removed = Vec::new();
        for col in (0..self.width()).rev() {
            let blank = (0..self.height()).all(|row| self.cell(row, col).is_empty());
            if blank {
                removed.push(self.headers[col].clone());
                self.remove_column(col);
            }
        }
        removed.reverse();
        removed
    }
}
