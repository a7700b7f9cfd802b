//! Canonical long-format table shared by every dataset.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::error::{PivotError, SelectionError};

/// One observation: a category's value for one period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TidyRow {
    pub category: String,
    /// Opaque period label ("2019", "2022/23", "Mid-Jul 2024").
    pub year: String,
    pub value: f64,
}

impl TidyRow {
    pub fn new(category: impl Into<String>, year: impl Into<String>, value: f64) -> Self {
        Self {
            category: category.into(),
            year: year.into(),
            value,
        }
    }
}

/// Ordered tidy rows plus insertion-ordered category and period indexes.
///
/// Every stored row has a non-blank category and a finite value.
/// (Category, Year) pairs may repeat; [`TidyTable::pivot`] reports that.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TidyTable {
    rows: Vec<TidyRow>,
    #[serde(skip)]
    categories: Vec<String>,
    #[serde(skip)]
    years: Vec<String>,
    #[serde(skip)]
    seen_categories: BTreeSet<String>,
    #[serde(skip)]
    seen_years: BTreeSet<String>,
}

impl TidyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a row, trimming its labels.
    ///
    /// Returns false (and stores nothing) for a blank category or a
    /// non-finite value.
    pub fn push(&mut self, row: TidyRow) -> bool {
        let category = row.category.trim();
        if category.is_empty() || !row.value.is_finite() {
            return false;
        }
        let category = category.to_string();
        let year = row.year.trim().to_string();
        if self.seen_categories.insert(category.clone()) {
            self.categories.push(category.clone());
        }
        if self.seen_years.insert(year.clone()) {
            self.years.push(year.clone());
        }
        self.rows.push(TidyRow {
            category,
            year,
            value: row.value,
        });
        true
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[TidyRow] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TidyRow> {
        self.rows.iter()
    }

    /// Distinct categories in first-appearance order.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Distinct period labels in first-appearance order.
    pub fn years(&self) -> &[String] {
        &self.years
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.seen_categories.contains(category.trim())
    }

    /// Rows of one category, in table order.
    pub fn rows_for(&self, category: &str) -> Vec<&TidyRow> {
        let category = category.trim();
        self.rows
            .iter()
            .filter(|row| row.category == category)
            .collect()
    }

    /// `(year, value)` pairs of one category, in table order.
    pub fn series(&self, category: &str) -> Vec<(&str, f64)> {
        self.rows_for(category)
            .into_iter()
            .map(|row| (row.year.as_str(), row.value))
            .collect()
    }

    /// Builds a Year x Category matrix for the selected categories.
    ///
    /// Unknown categories are ignored. Fails when nothing remains selected
    /// or when a (category, year) pair occurs twice.
    pub fn pivot<S: AsRef<str>>(&self, categories: &[S]) -> Result<PivotTable, PivotError> {
        let mut selected: Vec<String> = Vec::new();
        for category in categories {
            let category = category.as_ref().trim();
            if self.has_category(category) && !selected.iter().any(|c| c == category) {
                selected.push(category.to_string());
            }
        }
        if selected.is_empty() {
            return Err(SelectionError::NoCategories.into());
        }
        let column_of: BTreeMap<&str, usize> = selected
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.as_str(), idx))
            .collect();

        let mut rows: Vec<PivotRow> = Vec::new();
        let mut row_of: BTreeMap<&str, usize> = BTreeMap::new();
        for row in &self.rows {
            let Some(&column) = column_of.get(row.category.as_str()) else {
                continue;
            };
            let row_idx = *row_of.entry(row.year.as_str()).or_insert_with(|| {
                rows.push(PivotRow {
                    year: row.year.clone(),
                    values: vec![None; selected.len()],
                });
                rows.len() - 1
            });
            let slot = &mut rows[row_idx].values[column];
            if slot.is_some() {
                return Err(PivotError::DuplicateEntry {
                    category: row.category.clone(),
                    year: row.year.clone(),
                });
            }
            *slot = Some(row.value);
        }

        Ok(PivotTable {
            categories: selected,
            rows,
        })
    }

    /// Pivot over every category.
    pub fn pivot_all(&self) -> Result<PivotTable, PivotError> {
        self.pivot(&self.categories)
    }
}

impl FromIterator<TidyRow> for TidyTable {
    fn from_iter<I: IntoIterator<Item = TidyRow>>(iter: I) -> Self {
        let mut table = TidyTable::new();
        for row in iter {
            table.push(row);
        }
        table
    }
}

impl<'a> IntoIterator for &'a TidyTable {
    type Item = &'a TidyRow;
    type IntoIter = std::slice::Iter<'a, TidyRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PivotRow {
    pub year: String,
    /// One slot per [`PivotTable::categories`] entry.
    pub values: Vec<Option<f64>>,
}

/// Year-indexed wide view used for charting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PivotTable {
    pub categories: Vec<String>,
    pub rows: Vec<PivotRow>,
}

impl PivotTable {
    pub fn years(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|row| row.year.as_str())
    }

    pub fn row(&self, year: &str) -> Option<&PivotRow> {
        self.rows.iter().find(|row| row.year == year)
    }

    pub fn get(&self, year: &str, category: &str) -> Option<f64> {
        let column = self.categories.iter().position(|c| c == category)?;
        self.row(year)?.values.get(column).copied().flatten()
    }
}
