//! Two-column outline labels (section marker + sub-item).
//!
//! Sources like the domestic borrowing table spread a nested outline over
//! two sparse columns:
//!
//! ```text
//! A,Gross Borrowings,,100
//!  ,T-Bills,,40
//! B,Payments,,60
//! ```
//!
//! The category of a sub-item is prefixed with the section it falls under,
//! so the example yields `Gross Borrowings`, `Gross Borrowings - T-Bills` and
//! `Payments`.

use econ_ingest::RawGrid;

use super::{LongRow, ensure_width};
use crate::error::SchemaError;

/// Longest first-column text treated as an outline marker ("A", "B.", "(ii)").
const MAX_MARKER_LEN: usize = 4;

/// Scan state while walking the outline top to bottom.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SectionState {
    #[default]
    NoSection,
    InSection(String),
}

impl SectionState {
    /// Consumes one row's marker and item columns and returns the next state
    /// plus the row's category.
    pub fn advance(self, marker: &str, item: &str, sections: &[&str]) -> (SectionState, String) {
        let label = combined_label(marker, item);
        if let Some(section) = match_section(marker, item, &label, sections) {
            return (
                SectionState::InSection(section.to_string()),
                section.to_string(),
            );
        }
        match self {
            SectionState::InSection(section) if !label.is_empty() => {
                let category = format!("{section} - {label}");
                (SectionState::InSection(section), category)
            }
            state => (state, label),
        }
    }
}

fn combined_label(marker: &str, item: &str) -> String {
    format!("{} {}", marker.trim(), item.trim())
        .trim()
        .to_string()
}

/// Matches the combined label against the section headers. The marker is
/// only dropped when it stands alone in the first column.
fn match_section<'a>(
    marker: &str,
    item: &str,
    label: &str,
    sections: &[&'a str],
) -> Option<&'a str> {
    let find = |text: &str| sections.iter().copied().find(|s| *s == text);
    find(label).or_else(|| {
        let marker = marker.trim();
        if marker.is_empty() || marker.chars().count() > MAX_MARKER_LEN {
            return None;
        }
        find(item.trim())
    })
}

/// Categories for a sequence of (marker, item) label pairs.
pub fn section_categories<'a, I>(labels: I, sections: &[&str]) -> Vec<String>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    labels
        .into_iter()
        .fold(
            (SectionState::NoSection, Vec::new()),
            |(state, mut categories), (marker, item)| {
                let (next, category) = state.advance(marker, item, sections);
                categories.push(category);
                (next, categories)
            },
        )
        .1
}

pub(super) fn melt(
    grid: &RawGrid,
    sections: &[&str],
    period_tokens: &[&str],
) -> Result<Vec<LongRow>, SchemaError> {
    ensure_width(grid, 3)?;
    let value_columns: Vec<(usize, &str)> = (2..grid.width())
        .map(|col| (col, grid.header(col)))
        .filter(|(_, header)| period_tokens.iter().any(|token| header.contains(token)))
        .collect();
    if value_columns.is_empty() {
        return Err(SchemaError::NoValueColumns {
            tokens: period_tokens.join(", "),
        });
    }

    let categories = section_categories(
        (0..grid.height()).map(|row| (grid.cell(row, 0), grid.cell(row, 1))),
        sections,
    );

    let mut rows = Vec::with_capacity(grid.height() * value_columns.len());
    for (row, category) in categories.iter().enumerate() {
        for &(col, year) in &value_columns {
            rows.push(LongRow::new(category.as_str(), year, grid.cell(row, col)));
        }
    }
    Ok(rows)
}
