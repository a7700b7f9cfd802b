use thiserror::Error;

/// A chart or projection request that matched nothing.
///
/// These are recoverable: the presentation layer shows them as warnings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("no categories selected")]
    NoCategories,
    #[error("no data found for category '{category}'")]
    NoRows { category: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PivotError {
    #[error(transparent)]
    Selection(#[from] SelectionError),
    #[error("category '{category}' has more than one value for period '{year}'")]
    DuplicateEntry { category: String, year: String },
}

impl PivotError {
    /// Returns true when the pivot failed only because nothing was selected.
    pub fn is_empty_selection(&self) -> bool {
        matches!(self, Self::Selection(_))
    }
}
