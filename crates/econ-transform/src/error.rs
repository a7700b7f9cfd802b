use std::path::PathBuf;

use econ_ingest::IngestError;
use thiserror::Error;

/// The grid does not have the shape the dataset's layout expects.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("expected at least {expected} columns, found {found}")]
    TooFewColumns { expected: usize, found: usize },

    #[error("no period column found (expected a blank header or one of: {aliases})")]
    MissingPeriodColumn { aliases: String },

    #[error("no value columns match the period tokens: {tokens}")]
    NoValueColumns { tokens: String },
}

/// Failure to produce a dataset's table. Fatal to that dataset only.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Read(#[from] IngestError),

    #[error("unexpected layout in {path}: {source}")]
    Schema {
        path: PathBuf,
        #[source]
        source: SchemaError,
    },
}
