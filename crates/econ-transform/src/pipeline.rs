//! Load pipeline: descriptor -> raw grid -> long rows -> tidy table.

use std::path::Path;

use econ_ingest::{RawGrid, ReadOptions, read_raw_grid};
use econ_model::{DatasetDescriptor, MetadataRowRule, TidyRow, TidyTable};
use serde::Serialize;
use tracing::{debug, info, info_span, trace, warn};

use crate::error::{LoadError, SchemaError};
use crate::normalization::{coerce_value, normalize_grid};

/// Row accounting for one load. Losses are expected, not failures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadStats {
    /// Data rows in the grid after banner and metadata stripping.
    pub data_rows: usize,
    /// Melted cells, including ones later dropped.
    pub cells: usize,
    pub empty_category: usize,
    pub coercion_failures: usize,
    /// Rows in the resulting table.
    pub rows: usize,
}

impl LoadStats {
    pub fn dropped(&self) -> usize {
        self.empty_category + self.coercion_failures
    }
}

#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub descriptor: DatasetDescriptor,
    pub table: TidyTable,
    pub stats: LoadStats,
}

/// Reader options implied by a descriptor.
pub fn read_options(descriptor: &DatasetDescriptor) -> ReadOptions {
    ReadOptions::default()
        .with_skip_rows(descriptor.skip_rows)
        .with_label_columns(descriptor.layout.label_columns())
        .with_metadata_detection(descriptor.metadata_row == MetadataRowRule::Detect)
        .with_id_aliases(descriptor.id_column_aliases.iter().copied())
        .with_drop_empty_columns(descriptor.drop_empty_columns)
}

/// Normalizes an already-read grid. Pure: the same grid always yields the
/// same table.
pub fn normalize_table(
    grid: &RawGrid,
    descriptor: &DatasetDescriptor,
) -> Result<(TidyTable, LoadStats), SchemaError> {
    let melted = normalize_grid(grid, &descriptor.layout)?;
    let mut stats = LoadStats {
        data_rows: grid.height(),
        cells: melted.rows.len() + melted.empty_category,
        empty_category: melted.empty_category,
        ..LoadStats::default()
    };

    let mut table = TidyTable::new();
    for row in melted.rows {
        match coerce_value(&row.raw_value) {
            Ok(value) => {
                table.push(TidyRow::new(row.category, row.year, value));
            }
            Err(error) => {
                stats.coercion_failures += 1;
                trace!(
                    category = %row.category,
                    year = %row.year,
                    %error,
                    "dropping non-numeric cell"
                );
            }
        }
    }
    stats.rows = table.len();
    Ok((table, stats))
}

/// Reads and normalizes one dataset from `root`.
pub fn load_dataset(root: &Path, descriptor: &DatasetDescriptor) -> Result<LoadedDataset, LoadError> {
    let span = info_span!("load", dataset = descriptor.slug);
    let _guard = span.enter();

    let path = root.join(descriptor.relative_path());
    debug!(path = %path.display(), layout = descriptor.layout.kind_name(), "reading dataset");
    let grid = read_raw_grid(&path, &read_options(descriptor))?;
    let (table, stats) =
        normalize_table(&grid, descriptor).map_err(|source| LoadError::Schema {
            path: path.clone(),
            source,
        })?;

    if stats.coercion_failures > 0 {
        warn!(
            dropped = stats.coercion_failures,
            cells = stats.cells,
            "dropped cells without a numeric value"
        );
    }
    info!(
        rows = stats.rows,
        categories = table.categories().len(),
        periods = table.years().len(),
        "dataset loaded"
    );
    Ok(LoadedDataset {
        descriptor: *descriptor,
        table,
        stats,
    })
}

/// Loads each dataset independently; one failure never affects another.
pub fn load_all<'a, I>(
    root: &Path,
    descriptors: I,
) -> Vec<(&'a DatasetDescriptor, Result<LoadedDataset, LoadError>)>
where
    I: IntoIterator<Item = &'a DatasetDescriptor>,
{
    descriptors
        .into_iter()
        .map(|descriptor| {
            let result = load_dataset(root, descriptor);
            if let Err(error) = &result {
                warn!(dataset = descriptor.slug, %error, "dataset failed to load");
            }
            (descriptor, result)
        })
        .collect()
}
