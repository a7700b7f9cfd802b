//! Data directory path resolution.

use std::path::{Path, PathBuf};

use econ_model::DatasetDescriptor;

/// Environment variable for overriding the data directory.
pub const DATA_DIR_ENV_VAR: &str = "ECON_DATA_DIR";

/// Get the data root directory.
///
/// Resolution order:
/// 1. `ECON_DATA_DIR` environment variable
/// 2. `data/` directory relative to workspace root
pub fn data_root() -> PathBuf {
    if let Ok(root) = std::env::var(DATA_DIR_ENV_VAR) {
        return PathBuf::from(root);
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data")
}

/// Absolute location of a dataset's source file under `root`.
pub fn dataset_path(root: &Path, descriptor: &DatasetDescriptor) -> PathBuf {
    root.join(descriptor.relative_path())
}
