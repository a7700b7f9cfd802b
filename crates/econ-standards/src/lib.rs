//! Dataset registry for the macroeconomic dashboard.
//!
//! The registry is compiled in: every source file the dashboard can show is
//! described by one [`econ_model::DatasetDescriptor`] in [`DATASETS`].
//! File locations are resolved against a data root (see [`data_root`]).

pub mod error;
pub mod paths;
pub mod registry;

pub use error::RegistryError;
pub use paths::{DATA_DIR_ENV_VAR, data_root, dataset_path};
pub use registry::{DATASETS, datasets_in, default_dataset, find_dataset, find_sector};
