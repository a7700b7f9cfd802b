//! Loads every registered dataset from the fixture tree.

use std::path::PathBuf;

use econ_model::Sector;
use econ_standards::{DATASETS, find_dataset};
use econ_transform::{LoadError, load_all, load_dataset};

fn fixture_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/data")
}

fn load(sector: Sector, slug: &str) -> econ_transform::LoadedDataset {
    let descriptor = find_dataset(sector, slug).unwrap();
    load_dataset(&fixture_root(), descriptor).unwrap()
}

#[test]
fn every_registered_dataset_loads() {
    let results = load_all(&fixture_root(), DATASETS);
    assert_eq!(results.len(), DATASETS.len());
    for (descriptor, result) in results {
        let loaded = result.unwrap_or_else(|e| panic!("{}: {e}", descriptor.slug));
        assert!(!loaded.table.is_empty(), "{} is empty", descriptor.slug);
        assert!(
            loaded.table.iter().all(|row| row.value.is_finite()),
            "{} has a non-finite value",
            descriptor.slug
        );
        assert!(
            loaded
                .table
                .iter()
                .all(|row| !row.category.trim().is_empty()),
            "{} has a blank category",
            descriptor.slug
        );
    }
}

#[test]
fn banner_and_serial_columns_are_stripped() {
    let loaded = load(Sector::ExternalSector, "exports");
    assert_eq!(
        loaded.table.categories(),
        ["Tea", "Cardamom", "Readymade Garments"]
    );
    assert_eq!(loaded.table.years(), ["2022/23", "2023/24"]);
    assert_eq!(loaded.stats.data_rows, 3);
    // "-" placeholder for garments in 2023/24.
    assert_eq!(loaded.stats.coercion_failures, 1);
    assert_eq!(loaded.table.len(), 5);
}

#[test]
fn conversion_rates_exclude_middle() {
    let loaded = load(Sector::ExternalSector, "usd-conversion-rates");
    assert_eq!(loaded.table.categories(), ["Buying", "Selling"]);
    assert!(!loaded.table.has_category("Middle"));
    let pivot = loaded.table.pivot(&["Buying", "Selling"]).unwrap();
    assert_eq!(pivot.get("2022/23", "Selling"), Some(130.7));
}

#[test]
fn revenue_drops_empty_columns() {
    let loaded = load(Sector::PublicFinances, "gon-revenue");
    assert_eq!(loaded.table.years(), ["2022/23", "2023/24"]);
    assert_eq!(loaded.stats.cells, 4);
    assert_eq!(loaded.stats.dropped(), 0);
}

#[test]
fn borrowings_carry_section_prefixes() {
    let loaded = load(Sector::PublicFinances, "net-domestic-borrowings");
    assert_eq!(
        loaded.table.categories(),
        [
            "Gross Borrowings",
            "Gross Borrowings - Treasury Bills",
            "Gross Borrowings - Development Bonds",
            "Payments",
            "Payments - Treasury Bills",
            "Net Domestic Borrowings (NDB) (A-B)",
        ]
    );
    assert_eq!(loaded.table.years(), ["2022/23", "2023/24", "2024/25"]);
}

#[test]
fn missing_file_fails_only_that_dataset() {
    let dir = tempfile::tempdir().unwrap();
    let descriptor = find_dataset(Sector::RealSector, "gdp-constant-prices").unwrap();
    let err = load_dataset(dir.path(), descriptor).unwrap_err();
    assert!(matches!(err, LoadError::Read(_)));
    assert!(err.to_string().contains("GDPAtConstantPrices.csv"));
}
