#![deny(unsafe_code)]

use econ_model::{DatasetDescriptor, Layout, MetadataRowRule, Sector};

use crate::error::RegistryError;

const SERIAL_NUMBER_ALIASES: &[&str] = &["S.N.", "S.No."];

const BORROWING_SECTIONS: &[&str] = &[
    "Gross Borrowings",
    "Payments",
    "Net Domestic Borrowings (NDB) (A-B)",
];

const BORROWING_PERIODS: &[&str] = &["2022", "2023", "2024", "2025"];

const fn simple(
    sector: Sector,
    name: &'static str,
    slug: &'static str,
    file: &'static str,
    skip_rows: usize,
) -> DatasetDescriptor {
    DatasetDescriptor {
        name,
        slug,
        sector,
        file,
        skip_rows,
        metadata_row: MetadataRowRule::Keep,
        id_column_aliases: &[],
        drop_empty_columns: false,
        layout: Layout::Simple,
    }
}

/// Simple pivot with a serial-number column and an optional banner row.
const fn annotated(
    sector: Sector,
    name: &'static str,
    slug: &'static str,
    file: &'static str,
) -> DatasetDescriptor {
    DatasetDescriptor {
        metadata_row: MetadataRowRule::Detect,
        id_column_aliases: SERIAL_NUMBER_ALIASES,
        ..simple(sector, name, slug, file, 0)
    }
}

/// Every dataset the dashboard knows, grouped by sector in menu order.
pub const DATASETS: &[DatasetDescriptor] = &[
    simple(
        Sector::RealSector,
        "GDP at Constant Prices",
        "gdp-constant-prices",
        "GDPAtConstantPrices.csv",
        1,
    ),
    simple(
        Sector::RealSector,
        "GDP by Expenditure Category",
        "gdp-expenditure",
        "GDPByExpenditureCategory.csv",
        1,
    ),
    simple(
        Sector::RealSector,
        "Gross Domestic Savings",
        "gross-domestic-savings",
        "GNDIandSavings.csv",
        1,
    ),
    annotated(Sector::ExternalSector, "Exports", "exports", "Exports.csv"),
    annotated(Sector::ExternalSector, "Imports", "imports", "Imports.csv"),
    annotated(
        Sector::ExternalSector,
        "Foreign Employment",
        "foreign-employment",
        "ForeignEmploymentCount.csv",
    ),
    DatasetDescriptor {
        layout: Layout::MergedHeader {
            period_aliases: &["Year"],
            // Only buying and selling rates are analysed.
            excluded_category: Some("Middle"),
        },
        ..simple(
            Sector::ExternalSector,
            "USD Conversion Rates",
            "usd-conversion-rates",
            "USDConversionRates.csv",
            1,
        )
    },
    simple(
        Sector::PublicFinances,
        "Government Budget Operations",
        "budget-operations",
        "GovNBudgetOperations.csv",
        0,
    ),
    DatasetDescriptor {
        metadata_row: MetadataRowRule::Detect,
        drop_empty_columns: true,
        ..simple(
            Sector::PublicFinances,
            "GoN Revenue",
            "gon-revenue",
            "GoNrevenue.csv",
            1,
        )
    },
    DatasetDescriptor {
        id_column_aliases: &["S.N."],
        ..annotated(
            Sector::PublicFinances,
            "Debt Ownership",
            "debt-ownership",
            "DebtOwnership.csv",
        )
    },
    DatasetDescriptor {
        layout: Layout::Hierarchical {
            section_headers: BORROWING_SECTIONS,
            period_tokens: BORROWING_PERIODS,
        },
        ..simple(
            Sector::PublicFinances,
            "Net Domestic Borrowings",
            "net-domestic-borrowings",
            "NetDomesticBorrowingsGON.csv",
            0,
        )
    },
];

/// Datasets of one sector, in menu order.
pub fn datasets_in(sector: Sector) -> impl Iterator<Item = &'static DatasetDescriptor> {
    DATASETS.iter().filter(move |d| d.sector == sector)
}

/// First dataset of a sector, shown when nothing was chosen yet.
pub fn default_dataset(sector: Sector) -> Option<&'static DatasetDescriptor> {
    datasets_in(sector).next()
}

/// Resolve a sector by display name or slug (case-insensitive).
pub fn find_sector(query: &str) -> Result<Sector, RegistryError> {
    let trimmed = query.trim();
    Sector::ALL
        .into_iter()
        .find(|s| {
            s.display_name().eq_ignore_ascii_case(trimmed) || s.slug().eq_ignore_ascii_case(trimmed)
        })
        .ok_or_else(|| RegistryError::UnknownSector {
            query: query.to_string(),
            known: Sector::ALL.map(Sector::slug).join(", "),
        })
}

/// Resolve a dataset of `sector` by display name or slug (case-insensitive).
pub fn find_dataset(
    sector: Sector,
    query: &str,
) -> Result<&'static DatasetDescriptor, RegistryError> {
    datasets_in(sector)
        .find(|d| d.matches(query))
        .ok_or_else(|| RegistryError::UnknownDataset {
            query: query.to_string(),
            sector: sector.display_name().to_string(),
            known: datasets_in(sector)
                .map(|d| d.slug)
                .collect::<Vec<_>>()
                .join(", "),
        })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn every_sector_has_a_default() {
        for sector in Sector::ALL {
            assert!(default_dataset(sector).is_some(), "{sector} has no datasets");
        }
    }

    #[test]
    fn slugs_are_unique() {
        let slugs: BTreeSet<_> = DATASETS.iter().map(|d| d.slug).collect();
        assert_eq!(slugs.len(), DATASETS.len());
    }

    #[test]
    fn only_rates_exclude_a_category() {
        let excluding: Vec<_> = DATASETS
            .iter()
            .filter(|d| {
                matches!(
                    d.layout,
                    Layout::MergedHeader {
                        excluded_category: Some(_),
                        ..
                    }
                )
            })
            .map(|d| d.slug)
            .collect();
        assert_eq!(excluding, vec!["usd-conversion-rates"]);
    }

    #[test]
    fn finds_sector_by_name_or_slug() {
        assert_eq!(find_sector("External Sector"), Ok(Sector::ExternalSector));
        assert_eq!(find_sector("public-finances"), Ok(Sector::PublicFinances));
        assert!(matches!(
            find_sector("price changes"),
            Err(RegistryError::UnknownSector { .. })
        ));
    }

    #[test]
    fn dataset_lookup_is_scoped_to_sector() {
        let rates = find_dataset(Sector::ExternalSector, "usd conversion rates").unwrap();
        assert_eq!(rates.file, "USDConversionRates.csv");
        let err = find_dataset(Sector::RealSector, "exports").unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown dataset 'exports' in Real Sector (expected one of: \
             gdp-constant-prices, gdp-expenditure, gross-domestic-savings)"
        );
    }
}
