//! Behavioural properties of normalization, coercion and projection.

use econ_ingest::RawGrid;
use econ_model::{
    DatasetDescriptor, Layout, MetadataRowRule, SelectionError, Sector, TidyRow, TidyTable,
};
use econ_transform::{coerce_value, format_thousands, normalize_table, project_trend};
use proptest::prelude::*;

fn grid(headers: &[&str], rows: &[&[&str]]) -> RawGrid {
    RawGrid::new(
        headers.iter().map(ToString::to_string).collect(),
        rows.iter()
            .map(|row| row.iter().map(ToString::to_string).collect())
            .collect(),
    )
}

fn descriptor(layout: Layout) -> DatasetDescriptor {
    DatasetDescriptor {
        name: "Test",
        slug: "test",
        sector: Sector::PublicFinances,
        file: "test.csv",
        skip_rows: 0,
        metadata_row: MetadataRowRule::Keep,
        id_column_aliases: &[],
        drop_empty_columns: false,
        layout,
    }
}

const BORROWINGS: Layout = Layout::Hierarchical {
    section_headers: &["Gross Borrowings", "Payments"],
    period_tokens: &["2023"],
};

#[test]
fn hierarchical_rows_take_section_prefix() {
    let raw = grid(
        &["Headings", "Particulars", "Unit", "2023/24"],
        &[
            &["A", "Gross Borrowings", "", "100"],
            &["", "T-Bills", "", "40"],
            &["B", "Payments", "", "60"],
        ],
    );
    let (table, _) = normalize_table(&raw, &descriptor(BORROWINGS)).unwrap();
    assert_eq!(
        table.rows(),
        [
            TidyRow::new("Gross Borrowings", "2023/24", 100.0),
            TidyRow::new("Gross Borrowings - T-Bills", "2023/24", 40.0),
            TidyRow::new("Payments", "2023/24", 60.0),
        ]
    );
}

#[test]
fn excluded_category_never_appears() {
    let layout = Layout::MergedHeader {
        period_aliases: &["Year"],
        excluded_category: Some("Middle"),
    };
    let raw = grid(
        &["Year", "Buying", "Middle", "Selling"],
        &[&["2022/23", "130.1", "130.4", "130.7"]],
    );
    let (table, stats) = normalize_table(&raw, &descriptor(layout)).unwrap();
    assert_eq!(table.categories(), ["Buying", "Selling"]);
    assert_eq!(stats.cells, 2);
}

#[test]
fn blank_categories_are_excluded() {
    let raw = grid(&["Item", "2021"], &[&["", "1"], &["Tea", "2"], &[" ", "3"]]);
    let (table, stats) = normalize_table(&raw, &descriptor(Layout::Simple)).unwrap();
    assert_eq!(table.rows(), [TidyRow::new("Tea", "2021", 2.0)]);
    assert_eq!(stats.empty_category, 2);
}

#[test]
fn normalization_is_idempotent() {
    let raw = grid(
        &["Item", "2021", "2022"],
        &[&["Tea", "1,200", "n.a."], &["Rice", "3", "4"]],
    );
    let first = normalize_table(&raw, &descriptor(Layout::Simple)).unwrap();
    let second = normalize_table(&raw, &descriptor(Layout::Simple)).unwrap();
    assert_eq!(first.0, second.0);
    assert_eq!(first.1, second.1);
}

#[test]
fn projection_of_a_straight_line() {
    let table: TidyTable = ["2021/22", "2022/23", "2023/24"]
        .into_iter()
        .zip([10.0, 20.0, 30.0])
        .map(|(year, value)| TidyRow::new("Tax Revenue", year, value))
        .collect();
    let projection = project_trend(&table, "Tax Revenue").unwrap();
    assert!((projection.fit.slope - 10.0).abs() < 1e-9);
    assert!((projection.fit.intercept - 10.0).abs() < 1e-9);
    assert!((projection.projected_value - 40.0).abs() < 1e-9);
    assert!((projection.fit.r_squared - 1.0).abs() < 1e-9);
    assert_eq!(format_thousands(projection.projected_value, 2), "40.00");
}

#[test]
fn projection_needs_a_selected_category() {
    let table: TidyTable = [TidyRow::new("Tea", "2021", 1.0)].into_iter().collect();
    let err = project_trend(&table, "Coffee").unwrap_err();
    assert!(matches!(err, SelectionError::NoRows { .. }));
    let err = table.pivot::<&str>(&[]).unwrap_err();
    assert!(err.is_empty_selection());
}

proptest! {
    #[test]
    fn formatted_values_coerce_back(value in -1.0e12f64..1.0e12) {
        let parsed = coerce_value(&format_thousands(value, 6)).unwrap();
        prop_assert!((parsed - value).abs() <= 1e-6 * value.abs().max(1.0));
    }

    #[test]
    fn formatted_integers_coerce_exactly(value in -1_000_000_000_000_000i64..1_000_000_000_000_000) {
        let value = value as f64;
        prop_assert_eq!(coerce_value(&format_thousands(value, 0)), Ok(value));
    }

    #[test]
    fn pivot_cell_count_matches_rows(
        cells in proptest::collection::btree_map(
            ("[A-D]", 2000u16..2006),
            -1.0e6f64..1.0e6,
            0..20,
        )
    ) {
        let table: TidyTable = cells
            .iter()
            .map(|((category, year), value)| TidyRow::new(category.as_str(), year.to_string(), *value))
            .collect();
        let pivot = table.pivot_all();
        if table.is_empty() {
            prop_assert!(pivot.is_err());
        } else {
            let pivot = pivot.unwrap();
            let filled = pivot
                .rows
                .iter()
                .flat_map(|row| row.values.iter())
                .filter(|value| value.is_some())
                .count();
            prop_assert_eq!(filled, table.len());
        }
    }
}
