//! Terminal rendering of registry listings, load summaries and views.

use std::fmt::Write;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use econ_model::{DatasetDescriptor, PivotTable, Sector, TidyRow};
use econ_standards::datasets_in;
use econ_transform::{LoadError, LoadedDataset, TrendProjection, format_thousands};

/// Decimals shown for observed and projected values.
pub const VALUE_DECIMALS: usize = 2;

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

pub fn sectors_table() -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Sector"),
        header_cell("Dataset"),
        header_cell("Slug"),
        header_cell("Layout"),
        header_cell("File"),
    ]);
    apply_table_style(&mut table);
    for sector in Sector::ALL {
        for (idx, descriptor) in datasets_in(sector).enumerate() {
            let sector_cell = if idx == 0 {
                Cell::new(sector.display_name())
                    .fg(Color::Blue)
                    .add_attribute(Attribute::Bold)
            } else {
                Cell::new("")
            };
            table.add_row(vec![
                sector_cell,
                Cell::new(descriptor.name),
                dim_cell(descriptor.slug),
                Cell::new(descriptor.layout.kind_name()),
                dim_cell(descriptor.relative_path().display()),
            ]);
        }
    }
    table
}

/// One row per dataset with what survived loading.
pub fn check_table(results: &[(&DatasetDescriptor, Result<LoadedDataset, LoadError>)]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Dataset"),
        header_cell("Sector"),
        header_cell("Rows"),
        header_cell("Categories"),
        header_cell("Periods"),
        header_cell("Dropped"),
        header_cell("Status"),
    ]);
    apply_table_style(&mut table);
    for column in 2..=5 {
        align_column(&mut table, column, CellAlignment::Right);
    }
    for (descriptor, result) in results {
        let mut row = vec![
            Cell::new(descriptor.slug),
            Cell::new(descriptor.sector.display_name()),
        ];
        match result {
            Ok(loaded) => {
                row.extend([
                    Cell::new(loaded.stats.rows),
                    Cell::new(loaded.table.categories().len()),
                    Cell::new(loaded.table.years().len()),
                    count_cell(loaded.stats.dropped()),
                    Cell::new("ok").fg(Color::Green),
                ]);
            }
            Err(error) => {
                row.extend([
                    dim_cell("-"),
                    dim_cell("-"),
                    dim_cell("-"),
                    dim_cell("-"),
                    Cell::new(error).fg(Color::Red),
                ]);
            }
        }
        table.add_row(row);
    }
    table
}

/// Year x Category values; gaps render as `-`.
pub fn pivot_table(pivot: &PivotTable) -> Table {
    let mut table = Table::new();
    let mut header = vec![header_cell("Year")];
    header.extend(pivot.categories.iter().map(|c| header_cell(c)));
    table.set_header(header);
    apply_table_style(&mut table);
    for column in 1..=pivot.categories.len() {
        align_column(&mut table, column, CellAlignment::Right);
    }
    for row in &pivot.rows {
        let mut cells = vec![Cell::new(&row.year)];
        cells.extend(row.values.iter().map(|value| match value {
            Some(value) => Cell::new(format_thousands(*value, VALUE_DECIMALS)),
            None => dim_cell("-"),
        }));
        table.add_row(cells);
    }
    table
}

pub fn rows_table(rows: &[&TidyRow]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Category"),
        header_cell("Year"),
        header_cell("Value"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for row in rows {
        table.add_row(vec![
            Cell::new(&row.category),
            Cell::new(&row.year),
            Cell::new(format_thousands(row.value, VALUE_DECIMALS)),
        ]);
    }
    table
}

/// Observed values beside the fitted line, followed by the projected step.
pub fn projection_table(projection: &TrendProjection) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Step"),
        header_cell("Year"),
        header_cell("Actual"),
        header_cell("Trend"),
    ]);
    apply_table_style(&mut table);
    for column in [0, 2, 3] {
        align_column(&mut table, column, CellAlignment::Right);
    }
    for point in &projection.points {
        table.add_row(vec![
            Cell::new(point.position),
            Cell::new(&point.year),
            Cell::new(format_thousands(point.value, VALUE_DECIMALS)),
            dim_cell(format_thousands(point.fitted, VALUE_DECIMALS)),
        ]);
    }
    table.add_row(vec![
        Cell::new(projection.next_position).add_attribute(Attribute::Bold),
        Cell::new("Next Period")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(format_thousands(projection.projected_value, VALUE_DECIMALS))
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
    ]);
    table
}

/// Headline numbers of a projection.
pub fn projection_summary(projection: &TrendProjection) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Analysis: {}", projection.category);
    let _ = writeln!(
        out,
        "Confidence (R-squared): {:.3}",
        projection.fit.r_squared
    );
    let _ = writeln!(
        out,
        "Projected value for next step: {}",
        format_thousands(projection.projected_value, VALUE_DECIMALS)
    );
    out
}

/// Comma-separated category list, wrapped for an 80-column terminal.
pub fn category_list(categories: &[String]) -> String {
    let mut out = String::new();
    let mut line_len = 0;
    for (idx, category) in categories.iter().enumerate() {
        let piece = if idx + 1 < categories.len() {
            format!("{category}, ")
        } else {
            category.clone()
        };
        if line_len > 0 && line_len + piece.len() > 80 {
            out.push('\n');
            line_len = 0;
        }
        line_len += piece.len();
        out.push_str(&piece);
    }
    out.trim_end().to_string()
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count)
            .fg(Color::Yellow)
            .add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
