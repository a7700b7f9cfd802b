use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use econ_model::{PivotError, SelectionError};
use econ_standards::{DATASETS, find_dataset, find_sector};
use econ_transform::{
    LoadedDataset, load_all, load_dataset, pivot_frame, project_trend, tidy_frame, write_csv,
};
use econ_cli::browse::run_session;
use econ_cli::render::{
    category_list, check_table, pivot_table, projection_summary, projection_table, rows_table,
    sectors_table,
};
use tracing::{info, info_span, warn};

use crate::cli::{CategoryArgs, DatasetArgs, ExportArgs, ProjectArgs, ShowArgs};

pub fn run_sectors() -> Result<()> {
    println!("{}", sectors_table());
    Ok(())
}

/// Loads every registered dataset. Returns false when any failed.
pub fn run_check(root: &Path) -> Result<bool> {
    let span = info_span!("check", root = %root.display());
    let _guard = span.enter();
    let results = load_all(root, DATASETS);
    let failed = results.iter().filter(|(_, result)| result.is_err()).count();
    println!("Data root: {}", root.display());
    println!("{}", check_table(&results));
    if failed > 0 {
        eprintln!("{failed} of {} datasets failed to load", results.len());
    }
    info!(datasets = results.len(), failed, "check finished");
    Ok(failed == 0)
}

pub fn run_show(root: &Path, args: &ShowArgs) -> Result<()> {
    let dataset = load(root, &args.dataset)?;
    let table = &dataset.table;
    println!("{} / {}", dataset.descriptor.sector, dataset.descriptor.name);
    println!("Categories: {}", category_list(table.categories()));
    println!(
        "{} rows, {} cells dropped",
        dataset.stats.rows,
        dataset.stats.dropped()
    );
    let pivot = if args.categories.is_empty() {
        table.pivot_all()
    } else {
        table.pivot(&args.categories)
    };
    match pivot {
        Ok(pivot) => println!("{}", pivot_table(&pivot)),
        Err(PivotError::Selection(error)) => {
            warn!(%error, "nothing to chart");
            eprintln!("warning: {error}; select at least one known category");
        }
        Err(error) => return Err(error).context("build Year x Category table"),
    }
    Ok(())
}

pub fn run_rows(root: &Path, args: &CategoryArgs) -> Result<()> {
    let dataset = load(root, &args.dataset)?;
    let rows = dataset.table.rows_for(&args.category);
    if rows.is_empty() {
        let error = SelectionError::NoRows {
            category: args.category.trim().to_string(),
        };
        eprintln!("warning: {error}");
        return Ok(());
    }
    println!("{}", rows_table(&rows));
    Ok(())
}

pub fn run_project(root: &Path, args: &ProjectArgs) -> Result<()> {
    let dataset = load(root, &args.target.dataset)?;
    let projection = match project_trend(&dataset.table, &args.target.category) {
        Ok(projection) => projection,
        Err(error) => {
            eprintln!("warning: {error}");
            return Ok(());
        }
    };
    if args.json {
        let json = serde_json::to_string_pretty(&projection).context("serialize projection")?;
        println!("{json}");
    } else {
        print!("{}", projection_summary(&projection));
        println!("{}", projection_table(&projection));
    }
    Ok(())
}

pub fn run_export(root: &Path, args: &ExportArgs) -> Result<()> {
    let dataset = load(root, &args.dataset)?;
    let mut frame = if args.wide {
        let pivot = dataset
            .table
            .pivot_all()
            .context("build Year x Category table")?;
        pivot_frame(&pivot)?
    } else {
        tidy_frame(&dataset.table)?
    };
    write_csv(&mut frame, &args.output)
        .with_context(|| format!("write {}", args.output.display()))?;
    println!(
        "Wrote {} x {} to {}",
        frame.height(),
        frame.width(),
        args.output.display()
    );
    Ok(())
}

pub fn run_browse(root: &Path) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    run_session(root, stdin.lock(), &mut stdout)
}

fn load(root: &Path, args: &DatasetArgs) -> Result<LoadedDataset> {
    let sector = find_sector(&args.sector)?;
    let descriptor = find_dataset(sector, &args.dataset)?;
    load_dataset(root, descriptor).with_context(|| format!("load {}", descriptor.name))
}
