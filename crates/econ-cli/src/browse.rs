//! Line-driven dashboard session.
//!
//! Each input line is parsed into a [`SessionCommand`], applied to the
//! current [`SessionState`] and answered with rendered output. The loaded
//! table lives only as long as its dataset stays selected.

use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::Result;
use econ_model::{DatasetDescriptor, PivotError};
use econ_standards::{find_dataset, find_sector};
use econ_transform::{LoadedDataset, load_dataset, project_trend};
use tracing::{debug, warn};

use crate::render::{category_list, pivot_table, projection_summary, projection_table, rows_table};
use crate::session::{ChartSelection, SessionState, build_view};

pub const HELP: &str = "\
commands:
  sector <name>           switch sector (its last dataset is restored)
  dataset <name>          show a dataset of the current sector
  chart all | <a>, <b>    categories in the Year x Category table
  category <name>         category for rows and projection
  show                    redraw the current dataset
  rows                    rows of the selected category
  project                 trend line and next-step projection
  help                    this text
  quit                    leave the session";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Sector(String),
    Dataset(String),
    Chart(ChartSelection),
    Category(String),
    Show,
    Rows,
    Project,
    Help,
    Quit,
    Unknown(String),
}

/// Parses one input line; blank lines yield `None`.
pub fn parse_command(line: &str) -> Option<SessionCommand> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };
    let command = match (verb.to_ascii_lowercase().as_str(), rest) {
        ("sector", name) if !name.is_empty() => SessionCommand::Sector(name.to_string()),
        ("dataset", name) if !name.is_empty() => SessionCommand::Dataset(name.to_string()),
        ("category", name) if !name.is_empty() => SessionCommand::Category(name.to_string()),
        ("chart", selection) if selection.eq_ignore_ascii_case("all") => {
            SessionCommand::Chart(ChartSelection::All)
        }
        ("chart", selection) => SessionCommand::Chart(ChartSelection::Only(
            selection
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect(),
        )),
        ("show", "") => SessionCommand::Show,
        ("rows", "") => SessionCommand::Rows,
        ("project", "") => SessionCommand::Project,
        ("help" | "?", _) => SessionCommand::Help,
        ("quit" | "exit" | "q", _) => SessionCommand::Quit,
        _ => SessionCommand::Unknown(line.to_string()),
    };
    Some(command)
}

/// Applies a selection command. Commands that only display leave the
/// state untouched.
pub fn apply_command(state: SessionState, command: &SessionCommand) -> Result<SessionState> {
    Ok(match command {
        SessionCommand::Sector(query) => state.with_sector(find_sector(query)?),
        SessionCommand::Dataset(query) => {
            let descriptor = find_dataset(state.sector(), query)?;
            state.with_dataset(descriptor)
        }
        SessionCommand::Chart(selection) => state.with_chart(selection.clone()),
        SessionCommand::Category(name) => state.with_category(name.as_str()),
        _ => state,
    })
}

/// Runs a session until `quit` or end of input.
pub fn run_session<R, W>(root: &Path, input: R, out: &mut W) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    let mut state = SessionState::new();
    let mut loaded: Option<LoadedDataset> = None;
    writeln!(out, "Type 'help' for commands.")?;
    render_dataset(root, &state, &mut loaded, out)?;

    for line in input.lines() {
        let line = line?;
        let Some(command) = parse_command(&line) else {
            continue;
        };
        debug!(?command, "session command");
        match &command {
            SessionCommand::Quit => break,
            SessionCommand::Help => {
                writeln!(out, "{HELP}")?;
                continue;
            }
            SessionCommand::Unknown(text) => {
                writeln!(out, "unknown command: {text} (try 'help')")?;
                continue;
            }
            _ => {}
        }

        state = match apply_command(state.clone(), &command) {
            Ok(next) => next,
            Err(error) => {
                writeln!(out, "error: {error}")?;
                continue;
            }
        };
        match command {
            SessionCommand::Rows => render_rows(root, &state, &mut loaded, out)?,
            SessionCommand::Project => render_projection(root, &state, &mut loaded, out)?,
            SessionCommand::Category(_) => {
                if let Some(category) = state.category() {
                    writeln!(out, "Selected category: {category}")?;
                }
            }
            _ => render_dataset(root, &state, &mut loaded, out)?,
        }
    }
    Ok(())
}

/// Returns the dataset selected in `state`, loading it when the selection
/// moved. A load failure is reported and leaves nothing loaded.
fn ensure_loaded<'a, W: Write>(
    root: &Path,
    state: &SessionState,
    loaded: &'a mut Option<LoadedDataset>,
    out: &mut W,
) -> Result<Option<&'a LoadedDataset>> {
    let Some(descriptor) = state.dataset() else {
        writeln!(out, "no dataset registered for {}", state.sector())?;
        return Ok(None);
    };
    if !is_current(loaded.as_ref(), descriptor) {
        *loaded = match load_dataset(root, descriptor) {
            Ok(dataset) => Some(dataset),
            Err(error) => {
                warn!(dataset = descriptor.slug, %error, "dataset failed to load");
                writeln!(out, "error: {error}")?;
                None
            }
        };
    }
    Ok(loaded.as_ref())
}

fn is_current(loaded: Option<&LoadedDataset>, descriptor: &DatasetDescriptor) -> bool {
    loaded.is_some_and(|dataset| dataset.descriptor == *descriptor)
}

fn render_dataset<W: Write>(
    root: &Path,
    state: &SessionState,
    loaded: &mut Option<LoadedDataset>,
    out: &mut W,
) -> Result<()> {
    let Some(dataset) = ensure_loaded(root, state, loaded, out)? else {
        return Ok(());
    };
    let view = build_view(state, &dataset.table);
    writeln!(
        out,
        "{} / {}",
        dataset.descriptor.sector, dataset.descriptor.name
    )?;
    writeln!(out, "Categories: {}", category_list(view.categories))?;
    match view.chart {
        Ok(pivot) => writeln!(out, "{}", pivot_table(&pivot))?,
        Err(PivotError::Selection(error)) => {
            writeln!(out, "warning: {error}; select at least one category to chart")?;
        }
        Err(error) => writeln!(out, "error: {error}")?,
    }
    if let Some(category) = &view.analysis_category {
        writeln!(out, "Selected category: {category}")?;
    }
    Ok(())
}

fn render_rows<W: Write>(
    root: &Path,
    state: &SessionState,
    loaded: &mut Option<LoadedDataset>,
    out: &mut W,
) -> Result<()> {
    let Some(dataset) = ensure_loaded(root, state, loaded, out)? else {
        return Ok(());
    };
    let view = build_view(state, &dataset.table);
    match view.analysis_category {
        Some(category) if view.rows.is_empty() => {
            writeln!(out, "warning: no data found for category '{category}'")?;
        }
        Some(_) => writeln!(out, "{}", rows_table(&view.rows))?,
        None => writeln!(out, "warning: dataset has no categories")?,
    }
    Ok(())
}

fn render_projection<W: Write>(
    root: &Path,
    state: &SessionState,
    loaded: &mut Option<LoadedDataset>,
    out: &mut W,
) -> Result<()> {
    let Some(dataset) = ensure_loaded(root, state, loaded, out)? else {
        return Ok(());
    };
    let view = build_view(state, &dataset.table);
    let Some(category) = view.analysis_category else {
        writeln!(out, "warning: dataset has no categories")?;
        return Ok(());
    };
    match project_trend(&dataset.table, &category) {
        Ok(projection) => {
            write!(out, "{}", projection_summary(&projection))?;
            writeln!(out, "{}", projection_table(&projection))?;
        }
        Err(error) => writeln!(out, "warning: {error}")?,
    }
    Ok(())
}
