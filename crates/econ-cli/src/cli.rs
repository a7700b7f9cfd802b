//! CLI argument definitions for the dashboard.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "econ-dash",
    version,
    about = "Macroeconomic dashboard - browse normalized sector statistics",
    long_about = "Load government statistics exports (real sector, external sector,\n\
                  public finances), normalize them into (Category, Year, Value) rows\n\
                  and browse trends with a linear projection per category."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Directory holding the per-sector CSV folders (default: $ECON_DATA_DIR or ./data).
    #[arg(long = "data-dir", value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List sectors and their datasets.
    Sectors,

    /// Load every registered dataset and report what survived normalization.
    Check,

    /// Show the categories and the Year x Category table of a dataset.
    Show(ShowArgs),

    /// List the rows of one category.
    Rows(CategoryArgs),

    /// Fit a linear trend to one category and project the next period.
    Project(ProjectArgs),

    /// Write a dataset as CSV.
    Export(ExportArgs),

    /// Interactive line-driven session over stdin.
    Browse,
}

#[derive(Args)]
pub struct DatasetArgs {
    /// Sector name or slug (e.g. "external-sector").
    #[arg(value_name = "SECTOR")]
    pub sector: String,

    /// Dataset name or slug (e.g. "exports").
    #[arg(value_name = "DATASET")]
    pub dataset: String,
}

#[derive(Args)]
pub struct ShowArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    /// Categories to include in the table (repeatable; default: all).
    #[arg(long = "category", short = 'c', value_name = "NAME")]
    pub categories: Vec<String>,
}

#[derive(Args)]
pub struct CategoryArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    #[arg(value_name = "CATEGORY")]
    pub category: String,
}

#[derive(Args)]
pub struct ProjectArgs {
    #[command(flatten)]
    pub target: CategoryArgs,

    /// Print the projection as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    /// Destination CSV file.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: PathBuf,

    /// Write the Year x Category table instead of long rows.
    #[arg(long = "wide")]
    pub wide: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
