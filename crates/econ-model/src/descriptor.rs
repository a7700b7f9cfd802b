//! Static per-dataset loading rules.
//!
//! A [`DatasetDescriptor`] captures every quirk of one spreadsheet export:
//! where the file lives, how many banner rows precede the header, which id
//! column to discard, and which [`Layout`] turns the grid into long rows.
//! Descriptors are plain `'static` data so the registry can be a `const`.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// Macroeconomic sector a dataset belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Sector {
    RealSector,
    ExternalSector,
    PublicFinances,
}

impl Sector {
    pub const ALL: [Sector; 3] = [
        Sector::RealSector,
        Sector::ExternalSector,
        Sector::PublicFinances,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            Sector::RealSector => "Real Sector",
            Sector::ExternalSector => "External Sector",
            Sector::PublicFinances => "Public Finances",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            Sector::RealSector => "real-sector",
            Sector::ExternalSector => "external-sector",
            Sector::PublicFinances => "public-finances",
        }
    }

    /// Sub-directory of the data root holding this sector's files.
    pub fn data_dir(self) -> &'static str {
        match self {
            Sector::RealSector => "RealSector",
            Sector::ExternalSector => "External Sector",
            Sector::PublicFinances => "Public Finances",
        }
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Whether the first data row may be a banner such as `Annual,Annual,...`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MetadataRowRule {
    #[default]
    Keep,
    Detect,
}

/// How a raw grid maps onto (Category, Year, Value).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// First column is the category label, every other column a period.
    Simple,
    /// One column carries the period; the remaining headers are categories.
    MergedHeader {
        /// Header names accepted for the period column besides a blank one.
        period_aliases: &'static [&'static str],
        /// Category header dropped from the output.
        excluded_category: Option<&'static str>,
    },
    /// Section marker and sub-item columns form a two-level outline.
    Hierarchical {
        section_headers: &'static [&'static str],
        /// Only headers containing one of these tokens hold values.
        period_tokens: &'static [&'static str],
    },
}

impl Layout {
    /// Number of leading label columns that never hold values.
    pub fn label_columns(&self) -> usize {
        match self {
            Layout::Simple | Layout::MergedHeader { .. } => 1,
            Layout::Hierarchical { .. } => 2,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Layout::Simple => "simple",
            Layout::MergedHeader { .. } => "merged-header",
            Layout::Hierarchical { .. } => "hierarchical",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetDescriptor {
    pub name: &'static str,
    pub slug: &'static str,
    pub sector: Sector,
    /// File name inside the sector directory.
    pub file: &'static str,
    /// Banner rows before the header row.
    pub skip_rows: usize,
    pub metadata_row: MetadataRowRule,
    /// Serial-number style headers removed on exact match.
    pub id_column_aliases: &'static [&'static str],
    pub drop_empty_columns: bool,
    pub layout: Layout,
}

impl DatasetDescriptor {
    /// Path of the source file relative to the data root.
    pub fn relative_path(&self) -> PathBuf {
        PathBuf::from(self.sector.data_dir()).join(self.file)
    }

    /// Returns true if `query` names this dataset by display name or slug.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim();
        self.name.eq_ignore_ascii_case(query) || self.slug.eq_ignore_ascii_case(query)
    }
}
