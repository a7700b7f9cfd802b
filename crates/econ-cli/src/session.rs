//! Interaction state for one dashboard session.
//!
//! The state is a plain value: every transition consumes it and returns the
//! next one, and [`build_view`] derives what to display from it. Nothing is
//! kept outside the value, so two sessions never share a selection.

use std::collections::BTreeMap;

use econ_model::{DatasetDescriptor, PivotError, PivotTable, Sector, TidyRow, TidyTable};
use econ_standards::default_dataset;

/// Which categories the Year x Category table shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ChartSelection {
    #[default]
    All,
    Only(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    sector: Sector,
    /// Dataset last chosen in each sector.
    datasets: BTreeMap<Sector, &'static DatasetDescriptor>,
    chart: ChartSelection,
    /// Category for rows and projection; `None` means the first one.
    category: Option<String>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            sector: Sector::RealSector,
            datasets: BTreeMap::new(),
            chart: ChartSelection::All,
            category: None,
        }
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sector(&self) -> Sector {
        self.sector
    }

    pub fn chart(&self) -> &ChartSelection {
        &self.chart
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Dataset shown for the current sector: the remembered one, else the
    /// sector's first.
    pub fn dataset(&self) -> Option<&'static DatasetDescriptor> {
        self.datasets
            .get(&self.sector)
            .copied()
            .or_else(|| default_dataset(self.sector))
    }

    /// Switches sector. The dataset remembered for it comes back; chart and
    /// category selections start over when the shown dataset changes.
    #[must_use]
    pub fn with_sector(self, sector: Sector) -> Self {
        let before = self.dataset();
        let next = Self { sector, ..self };
        next.reset_if_changed(before)
    }

    /// Shows `descriptor`, moving to its sector if needed.
    #[must_use]
    pub fn with_dataset(mut self, descriptor: &'static DatasetDescriptor) -> Self {
        let before = self.dataset();
        self.sector = descriptor.sector;
        self.datasets.insert(descriptor.sector, descriptor);
        self.reset_if_changed(before)
    }

    #[must_use]
    pub fn with_chart(self, chart: ChartSelection) -> Self {
        Self { chart, ..self }
    }

    #[must_use]
    pub fn with_category(self, category: impl Into<String>) -> Self {
        let category = category.into().trim().to_string();
        Self {
            category: Some(category),
            ..self
        }
    }

    fn reset_if_changed(self, before: Option<&'static DatasetDescriptor>) -> Self {
        if self.dataset() == before {
            return self;
        }
        Self {
            chart: ChartSelection::All,
            category: None,
            ..self
        }
    }
}

/// Everything one screen of the dashboard shows for a loaded dataset.
#[derive(Debug)]
pub struct DatasetView<'a> {
    pub categories: &'a [String],
    pub chart: Result<PivotTable, PivotError>,
    /// Category used for rows and projection.
    pub analysis_category: Option<String>,
    pub rows: Vec<&'a TidyRow>,
}

pub fn build_view<'a>(state: &SessionState, table: &'a TidyTable) -> DatasetView<'a> {
    let chart = match state.chart() {
        ChartSelection::All => table.pivot_all(),
        ChartSelection::Only(categories) => table.pivot(categories),
    };
    let analysis_category = state
        .category()
        .map(str::to_string)
        .or_else(|| table.categories().first().cloned());
    let rows = analysis_category
        .as_deref()
        .map(|category| table.rows_for(category))
        .unwrap_or_default();
    DatasetView {
        categories: table.categories(),
        chart,
        analysis_category,
        rows,
    }
}
