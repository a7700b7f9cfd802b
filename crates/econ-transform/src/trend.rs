//! Linear trend fit and one-step projection for a single category.
//!
//! Periods are opaque labels ("2022/23"), so the regressor is the row
//! position 0..n-1 rather than the label itself.

use econ_model::{SelectionError, TidyTable};
use serde::Serialize;

/// Ordinary least-squares line `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
}

impl LinearFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Fits a line through `(i, values[i])`.
///
/// Returns `None` for an empty slice. A single point yields a flat line
/// through it. R² is reported as 0 when x or y has no variance.
pub fn fit_line(values: &[f64]) -> Option<LinearFit> {
    if values.is_empty() {
        return None;
    }
    let n = values.len() as f64;
    let mean_x = (n - 1.0) / 2.0;
    let mean_y = values.iter().sum::<f64>() / n;

    let (mut sxx, mut sxy, mut syy) = (0.0, 0.0, 0.0);
    for (i, &y) in values.iter().enumerate() {
        let dx = i as f64 - mean_x;
        let dy = y - mean_y;
        sxx += dx * dx;
        sxy += dx * dy;
        syy += dy * dy;
    }

    if sxx == 0.0 {
        return Some(LinearFit {
            slope: 0.0,
            intercept: mean_y,
            r_squared: 0.0,
        });
    }
    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;
    // Identical values can still leave rounding noise in syy.
    let flat = syy == 0.0 || values.windows(2).all(|pair| pair[0] == pair[1]);
    let r_squared = if flat {
        0.0
    } else {
        (sxy * sxy / (sxx * syy)).clamp(0.0, 1.0)
    };
    Some(LinearFit {
        slope,
        intercept,
        r_squared,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub position: usize,
    pub year: String,
    pub value: f64,
    /// Value of the fitted line at this position.
    pub fitted: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendProjection {
    pub category: String,
    #[serde(flatten)]
    pub fit: LinearFit,
    pub points: Vec<TrendPoint>,
    /// Position of the projected step (the number of observations).
    pub next_position: usize,
    pub projected_value: f64,
}

/// Fits the category's series and projects the next step.
pub fn project_trend(
    table: &TidyTable,
    category: &str,
) -> Result<TrendProjection, SelectionError> {
    let series = table.series(category);
    let values: Vec<f64> = series.iter().map(|(_, value)| *value).collect();
    let Some(fit) = fit_line(&values) else {
        return Err(SelectionError::NoRows {
            category: category.trim().to_string(),
        });
    };

    let points = series
        .iter()
        .enumerate()
        .map(|(position, (year, value))| TrendPoint {
            position,
            year: (*year).to_string(),
            value: *value,
            fitted: fit.predict(position as f64),
        })
        .collect();
    let next_position = values.len();
    Ok(TrendProjection {
        category: category.trim().to_string(),
        fit,
        points,
        next_position,
        projected_value: fit.predict(next_position as f64),
    })
}
