//! Calculator session: a loaded series, its range selector, and the commands
//! a front end invokes against them
//!
//! The session owns the series and selector outright. Estimation and projection
//! read from them and never mutate; only drags change the selection.

use std::path::Path;

use rayon::prelude::*;

use crate::error::{DcaError, Result};
use crate::projection::{PeriodUnit, ProjectionEngine, ProjectionInputs, ProjectionResult};
use crate::returns::ReturnEstimator;
use crate::selection::{DateRangeSelector, SelectionState};
use crate::series::{self, PriceSeries};

/// Load a price series from a CSV file
pub fn load_series<P: AsRef<Path>>(path: P) -> Result<PriceSeries> {
    series::load_series(path)
}

/// Apply a drag at `position` on a track spanning `track_start..track_end`
pub fn select_range(
    selector: &mut DateRangeSelector,
    position: f64,
    track_start: f64,
    track_end: f64,
) -> SelectionState {
    selector.move_nearest_handle(position, track_start, track_end)
}

/// Annualized return over the months covered by `selection`
pub fn estimate_rate(series: &PriceSeries, selection: &SelectionState) -> Result<f64> {
    match series.domain() {
        Some(domain) => selection.validate_within(domain)?,
        None => return Err(DcaError::InsufficientData { points: 0 }),
    }
    let window = series.restrict_to_selection(selection);
    ReturnEstimator::new().estimate(&window)
}

/// Project a plan given a period unit as entered by the user
pub fn project(
    initial: f64,
    periodic: f64,
    period_unit: &str,
    years: u32,
    annual_rate: f64,
) -> Result<ProjectionResult> {
    let period_unit: PeriodUnit = period_unit.parse()?;
    let inputs = ProjectionInputs {
        initial,
        periodic,
        period_unit,
        years,
    };
    ProjectionEngine::new(inputs).project(annual_rate)
}

/// A loaded series with its selector
#[derive(Debug, Clone)]
pub struct DcaSession {
    series: PriceSeries,
    label: String,
    selector: DateRangeSelector,
}

impl DcaSession {
    /// Load a series from disk and select its full range
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let prices = load_series(path)?;
        Self::from_series(prices, series::series_label(path))
    }

    /// Start a session over an already loaded series
    pub fn from_series(series: PriceSeries, label: impl Into<String>) -> Result<Self> {
        let domain = series
            .domain()
            .ok_or(DcaError::InsufficientData { points: 0 })?;

        Ok(Self {
            series,
            label: label.into(),
            selector: DateRangeSelector::new(domain),
        })
    }

    pub fn series(&self) -> &PriceSeries {
        &self.series
    }

    /// Display label for the source series
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn selector(&self) -> &DateRangeSelector {
        &self.selector
    }

    pub fn selection(&self) -> SelectionState {
        self.selector.selection()
    }

    /// Drag the nearest handle of the range selector
    pub fn select_range(&mut self, position: f64, track_start: f64, track_end: f64) -> SelectionState {
        select_range(&mut self.selector, position, track_start, track_end)
    }

    /// Rate estimated over the selector's current range
    pub fn estimate_rate(&self) -> Result<f64> {
        self.estimate_rate_for(&self.selector.selection())
    }

    /// Rate estimated over a caller-supplied range (e.g. typed month labels)
    pub fn estimate_rate_for(&self, selection: &SelectionState) -> Result<f64> {
        let rate = estimate_rate(&self.series, selection)?;
        let (low, high) = selection.labels();
        log::info!(
            "{}: estimated annual return {:.2}% over {} to {}",
            self.label,
            rate * 100.0,
            low,
            high
        );
        Ok(rate)
    }

    /// Estimate over the current selection and project the plan at that rate
    pub fn run(&self, inputs: ProjectionInputs) -> Result<ProjectionResult> {
        let rate = self.estimate_rate()?;
        ProjectionEngine::new(inputs).project(rate)
    }

    /// Project the same plan over several horizons in parallel
    pub fn sweep_horizons(
        &self,
        inputs: ProjectionInputs,
        horizons: &[u32],
        annual_rate: f64,
    ) -> Result<Vec<ProjectionResult>> {
        horizons
            .par_iter()
            .map(|&years| ProjectionEngine::new(ProjectionInputs { years, ..inputs }).project(annual_rate))
            .collect()
    }
}
