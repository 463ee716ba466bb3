//! Core projection engine for recurring-deposit compounding

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::points::{ProjectionPoint, ProjectionResult};
use super::state::ProjectionState;
use crate::error::{DcaError, Result};
use crate::returns::TRADING_DAYS_PER_YEAR;

/// Contribution and compounding cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodUnit {
    Daily,
    Monthly,
    Yearly,
}

impl PeriodUnit {
    pub fn periods_per_year(&self) -> u32 {
        match self {
            PeriodUnit::Daily => TRADING_DAYS_PER_YEAR,
            PeriodUnit::Monthly => 12,
            PeriodUnit::Yearly => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodUnit::Daily => "daily",
            PeriodUnit::Monthly => "monthly",
            PeriodUnit::Yearly => "yearly",
        }
    }
}

impl FromStr for PeriodUnit {
    type Err = DcaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(PeriodUnit::Daily),
            "monthly" => Ok(PeriodUnit::Monthly),
            "yearly" => Ok(PeriodUnit::Yearly),
            _ => Err(DcaError::InvalidPeriodUnit(s.to_string())),
        }
    }
}

impl fmt::Display for PeriodUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Investment plan to project
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionInputs {
    /// Lump sum invested at period 0
    pub initial: f64,

    /// Amount added at the end of every period
    pub periodic: f64,

    pub period_unit: PeriodUnit,

    /// Projection horizon in whole years
    pub years: u32,
}

impl ProjectionInputs {
    /// Parse raw text fields as entered by a user
    pub fn parse(initial: &str, periodic: &str, period_unit: &str, years: &str) -> Result<Self> {
        let initial: f64 = initial
            .trim()
            .parse()
            .map_err(|_| DcaError::numeric("initial", initial))?;
        let periodic: f64 = periodic
            .trim()
            .parse()
            .map_err(|_| DcaError::numeric("periodic", periodic))?;
        let period_unit: PeriodUnit = period_unit.parse()?;
        let raw_years: i64 = years
            .trim()
            .parse()
            .map_err(|_| DcaError::numeric("years", years))?;
        let years = u32::try_from(raw_years)
            .map_err(|_| DcaError::InvalidInput(format!("years must be positive, got {}", raw_years)))?;

        let inputs = Self {
            initial,
            periodic,
            period_unit,
            years,
        };
        inputs.validate()?;
        Ok(inputs)
    }

    /// Check semantic preconditions: finite non-negative amounts, positive years
    pub fn validate(&self) -> Result<()> {
        if !self.initial.is_finite() || self.initial < 0.0 {
            return Err(DcaError::InvalidInput(format!(
                "initial investment must be non-negative, got {}",
                self.initial
            )));
        }
        if !self.periodic.is_finite() || self.periodic < 0.0 {
            return Err(DcaError::InvalidInput(format!(
                "periodic investment must be non-negative, got {}",
                self.periodic
            )));
        }
        if self.years == 0 {
            return Err(DcaError::InvalidInput("years must be positive, got 0".to_string()));
        }
        self.total_periods()?;
        Ok(())
    }

    pub fn total_periods(&self) -> Result<u32> {
        self.period_unit
            .periods_per_year()
            .checked_mul(self.years)
            .ok_or_else(|| DcaError::InvalidInput(format!("horizon of {} years is too long", self.years)))
    }
}

/// Projection engine for a fixed investment plan
#[derive(Debug, Clone)]
pub struct ProjectionEngine {
    inputs: ProjectionInputs,
}

impl ProjectionEngine {
    pub fn new(inputs: ProjectionInputs) -> Self {
        Self { inputs }
    }

    pub fn inputs(&self) -> &ProjectionInputs {
        &self.inputs
    }

    /// Project the plan at a fixed annual rate
    pub fn project(&self, annual_rate: f64) -> Result<ProjectionResult> {
        self.inputs.validate()?;
        if !annual_rate.is_finite() {
            return Err(DcaError::InvalidInput(format!(
                "annual rate must be finite, got {}",
                annual_rate
            )));
        }

        let periods_per_year = self.inputs.period_unit.periods_per_year();
        let total_periods = self.inputs.total_periods()?;
        let rate_per_period = annual_rate / periods_per_year as f64;

        let points = accumulate(
            self.inputs.initial,
            self.inputs.periodic,
            rate_per_period,
            total_periods,
        );

        log::debug!(
            "Projected {} {} periods at {:.4}% annual",
            total_periods,
            self.inputs.period_unit,
            annual_rate * 100.0
        );

        Ok(ProjectionResult::from_points(
            points,
            self.inputs.period_unit,
            self.inputs.years,
            annual_rate,
        ))
    }
}

/// Run the deposit recurrence, returning `total_periods + 1` points
pub(crate) fn accumulate(
    initial: f64,
    periodic: f64,
    rate_per_period: f64,
    total_periods: u32,
) -> Vec<ProjectionPoint> {
    let mut state = ProjectionState::seed(initial);
    let mut points = Vec::with_capacity(total_periods as usize + 1);
    points.push(state.to_point());

    for _period in 1..=total_periods {
        state.advance(rate_per_period, periodic);
        points.push(state.to_point());
    }

    points
}

/// Final value via the annuity sum: `initial*(1+r)^N + periodic * ((1+r)^N - 1) / r`,
/// which reduces to `initial + periodic*N` at a zero rate
pub fn closed_form_future_value(
    initial: f64,
    periodic: f64,
    rate_per_period: f64,
    total_periods: u32,
) -> f64 {
    let n = f64::from(total_periods);
    let compounded = (1.0 + rate_per_period).powf(n);

    let annuity = if rate_per_period == 0.0 {
        n
    } else {
        (compounded - 1.0) / rate_per_period
    };
    initial * compounded + periodic * annuity
}
