//! Calculator configuration loaded from JSON
//!
//! Every field has a default so a partial file (or `{}`) is valid.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DcaError, Result};
use crate::projection::{PeriodUnit, ProjectionInputs};
use crate::selection::{parse_month_label, DateRange, SelectionState};

fn default_period() -> String {
    "monthly".to_string()
}

fn default_years() -> u32 {
    1
}

/// Saved calculator inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorConfig {
    /// CSV file with `Date` and `Close` columns
    #[serde(default)]
    pub price_file: Option<PathBuf>,

    #[serde(default)]
    pub initial_investment: f64,

    #[serde(default)]
    pub periodic_investment: f64,

    /// daily, monthly or yearly
    #[serde(default = "default_period")]
    pub period: String,

    #[serde(default = "default_years")]
    pub years: u32,

    /// First month of the estimation window, `MM-YYYY`
    #[serde(default)]
    pub range_start: Option<String>,

    /// Last month of the estimation window, `MM-YYYY` (inclusive)
    #[serde(default)]
    pub range_end: Option<String>,

    /// Where to write the projection table
    #[serde(default)]
    pub output: Option<PathBuf>,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            price_file: None,
            initial_investment: 0.0,
            periodic_investment: 0.0,
            period: default_period(),
            years: default_years(),
            range_start: None,
            range_end: None,
            output: None,
        }
    }
}

impl CalculatorConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| DcaError::Config(e.to_string()))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| DcaError::Config(format!("{}: {}", path.display(), e)))?;
        let config = Self::from_json_str(&text)?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Validated projection inputs
    pub fn inputs(&self) -> Result<ProjectionInputs> {
        let period_unit: PeriodUnit = self.period.parse()?;
        let inputs = ProjectionInputs {
            initial: self.initial_investment,
            periodic: self.periodic_investment,
            period_unit,
            years: self.years,
        };
        inputs.validate()?;
        Ok(inputs)
    }

    /// Typed estimation window, with a missing bound taken from the domain
    pub fn selection(&self, domain: DateRange) -> Result<Option<SelectionState>> {
        if self.range_start.is_none() && self.range_end.is_none() {
            return Ok(None);
        }

        let low = match &self.range_start {
            Some(label) => parse_month_label(label)?,
            None => domain.from,
        };
        let high = match &self.range_end {
            Some(label) => parse_month_label(label)?,
            None => domain.to,
        };

        SelectionState::new(low, high).map(Some)
    }
}
