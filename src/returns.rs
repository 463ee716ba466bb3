//! Expected annual return estimated from historical closes
//!
//! The estimate is the arithmetic mean of simple period-over-period returns,
//! scaled by a fixed trading-days-per-year constant. The series is treated as
//! daily regardless of its actual sampling.

use crate::error::{DcaError, Result};
use crate::series::PriceSeries;

/// Trading days per year used for both annualization and daily compounding
pub const TRADING_DAYS_PER_YEAR: u32 = 252;

/// Estimates an annualized rate from a price series
#[derive(Debug, Clone, Copy)]
pub struct ReturnEstimator {
    periods_per_year: f64,
}

impl ReturnEstimator {
    pub fn new() -> Self {
        Self {
            periods_per_year: TRADING_DAYS_PER_YEAR as f64,
        }
    }

    /// Annualized mean simple return over consecutive closes
    pub fn estimate(&self, series: &PriceSeries) -> Result<f64> {
        if series.len() < 2 {
            return Err(DcaError::InsufficientData {
                points: series.len(),
            });
        }

        let returns = simple_returns(series);
        let mean = returns.iter().sum::<f64>() / returns.len() as f64;
        let annual = mean * self.periods_per_year;

        log::debug!(
            "Estimated {:.4}% annual from {} returns (mean {:.6})",
            annual * 100.0,
            returns.len(),
            mean
        );

        Ok(annual)
    }
}

impl Default for ReturnEstimator {
    fn default() -> Self {
        Self::new()
    }
}

/// `close_i / close_{i-1} - 1` for each consecutive pair
pub fn simple_returns(series: &PriceSeries) -> Vec<f64> {
    series
        .points()
        .windows(2)
        .map(|w| w[1].close / w[0].close - 1.0)
        .collect()
}
