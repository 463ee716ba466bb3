//! Running state of a projection between periods

use super::points::ProjectionPoint;

/// Wealth and contributions at the end of a period
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionState {
    /// Current period (0 = initial investment, before any contribution)
    pub period_index: u32,

    /// Projected value of the holding
    pub value: f64,

    /// Cumulative amount contributed
    pub invested: f64,
}

impl ProjectionState {
    /// Seed state at the moment of the initial investment
    pub fn seed(initial: f64) -> Self {
        Self {
            period_index: 0,
            value: initial,
            invested: initial,
        }
    }

    /// Grow the holding for one period, then add the period's contribution
    pub fn advance(&mut self, rate_per_period: f64, contribution: f64) {
        self.period_index += 1;
        self.value = self.value * (1.0 + rate_per_period) + contribution;
        self.invested += contribution;
    }

    pub fn to_point(&self) -> ProjectionPoint {
        ProjectionPoint {
            period_index: self.period_index,
            future_value: self.value,
            total_invested: self.invested,
        }
    }
}
