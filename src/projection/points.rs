//! Projection output structures

use serde::{Deserialize, Serialize};

use super::engine::PeriodUnit;
use super::irr::calculate_irr;

/// Projected wealth at the end of one period
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionPoint {
    /// 0 = initial investment, before any periodic contribution
    pub period_index: u32,
    pub future_value: f64,
    pub total_invested: f64,
}

/// Complete projection result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// One point per period, plus the seed
    pub points: Vec<ProjectionPoint>,

    pub period_unit: PeriodUnit,
    pub years: u32,

    /// Annual rate the projection was run at
    pub annual_rate: f64,

    pub total_invested: f64,
    pub future_value: f64,
    pub profit: f64,
}

impl ProjectionResult {
    /// Build a result, taking the totals from the final point
    pub fn from_points(
        points: Vec<ProjectionPoint>,
        period_unit: PeriodUnit,
        years: u32,
        annual_rate: f64,
    ) -> Self {
        let (total_invested, future_value) = points
            .last()
            .map(|p| (p.total_invested, p.future_value))
            .unwrap_or((0.0, 0.0));

        Self {
            points,
            period_unit,
            years,
            annual_rate,
            total_invested,
            future_value,
            profit: future_value - total_invested,
        }
    }

    pub fn total_periods(&self) -> u32 {
        self.points.len().saturating_sub(1) as u32
    }

    /// Point under the cursor when hovering the chart
    pub fn point(&self, index: usize) -> Option<&ProjectionPoint> {
        self.points.get(index)
    }

    /// Elapsed years at a period: `years * index / total_periods`
    pub fn elapsed_years(&self, period_index: u32) -> f64 {
        let total = self.total_periods();
        if total == 0 {
            return 0.0;
        }
        self.years as f64 * period_index as f64 / total as f64
    }

    /// Investor cash flows: contributions out, final value back in at the last period
    pub fn contribution_cashflows(&self) -> Vec<f64> {
        let mut cashflows = Vec::with_capacity(self.points.len());
        let mut previous_invested = 0.0;

        for point in &self.points {
            cashflows.push(-(point.total_invested - previous_invested));
            previous_invested = point.total_invested;
        }

        if let Some(last) = cashflows.last_mut() {
            *last += self.future_value;
        }

        cashflows
    }

    /// Annual money-weighted return (IRR) of the plan
    pub fn money_weighted_return(&self) -> Option<f64> {
        if self.points.len() < 2 {
            return None;
        }
        calculate_irr(&self.contribution_cashflows(), self.period_unit.periods_per_year())
    }

    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        let return_on_invested = if self.total_invested > 0.0 {
            self.profit / self.total_invested
        } else {
            0.0
        };

        ProjectionSummary {
            total_periods: self.total_periods(),
            annual_rate: self.annual_rate,
            total_invested: self.total_invested,
            future_value: self.future_value,
            profit: self.profit,
            return_on_invested,
            money_weighted_return: self.money_weighted_return(),
        }
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub total_periods: u32,
    pub annual_rate: f64,
    pub total_invested: f64,
    pub future_value: f64,
    pub profit: f64,
    /// Profit as a fraction of the amount invested
    pub return_on_invested: f64,
    pub money_weighted_return: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::{ProjectionEngine, ProjectionInputs};
    use approx::assert_abs_diff_eq;

    fn yearly_result() -> ProjectionResult {
        ProjectionEngine::new(ProjectionInputs {
            initial: 1000.0,
            periodic: 100.0,
            period_unit: PeriodUnit::Yearly,
            years: 3,
        })
        .project(0.10)
        .unwrap()
    }

    #[test]
    fn test_elapsed_years_axis() {
        let result = ProjectionEngine::new(ProjectionInputs {
            initial: 0.0,
            periodic: 1.0,
            period_unit: PeriodUnit::Monthly,
            years: 2,
        })
        .project(0.0)
        .unwrap();

        assert_eq!(result.total_periods(), 24);
        assert_eq!(result.elapsed_years(0), 0.0);
        assert_abs_diff_eq!(result.elapsed_years(6), 0.5);
        assert_abs_diff_eq!(result.elapsed_years(24), 2.0);
    }

    #[test]
    fn test_hover_lookup() {
        let result = yearly_result();
        assert_eq!(result.point(0).map(|p| p.future_value), Some(1000.0));
        assert_eq!(result.point(2).map(|p| p.total_invested), Some(1200.0));
        assert!(result.point(4).is_none());
    }

    #[test]
    fn test_contribution_cashflows() {
        let result = yearly_result();
        let cashflows = result.contribution_cashflows();
        assert_eq!(cashflows.len(), 4);
        assert_eq!(cashflows[0], -1000.0);
        assert_eq!(cashflows[1], -100.0);
        assert_abs_diff_eq!(cashflows[3], 1662.0 - 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_money_weighted_return_matches_rate() {
        let result = yearly_result();
        let mwr = result.money_weighted_return().unwrap();
        assert_abs_diff_eq!(mwr, 0.10, epsilon = 1e-6);

        // Monthly compounding at 12% is 12.68% effective
        let monthly = ProjectionEngine::new(ProjectionInputs {
            initial: 500.0,
            periodic: 50.0,
            period_unit: PeriodUnit::Monthly,
            years: 4,
        })
        .project(0.12)
        .unwrap();
        let effective = 1.01_f64.powi(12) - 1.0;
        assert_abs_diff_eq!(monthly.money_weighted_return().unwrap(), effective, epsilon = 1e-6);
    }

    #[test]
    fn test_money_weighted_return_daily_losses() {
        let expected = (1.0 - 0.5 / 252.0_f64).powi(252) - 1.0;

        for years in [1, 5] {
            let daily = ProjectionEngine::new(ProjectionInputs {
                initial: 1000.0,
                periodic: 10.0,
                period_unit: PeriodUnit::Daily,
                years,
            })
            .project(-0.5)
            .unwrap();
            assert_abs_diff_eq!(daily.money_weighted_return().unwrap(), expected, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_summary() {
        let summary = yearly_result().summary();
        assert_eq!(summary.total_periods, 3);
        assert_abs_diff_eq!(summary.profit, 362.0, epsilon = 1e-9);
        assert_abs_diff_eq!(summary.return_on_invested, 362.0 / 1300.0, epsilon = 1e-12);
        assert!(summary.money_weighted_return.is_some());
    }
}
