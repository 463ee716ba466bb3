//! Price series data structures

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::selection::{DateRange, SelectionState};

/// A single closing price
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }
}

/// Date-ordered closing prices for a single instrument
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Build a series, sorting ascending by date. Duplicate dates are kept.
    pub fn new(mut points: Vec<PricePoint>) -> Self {
        points.sort_by_key(|p| p.date);
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn closes(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.close)
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }

    /// Selectable domain spanning the first and last months of the series
    pub fn domain(&self) -> Option<DateRange> {
        Some(DateRange::from_dates(self.first_date()?, self.last_date()?))
    }

    /// Sub-series with `start <= date <= end`
    pub fn restrict(&self, start: NaiveDate, end: NaiveDate) -> PriceSeries {
        let points = self
            .points
            .iter()
            .filter(|p| p.date >= start && p.date <= end)
            .copied()
            .collect();
        PriceSeries { points }
    }

    /// Sub-series covered by a selection, end month inclusive
    pub fn restrict_to_selection(&self, selection: &SelectionState) -> PriceSeries {
        let (start, end) = selection.calendar_bounds();
        self.restrict(start, end)
    }
}

impl FromIterator<PricePoint> for PriceSeries {
    fn from_iter<I: IntoIterator<Item = PricePoint>>(iter: I) -> Self {
        PriceSeries::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> PriceSeries {
        PriceSeries::new(vec![
            PricePoint::new(ymd(2021, 3, 31), 103.0),
            PricePoint::new(ymd(2021, 1, 4), 100.0),
            PricePoint::new(ymd(2021, 2, 26), 101.5),
            PricePoint::new(ymd(2021, 2, 1), 99.0),
        ])
    }

    #[test]
    fn test_sorted_on_construction() {
        let series = sample();
        let dates: Vec<_> = series.points().iter().map(|p| p.date).collect();
        assert_eq!(
            dates,
            vec![ymd(2021, 1, 4), ymd(2021, 2, 1), ymd(2021, 2, 26), ymd(2021, 3, 31)]
        );
    }

    #[test]
    fn test_domain() {
        let domain = sample().domain().unwrap();
        assert_eq!(domain.from, 2021.0);
        assert_eq!(domain.to, 2021.0 + 2.0 / 12.0);

        assert!(PriceSeries::default().domain().is_none());
    }

    #[test]
    fn test_restrict_inclusive() {
        let series = sample();
        let sub = series.restrict(ymd(2021, 2, 1), ymd(2021, 2, 28));
        assert_eq!(sub.len(), 2);
        assert_eq!(sub.closes().collect::<Vec<_>>(), vec![99.0, 101.5]);
    }

    #[test]
    fn test_restrict_to_selection_includes_last_day_of_month() {
        let series = sample();
        let selection = SelectionState::new(2021.0 + 1.0 / 12.0, 2021.0 + 2.0 / 12.0).unwrap();
        let sub = series.restrict_to_selection(&selection);

        // Feb 1 through Mar 31, so the Mar 31 close is included
        assert_eq!(sub.len(), 3);
        assert_eq!(sub.last_date(), Some(ymd(2021, 3, 31)));
    }
}
