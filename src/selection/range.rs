//! Fractional-year coordinates and the selectable date domain
//!
//! A calendar month is encoded as `year + (month - 1) / 12`, so January 2020 is
//! `2020.0` and December 2020 is `2020.9166...`.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{DcaError, Result};

/// Minimum separation between the two selection handles
pub const ONE_MONTH: f64 = 1.0 / 12.0;

/// Month-index drift below an integer that is still treated as that integer
const MONTH_EPSILON: f64 = 1e-9;

/// Encode a calendar date as a fractional year (day of month is dropped)
pub fn fractional_year(date: NaiveDate) -> f64 {
    date.year() as f64 + (date.month0() as f64) / 12.0
}

/// Decode a fractional year into `(year, month)` with month in 1..=12
///
/// Interpolated values can land a hair below a month boundary, or round so that
/// `(value - year) * 12` reaches 12.0; both are absorbed here.
pub fn year_month(value: f64) -> (i32, u32) {
    let year = value.floor();
    let month_index = ((value - year) * 12.0 + MONTH_EPSILON).floor();
    let month = (month_index as i64 + 1).clamp(1, 12) as u32;
    (year as i32, month)
}

/// Render a fractional year as `MM-YYYY`
pub fn format_month(value: f64) -> String {
    let (year, month) = year_month(value);
    format!("{:02}-{:04}", month, year)
}

/// Parse an `MM-YYYY` label back into a fractional year
pub fn parse_month_label(label: &str) -> Result<f64> {
    let trimmed = label.trim();
    let (month, year) = trimmed
        .split_once('-')
        .ok_or_else(|| DcaError::numeric("month label", label))?;

    let month: u32 = month
        .trim()
        .parse()
        .map_err(|_| DcaError::numeric("month label", label))?;
    let year: i32 = year
        .trim()
        .parse()
        .map_err(|_| DcaError::numeric("month label", label))?;

    if !(1..=12).contains(&month) {
        return Err(DcaError::numeric("month label", label));
    }

    Ok(year as f64 + (month - 1) as f64 / 12.0)
}

/// First calendar day of the month a fractional year falls in
pub fn month_start(value: f64) -> NaiveDate {
    let (year, month) = year_month(value);
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MIN)
}

/// Last calendar day of the month a fractional year falls in
pub fn month_end(value: f64) -> NaiveDate {
    let (year, month) = year_month(value);
    let next_month_start = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };

    next_month_start
        .and_then(|d| d.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

/// Full selectable domain in fractional years
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: f64,
    pub to: f64,
}

impl DateRange {
    /// Build a domain, swapping the bounds if they arrive reversed
    pub fn new(from: f64, to: f64) -> Self {
        if from <= to {
            Self { from, to }
        } else {
            Self { from: to, to: from }
        }
    }

    /// Domain covering the months of two calendar dates
    pub fn from_dates(first: NaiveDate, last: NaiveDate) -> Self {
        Self::new(fractional_year(first), fractional_year(last))
    }

    /// Width of the domain in years
    pub fn span(&self) -> f64 {
        self.to - self.from
    }

    pub fn is_degenerate(&self) -> bool {
        self.span() <= 0.0
    }

    /// Whether the domain is wide enough to hold a one-month selection
    pub fn spans_one_month(&self) -> bool {
        self.span() + MONTH_EPSILON >= ONE_MONTH
    }
}
