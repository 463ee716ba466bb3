//! Two-handle date range selection over a continuous domain
//!
//! The selector owns its state outright. Rendering reads `get()` and
//! `map_to_position`; the only mutation is `move_nearest_handle`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::range::{format_month, month_end, month_start, DateRange, ONE_MONTH};
use crate::error::{DcaError, Result};

/// Tolerance applied when checking the one-month separation
const SEPARATION_TOLERANCE: f64 = 1e-9;

/// Selected sub-range in fractional years
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionState {
    pub low: f64,
    pub high: f64,
}

impl SelectionState {
    /// Build a selection typed in by the caller, rejecting spans under a month
    pub fn new(low: f64, high: f64) -> Result<Self> {
        let state = Self { low, high };
        state.validate()?;
        Ok(state)
    }

    /// Check ordering and minimum separation
    pub fn validate(&self) -> Result<()> {
        let ordered = self.low.is_finite() && self.high.is_finite() && self.low < self.high;
        if !ordered || self.span() + SEPARATION_TOLERANCE < ONE_MONTH {
            return Err(DcaError::DegenerateRange {
                low: self.low,
                high: self.high,
            });
        }
        Ok(())
    }

    /// Validate against the series domain. A domain narrower than one month
    /// cannot hold the minimum separation, so any ordered selection inside it
    /// is accepted.
    pub fn validate_within(&self, domain: DateRange) -> Result<()> {
        if domain.spans_one_month() {
            return self.validate();
        }
        let inside = self.low.is_finite()
            && self.high.is_finite()
            && domain.from <= self.low
            && self.low <= self.high
            && self.high <= domain.to;
        if !inside {
            return Err(DcaError::DegenerateRange {
                low: self.low,
                high: self.high,
            });
        }
        Ok(())
    }

    pub fn span(&self) -> f64 {
        self.high - self.low
    }

    /// Calendar dates covered: first day of the low month through the last day of the high month
    pub fn calendar_bounds(&self) -> (NaiveDate, NaiveDate) {
        (month_start(self.low), month_end(self.high))
    }

    /// `MM-YYYY` labels for both handles
    pub fn labels(&self) -> (String, String) {
        (format_month(self.low), format_month(self.high))
    }
}

/// Which handle a drag gesture moved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    Low,
    High,
}

/// Interactive range selector over a fractional-year domain
#[derive(Debug, Clone)]
pub struct DateRangeSelector {
    domain: DateRange,
    selection: SelectionState,
}

impl DateRangeSelector {
    /// Create a selector with the full domain selected
    pub fn new(domain: DateRange) -> Self {
        Self {
            domain,
            selection: SelectionState {
                low: domain.from,
                high: domain.to,
            },
        }
    }

    /// Reset to a new domain, selecting all of it
    pub fn initialize(&mut self, domain: DateRange) {
        self.domain = domain;
        self.selection = SelectionState {
            low: domain.from,
            high: domain.to,
        };
    }

    pub fn domain(&self) -> DateRange {
        self.domain
    }

    pub fn selection(&self) -> SelectionState {
        self.selection
    }

    /// Current `(low, high)` in fractional years
    pub fn get(&self) -> (f64, f64) {
        (self.selection.low, self.selection.high)
    }

    /// Map a track coordinate to a domain value, clamping to the track first
    pub fn map_to_value(&self, position: f64, track_start: f64, track_end: f64) -> f64 {
        let width = track_end - track_start;
        if self.domain.is_degenerate() || width == 0.0 {
            return self.domain.from;
        }

        let (lo, hi) = if track_start <= track_end {
            (track_start, track_end)
        } else {
            (track_end, track_start)
        };
        let position = position.clamp(lo, hi);

        self.domain.from + (position - track_start) / width * self.domain.span()
    }

    /// Inverse of `map_to_value`, used to place handles when drawing
    pub fn map_to_position(&self, value: f64, track_start: f64, track_end: f64) -> f64 {
        if self.domain.is_degenerate() {
            return track_start;
        }

        track_start + (value - self.domain.from) / self.domain.span() * (track_end - track_start)
    }

    /// Which handle a value would grab; ties go to the high handle
    pub fn nearest_handle(&self, value: f64) -> Handle {
        if (value - self.selection.low).abs() < (value - self.selection.high).abs() {
            Handle::Low
        } else {
            Handle::High
        }
    }

    /// Move whichever handle is nearest the pointer, keeping a one-month gap
    pub fn move_nearest_handle(
        &mut self,
        position: f64,
        track_start: f64,
        track_end: f64,
    ) -> SelectionState {
        let value = self.map_to_value(position, track_start, track_end);

        match self.nearest_handle(value) {
            Handle::Low => {
                self.selection.low = value.min(self.selection.high - ONE_MONTH);
            }
            Handle::High => {
                self.selection.high = value.max(self.selection.low + ONE_MONTH);
            }
        }

        log::debug!(
            "Selection moved to {} .. {}",
            format_month(self.selection.low),
            format_month(self.selection.high)
        );

        self.selection
    }

    /// Render a fractional year as `MM-YYYY`
    pub fn format_date(&self, value: f64) -> String {
        format_month(value)
    }

    /// Calendar dates covered by the current selection
    pub fn calendar_bounds(&self) -> (NaiveDate, NaiveDate) {
        self.selection.calendar_bounds()
    }
}
