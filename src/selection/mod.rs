//! Date range selection over a price series' calendar domain

mod range;
mod selector;

pub use range::{
    format_month, fractional_year, month_end, month_start, parse_month_label, year_month,
    DateRange, ONE_MONTH,
};
pub use selector::{DateRangeSelector, Handle, SelectionState};
