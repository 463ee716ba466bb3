//! DCA Calculator - dollar-cost-averaging projections from historical prices
//!
//! This library provides:
//! - CSV price series loading
//! - Two-handle date range selection over fractional-year coordinates
//! - Annualized return estimation over the selected window
//! - Recurring-deposit compounding projections with money-weighted return
//! - Presentation helpers (formatting, chart series, CSV/JSON export)

pub mod error;
pub mod series;
pub mod selection;
pub mod returns;
pub mod projection;
pub mod report;
pub mod config;
pub mod session;

// Re-export commonly used types
pub use error::{DcaError, Result};
pub use series::{PricePoint, PriceSeries};
pub use selection::{DateRange, DateRangeSelector, SelectionState};
pub use returns::{ReturnEstimator, TRADING_DAYS_PER_YEAR};
pub use projection::{PeriodUnit, ProjectionEngine, ProjectionInputs, ProjectionPoint, ProjectionResult};
pub use config::CalculatorConfig;
pub use session::DcaSession;
