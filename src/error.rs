//! Error types shared across the calculator

use thiserror::Error;

/// Errors raised by the loader, selector, estimator and projection engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DcaError {
    /// Price file missing, unreadable, or malformed
    #[error("Failed to load price series from {path}: {reason}")]
    Load { path: String, reason: String },

    /// A user-facing numeric field that does not parse
    #[error("Invalid numeric input for {field}: '{value}'")]
    InvalidNumericInput { field: String, value: String },

    /// Period unit outside daily/monthly/yearly
    #[error("Invalid period unit '{0}' (expected daily, monthly or yearly)")]
    InvalidPeriodUnit(String),

    /// Fewer than two prices in the selected range
    #[error("Insufficient data: need at least 2 prices, got {points}")]
    InsufficientData { points: usize },

    /// Selection narrower than one month
    #[error("Degenerate range: {low:.4} to {high:.4} spans less than one month")]
    DegenerateRange { low: f64, high: f64 },

    /// Semantic precondition violated (negative amount, zero years, non-finite rate)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Config file unreadable or malformed
    #[error("Configuration error: {0}")]
    Config(String),

    /// Writing a report or export failed
    #[error("Export error: {0}")]
    Export(String),
}

impl DcaError {
    pub(crate) fn load(path: impl Into<String>, reason: impl ToString) -> Self {
        DcaError::Load {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn numeric(field: &str, value: &str) -> Self {
        DcaError::InvalidNumericInput {
            field: field.to_string(),
            value: value.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DcaError>;
