//! Dollar-cost-averaging projection engine

mod state;
mod engine;
mod points;
pub mod irr;

pub use state::ProjectionState;
pub use engine::{closed_form_future_value, PeriodUnit, ProjectionEngine, ProjectionInputs};
pub use points::{ProjectionPoint, ProjectionResult, ProjectionSummary};
pub use irr::calculate_irr;
