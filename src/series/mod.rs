//! Historical price series and CSV loading

mod data;
pub mod loader;

pub use data::{PricePoint, PriceSeries};
pub use loader::{load_series, load_series_from_reader, series_label};
