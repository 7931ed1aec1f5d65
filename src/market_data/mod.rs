pub mod bars;
pub mod history;

// Re-export the bar types for convenient access (e.g. `use crate::market_data::BarSeries`).
pub use bars::{BarSeries, DailyBar};
pub use history::HistoryClient;
