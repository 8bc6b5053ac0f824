pub mod period;
pub mod price_series;

pub use period::Period;
pub use price_series::{DailyBar, PriceSeries, TickerInfo};
