pub mod core;
pub mod csv_history;
pub mod factory;
pub mod mock;
pub mod yahoo;

pub use csv_history::CsvHistoryProvider;
pub use factory::ProviderFactory;
pub use mock::MockMarketDataProvider;
pub use yahoo::YahooMarketDataProvider;
