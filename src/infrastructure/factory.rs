use crate::config::{Config, DataSource};
use crate::domain::ports::MarketDataProvider;
use crate::infrastructure::csv_history::CsvHistoryProvider;
use crate::infrastructure::yahoo::YahooMarketDataProvider;
use std::sync::Arc;
use tracing::info;

pub struct ProviderFactory;

impl ProviderFactory {
    pub fn create_provider(config: &Config) -> Arc<dyn MarketDataProvider> {
        match config.data_source.source {
            DataSource::Yahoo => {
                info!(
                    "Using Yahoo Finance market data ({})",
                    config.data_source.yahoo_base_url
                );
                Arc::new(YahooMarketDataProvider::new(
                    config.data_source.yahoo_base_url.clone(),
                    &config.http,
                ))
            }
            DataSource::Csv => {
                info!(
                    "Using CSV market data from {:?}",
                    config.data_source.csv_data_dir
                );
                Arc::new(CsvHistoryProvider::new(
                    config.data_source.csv_data_dir.clone(),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_follows_data_source() {
        let mut config = Config::default();
        assert_eq!(ProviderFactory::create_provider(&config).name(), "Yahoo Finance");

        config.data_source.source = DataSource::Csv;
        assert_eq!(ProviderFactory::create_provider(&config).name(), "CSV");
    }
}
