use crate::domain::market::{Period, PriceSeries, TickerInfo};
use anyhow::Result;
use async_trait::async_trait;

/// Source of ticker metadata and daily price history.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Fetch metadata for `symbol`. Unknown symbols yield a `TickerInfo`
    /// without a market price rather than an error.
    async fn fetch_info(&self, symbol: &str) -> Result<TickerInfo>;

    /// Fetch the daily series covering `period`, oldest bar first.
    async fn fetch_history(&self, symbol: &str, period: Period) -> Result<PriceSeries>;

    /// Provider name for logging
    fn name(&self) -> &str;
}
