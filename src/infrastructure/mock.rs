use crate::domain::market::{Period, PriceSeries, TickerInfo};
use crate::domain::ports::MarketDataProvider;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

/// In-memory provider for tests and demos.
///
/// Symbols that were never registered have no market price. History is
/// returned as registered; the period is ignored.
#[derive(Clone, Default)]
pub struct MockMarketDataProvider {
    series: Arc<RwLock<HashMap<String, PriceSeries>>>,
    info_calls: Arc<AtomicUsize>,
    history_calls: Arc<AtomicUsize>,
}

impl MockMarketDataProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, series: PriceSeries) {
        self.series
            .write()
            .await
            .insert(series.symbol().to_string(), series);
    }

    /// Registers a close-only series starting at 2024-01-01.
    pub async fn insert_closes(&self, symbol: &str, closes: &[f64]) {
        self.insert(PriceSeries::from_closes(symbol, 1_704_067_200, closes))
            .await;
    }

    pub fn info_calls(&self) -> usize {
        self.info_calls.load(Ordering::Relaxed)
    }

    pub fn history_calls(&self) -> usize {
        self.history_calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl MarketDataProvider for MockMarketDataProvider {
    async fn fetch_info(&self, symbol: &str) -> Result<TickerInfo> {
        self.info_calls.fetch_add(1, Ordering::Relaxed);
        let series = self.series.read().await;
        Ok(match series.get(symbol) {
            Some(s) => TickerInfo {
                symbol: symbol.to_string(),
                // Registered but empty series still count as known symbols
                regular_market_price: Some(s.last_close().unwrap_or(0.0)),
                currency: Some("USD".to_string()),
                exchange: Some("MOCK".to_string()),
            },
            None => TickerInfo::unknown(symbol),
        })
    }

    async fn fetch_history(&self, symbol: &str, _period: Period) -> Result<PriceSeries> {
        self.history_calls.fetch_add(1, Ordering::Relaxed);
        let series = self.series.read().await;
        series
            .get(symbol)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("MockMarketDataProvider: no history for {}", symbol))
    }

    fn name(&self) -> &str {
        "Mock"
    }
}
