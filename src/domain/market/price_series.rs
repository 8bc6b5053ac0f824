use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One daily OHLC record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyBar {
    /// Unix timestamp (seconds) of the session
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl DailyBar {
    pub fn date(&self) -> Option<NaiveDate> {
        DateTime::<Utc>::from_timestamp(self.timestamp, 0).map(|dt| dt.date_naive())
    }
}

/// Chronologically ordered daily bars for a single symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    symbol: String,
    bars: Vec<DailyBar>,
}

impl PriceSeries {
    /// Builds a series, sorting bars by timestamp.
    pub fn new(symbol: impl Into<String>, mut bars: Vec<DailyBar>) -> Self {
        bars.sort_by_key(|b| b.timestamp);
        Self {
            symbol: symbol.into(),
            bars,
        }
    }

    /// Convenience constructor for close-only series (one bar per day from `start_ts`).
    pub fn from_closes(symbol: impl Into<String>, start_ts: i64, closes: &[f64]) -> Self {
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| DailyBar {
                timestamp: start_ts + i as i64 * 86_400,
                open: close,
                high: close,
                low: close,
                close,
                volume: 0.0,
            })
            .collect();
        Self::new(symbol, bars)
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn bars(&self) -> &[DailyBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn last_close(&self) -> Option<f64> {
        self.bars.last().map(|b| b.close)
    }

    /// Keeps only bars dated on or after `start`.
    pub fn since(self, start: NaiveDate) -> Self {
        let bars = self
            .bars
            .into_iter()
            .filter(|b| b.date().is_some_and(|d| d >= start))
            .collect();
        Self {
            symbol: self.symbol,
            bars,
        }
    }
}

/// Basic ticker metadata.
///
/// A missing `regular_market_price` marks the symbol as unknown to the provider.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TickerInfo {
    pub symbol: String,
    pub regular_market_price: Option<f64>,
    pub currency: Option<String>,
    pub exchange: Option<String>,
}

impl TickerInfo {
    pub fn unknown(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            ..Default::default()
        }
    }

    pub fn is_valid(&self) -> bool {
        self.regular_market_price.is_some()
    }
}
