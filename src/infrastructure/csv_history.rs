use crate::domain::market::{DailyBar, Period, PriceSeries, TickerInfo};
use crate::domain::ports::MarketDataProvider;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// One CSV row. Either `date` (YYYY-MM-DD) or `timestamp` (unix seconds) must be set.
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    timestamp: Option<i64>,
    #[serde(default)]
    open: Option<f64>,
    #[serde(default)]
    high: Option<f64>,
    #[serde(default)]
    low: Option<f64>,
    #[serde(default)]
    close: Option<f64>,
    #[serde(default)]
    volume: Option<f64>,
}

impl CsvRecord {
    fn into_bar(self) -> Result<Option<DailyBar>> {
        let Some(close) = self.close else {
            return Ok(None);
        };
        let timestamp = match (self.timestamp, self.date.as_deref()) {
            (Some(ts), _) => ts,
            (None, Some(date)) => NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
                .with_context(|| format!("Invalid date: {}", date))?
                .and_hms_opt(0, 0, 0)
                .context("Invalid date")?
                .and_utc()
                .timestamp(),
            (None, None) => anyhow::bail!("Row has neither a date nor a timestamp"),
        };
        Ok(Some(DailyBar {
            timestamp,
            open: self.open.unwrap_or(close),
            high: self.high.unwrap_or(close),
            low: self.low.unwrap_or(close),
            close,
            volume: self.volume.unwrap_or(0.0),
        }))
    }
}

/// Reads daily history from `{dir}/{SYMBOL}.csv`.
///
/// A missing file is reported as an unknown symbol. The last close doubles as
/// the market price.
pub struct CsvHistoryProvider {
    dir: PathBuf,
}

impl CsvHistoryProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, symbol: &str) -> PathBuf {
        self.dir.join(format!("{}.csv", symbol.to_uppercase()))
    }

    async fn load(&self, symbol: &str, path: &Path) -> Result<PriceSeries> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {:?}", path))?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut bars = Vec::new();
        for (line, result) in rdr.deserialize::<CsvRecord>().enumerate() {
            let record = result.with_context(|| format!("Bad row {} in {:?}", line + 2, path))?;
            if let Some(bar) = record
                .into_bar()
                .with_context(|| format!("Bad row {} in {:?}", line + 2, path))?
            {
                bars.push(bar);
            }
        }

        debug!("CsvHistoryProvider: Read {} bars from {:?}", bars.len(), path);
        Ok(PriceSeries::new(symbol, bars))
    }
}

#[async_trait]
impl MarketDataProvider for CsvHistoryProvider {
    async fn fetch_info(&self, symbol: &str) -> Result<TickerInfo> {
        let path = self.path_for(symbol);
        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            return Ok(TickerInfo::unknown(symbol));
        }

        let series = self.load(symbol, &path).await?;
        Ok(TickerInfo {
            symbol: symbol.to_string(),
            regular_market_price: series.last_close(),
            currency: None,
            exchange: None,
        })
    }

    async fn fetch_history(&self, symbol: &str, period: Period) -> Result<PriceSeries> {
        let path = self.path_for(symbol);
        let series = self.load(symbol, &path).await?;

        let last_date = series.bars().last().and_then(|b| b.date());
        let series = match last_date.and_then(|d| period.window_start(d)) {
            Some(start) => series.since(start),
            None => series,
        };

        info!(
            "CsvHistoryProvider: {} daily bars for {} ({})",
            series.len(),
            symbol,
            period
        );
        Ok(series)
    }

    fn name(&self) -> &str {
        "CSV"
    }
}
