use crate::domain::market::{DailyBar, PriceSeries, TickerInfo};
use anyhow::Result;
use serde::Deserialize;

// ===== Chart API payload =====

#[derive(Debug, Deserialize)]
pub struct ChartResponse {
    pub chart: Chart,
}

#[derive(Debug, Deserialize)]
pub struct Chart {
    pub result: Option<Vec<ChartResult>>,
    pub error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
pub struct ChartError {
    pub code: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct ChartResult {
    pub meta: ChartMeta,
    #[serde(default)]
    pub timestamp: Vec<i64>,
    pub indicators: Indicators,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartMeta {
    pub symbol: Option<String>,
    pub currency: Option<String>,
    pub exchange_name: Option<String>,
    pub regular_market_price: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct Indicators {
    #[serde(default)]
    pub quote: Vec<QuoteColumns>,
}

#[derive(Debug, Default, Deserialize)]
pub struct QuoteColumns {
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    #[serde(default)]
    pub low: Vec<Option<f64>>,
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    #[serde(default)]
    pub volume: Vec<Option<f64>>,
}

impl ChartResponse {
    fn first_result(&self) -> Option<&ChartResult> {
        if self.chart.error.is_some() {
            return None;
        }
        self.chart.result.as_ref().and_then(|r| r.first())
    }
}

/// Metadata for `symbol`; an error payload or empty result means the symbol is unknown.
pub fn parse_ticker_info(symbol: &str, response: &ChartResponse) -> TickerInfo {
    match response.first_result() {
        Some(result) => TickerInfo {
            symbol: result.meta.symbol.clone().unwrap_or_else(|| symbol.to_string()),
            regular_market_price: result.meta.regular_market_price,
            currency: result.meta.currency.clone(),
            exchange: result.meta.exchange_name.clone(),
        },
        None => TickerInfo::unknown(symbol),
    }
}

/// Daily bars from a chart payload. Rows without a close are skipped.
pub fn parse_price_series(symbol: &str, response: &ChartResponse) -> Result<PriceSeries> {
    if let Some(err) = &response.chart.error {
        anyhow::bail!("Yahoo chart error for {} [{}]: {}", symbol, err.code, err.description);
    }
    let Some(result) = response.first_result() else {
        anyhow::bail!("Yahoo chart returned no result for {}", symbol);
    };

    let empty = QuoteColumns::default();
    let quote = result.indicators.quote.first().unwrap_or(&empty);
    let at = |col: &[Option<f64>], i: usize| col.get(i).copied().flatten();

    let bars = result
        .timestamp
        .iter()
        .enumerate()
        .filter_map(|(i, &timestamp)| {
            let close = at(&quote.close, i)?;
            Some(DailyBar {
                timestamp,
                open: at(&quote.open, i).unwrap_or(close),
                high: at(&quote.high, i).unwrap_or(close),
                low: at(&quote.low, i).unwrap_or(close),
                close,
                volume: at(&quote.volume, i).unwrap_or(0.0),
            })
        })
        .collect();

    Ok(PriceSeries::new(symbol, bars))
}
