use super::common::{ChartResponse, parse_price_series, parse_ticker_info};
use crate::config::HttpConfig;
use crate::domain::market::{Period, PriceSeries, TickerInfo};
use crate::domain::ports::MarketDataProvider;
use crate::infrastructure::core::http_client_factory::{
    HttpClientFactory, build_url_with_query, encode,
};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest_middleware::ClientWithMiddleware;
use tracing::{debug, info, warn};

/// Yahoo Finance chart API (`/v8/finance/chart/{symbol}`).
pub struct YahooMarketDataProvider {
    client: ClientWithMiddleware,
    base_url: String,
}

impl YahooMarketDataProvider {
    pub fn new(base_url: impl Into<String>, http: &HttpConfig) -> Self {
        Self::with_client(base_url, HttpClientFactory::create_client(http))
    }

    pub fn with_client(base_url: impl Into<String>, client: ClientWithMiddleware) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn chart_url(&self, symbol: &str, range: &str) -> String {
        build_url_with_query(
            &format!("{}/v8/finance/chart/{}", self.base_url, encode(symbol)),
            &[("range", range), ("interval", "1d")],
        )
    }

    /// Fetches a chart payload. `Ok(None)` means Yahoo answered 404 (unknown symbol).
    async fn fetch_chart(&self, symbol: &str, range: &str) -> Result<Option<ChartResponse>> {
        let url = self.chart_url(symbol, range);
        debug!("YahooMarketDataProvider: GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch Yahoo chart for {}", symbol))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Yahoo chart API returned status {} for {}: {}", status, symbol, body);
        }

        let chart: ChartResponse = response
            .json()
            .await
            .with_context(|| format!("Failed to parse Yahoo chart for {}", symbol))?;
        Ok(Some(chart))
    }
}

#[async_trait]
impl MarketDataProvider for YahooMarketDataProvider {
    async fn fetch_info(&self, symbol: &str) -> Result<TickerInfo> {
        match self.fetch_chart(symbol, Period::OneDay.as_str()).await? {
            Some(chart) => Ok(parse_ticker_info(symbol, &chart)),
            None => {
                warn!("YahooMarketDataProvider: {} not found", symbol);
                Ok(TickerInfo::unknown(symbol))
            }
        }
    }

    async fn fetch_history(&self, symbol: &str, period: Period) -> Result<PriceSeries> {
        let chart = self
            .fetch_chart(symbol, period.as_str())
            .await?
            .with_context(|| format!("Yahoo has no history for {}", symbol))?;

        let series = parse_price_series(symbol, &chart)?;
        info!(
            "YahooMarketDataProvider: Fetched {} daily bars for {} ({})",
            series.len(),
            symbol,
            period
        );
        Ok(series)
    }

    fn name(&self) -> &str {
        "Yahoo Finance"
    }
}
