use crate::application::ml::{
    ClassifierSettings, NextDayModel, NextDayRegressor, TrendClassifier,
};
use crate::config::ModelConfig;
use crate::domain::errors::PredictionError;
use crate::domain::market::{Period, PriceSeries};
use crate::domain::ml::ReturnFeatures;
use crate::domain::ports::MarketDataProvider;
use crate::domain::prediction::{
    ClassificationReport, ClassificationResponse, EDUCATIONAL_NOTE, ErrorReport,
    PredictionReport, PredictionResponse, round2,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Fetches history for a symbol and runs the next-day models on it.
///
/// Each call is independent: one metadata request, one history request,
/// then an in-process fit that is discarded once the response is built.
pub struct PredictionService {
    provider: Arc<dyn MarketDataProvider>,
    regressor: NextDayRegressor,
    classifier: TrendClassifier,
}

impl PredictionService {
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self::with_models(provider, NextDayRegressor::default(), TrendClassifier::default())
    }

    pub fn with_models(
        provider: Arc<dyn MarketDataProvider>,
        regressor: NextDayRegressor,
        classifier: TrendClassifier,
    ) -> Self {
        Self {
            provider,
            regressor,
            classifier,
        }
    }

    pub fn from_config(provider: Arc<dyn MarketDataProvider>, config: &ModelConfig) -> Self {
        let classifier = TrendClassifier::new(ClassifierSettings {
            n_trees: config.classifier_trees,
            max_depth: config.classifier_max_depth,
            test_ratio: 1.0 - config.train_ratio,
            seed: config.random_seed,
        });
        Self::with_models(provider, NextDayRegressor::new(config.train_ratio), classifier)
    }

    /// Returns `Ok(None)` when the provider has no market price for `symbol`.
    async fn load_history(
        &self,
        symbol: &str,
        period: &str,
    ) -> Result<Option<PriceSeries>, PredictionError> {
        let info = self.provider.fetch_info(symbol).await?;
        if !info.is_valid() {
            warn!(
                "PredictionService: {} has no market price on {}, treating as invalid symbol",
                symbol,
                self.provider.name()
            );
            return Ok(None);
        }

        let period: Period = period.parse()?;
        let series = self.provider.fetch_history(symbol, period).await?;
        debug!(
            "PredictionService: Loaded {} daily bars for {} ({})",
            series.len(),
            symbol,
            period
        );
        Ok(Some(series))
    }

    /// Estimates the next close with OLS over the day's return.
    ///
    /// An unknown symbol yields the `{"error": ...}` mapping; every other failure is an `Err`.
    pub async fn next_day_prediction(
        &self,
        symbol: &str,
        period: &str,
    ) -> Result<PredictionResponse, PredictionError> {
        let Some(series) = self.load_history(symbol, period).await? else {
            return Ok(PredictionResponse::Error(ErrorReport::invalid_symbol()));
        };

        let features = ReturnFeatures::from_series(&series)?;
        let forecast = self.regressor.fit_predict(&features)?;

        let report = PredictionReport::new(
            symbol,
            period,
            forecast.last_price,
            forecast.predicted_price,
        );
        info!(
            "{} [{}]: last {:.2}, predicted {:.2} ({}) via {}",
            symbol,
            period,
            report.last_price,
            report.predicted_price,
            report.trend,
            self.regressor.name()
        );
        Ok(PredictionResponse::Report(report))
    }

    /// Classifies tomorrow's direction with a random forest over the day's return.
    pub async fn classify_trend(
        &self,
        symbol: &str,
        period: &str,
    ) -> Result<ClassificationResponse, PredictionError> {
        let Some(series) = self.load_history(symbol, period).await? else {
            return Ok(ClassificationResponse::Error(ErrorReport::invalid_symbol()));
        };

        let features = ReturnFeatures::from_series(&series)?;
        let outcome = self.classifier.fit_predict(&features)?;

        let report = ClassificationReport {
            symbol: symbol.to_string(),
            period: period.to_string(),
            last_price: round2(outcome.last_price),
            trend: outcome.trend,
            test_accuracy: round2(outcome.test_accuracy),
            train_rows: outcome.train_rows,
            test_rows: outcome.test_rows,
            note: EDUCATIONAL_NOTE.to_string(),
        };
        info!(
            "{} [{}]: classified {} (test accuracy {:.2}) via {}",
            symbol,
            period,
            report.trend,
            report.test_accuracy,
            self.classifier.name()
        );
        Ok(ClassificationResponse::Report(report))
    }
}
