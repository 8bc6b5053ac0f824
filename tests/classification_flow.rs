use std::sync::Arc;
use trendcast::application::ml::{ClassifierSettings, NextDayRegressor, TrendClassifier};
use trendcast::application::prediction_service::PredictionService;
use trendcast::config::ModelConfig;
use trendcast::domain::errors::PredictionError;
use trendcast::domain::prediction::{ClassificationResponse, Trend};
use trendcast::infrastructure::MockMarketDataProvider;

fn zigzag(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| if i % 2 == 0 { 50.0 } else { 53.0 } + i as f64 * 0.05)
        .collect()
}

async fn provider_with(symbol: &str, closes: &[f64]) -> MockMarketDataProvider {
    let provider = MockMarketDataProvider::new();
    provider.insert_closes(symbol, closes).await;
    provider
}

#[tokio::test]
async fn test_classify_invalid_symbol() -> anyhow::Result<()> {
    let provider = provider_with("AAPL", &zigzag(30)).await;
    let service = PredictionService::new(Arc::new(provider.clone()));

    let response = service.classify_trend("NOPE", "1y").await?;

    assert!(matches!(response, ClassificationResponse::Error(_)));
    assert_eq!(provider.history_calls(), 0);
    Ok(())
}

#[tokio::test]
async fn test_classify_alternating_series() -> anyhow::Result<()> {
    let provider = provider_with("ZIG", &zigzag(41)).await;
    let service = PredictionService::new(Arc::new(provider));

    let response = service.classify_trend("ZIG", "1y").await?;
    let report = response.report().expect("expected a report");

    // Last close (i = 40) is a low after a down move, so the next day should be up.
    assert_eq!(report.trend, Trend::Up);
    assert_eq!(report.test_accuracy, 1.0);
    // 41 closes -> 40 returns -> 39 labelled rows -> 8 test / 31 train
    assert_eq!(report.test_rows, 8);
    assert_eq!(report.train_rows, 31);

    let json = serde_json::to_value(&response)?;
    assert_eq!(json["trend"], "up");
    Ok(())
}

#[tokio::test]
async fn test_classify_monotonic_series() -> anyhow::Result<()> {
    let closes: Vec<f64> = (0..30).map(|i| 100.0 + i as f64 * 0.5).collect();
    let provider = provider_with("UP", &closes).await;
    let service = PredictionService::new(Arc::new(provider));

    let response = service.classify_trend("UP", "1y").await?;
    let report = response.report().expect("expected a report");

    // Every training label is "up"
    assert_eq!(report.trend, Trend::Up);
    assert_eq!(report.test_accuracy, 1.0);
    assert_eq!(report.test_rows + report.train_rows, 28);
    Ok(())
}

#[tokio::test]
async fn test_classification_uses_model_config() -> anyhow::Result<()> {
    let provider = provider_with("ZIG", &zigzag(41)).await;
    let config = ModelConfig {
        train_ratio: 0.5,
        classifier_trees: 10,
        classifier_max_depth: 4,
        random_seed: 7,
    };
    let service = PredictionService::from_config(Arc::new(provider), &config);

    let response = service.classify_trend("ZIG", "1y").await?;
    let report = response.report().expect("expected a report");

    // 39 labelled rows, ceil(39 * 0.5) = 20 held out
    assert_eq!(report.test_rows, 20);
    assert_eq!(report.train_rows, 19);
    Ok(())
}

#[tokio::test]
async fn test_classification_is_seeded() -> anyhow::Result<()> {
    let closes = [
        30.0, 30.6, 30.2, 30.9, 31.4, 31.1, 30.7, 31.5, 32.0, 31.6, 32.3, 32.1, 32.8, 33.0, 32.4,
        33.1, 33.7, 33.2, 33.9, 34.4,
    ];
    let provider = Arc::new(provider_with("SEED", &closes).await);
    let classifier = TrendClassifier::new(ClassifierSettings {
        n_trees: 15,
        seed: 99,
        ..Default::default()
    });
    let service =
        PredictionService::with_models(provider, NextDayRegressor::default(), classifier);

    let first = service.classify_trend("SEED", "6mo").await?;
    let second = service.classify_trend("SEED", "6mo").await?;
    assert_eq!(first, second);
    Ok(())
}

#[tokio::test]
async fn test_classify_short_history() {
    let provider = provider_with("TINY", &[1.0, 1.1, 1.05]).await;
    let service = PredictionService::new(Arc::new(provider));

    let result = service.classify_trend("TINY", "5d").await;
    assert!(matches!(
        result,
        Err(PredictionError::InsufficientHistory { .. })
    ));
}
