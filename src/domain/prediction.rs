use crate::domain::errors::INVALID_SYMBOL_MESSAGE;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed disclaimer attached to every report.
pub const EDUCATIONAL_NOTE: &str = "This is for educational purposes";

/// Round to two decimals for reporting.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

impl Trend {
    /// `Up` only when `predicted` is strictly above `last`; equality is `Down`.
    pub fn from_prices(predicted: f64, last: f64) -> Self {
        if predicted > last { Trend::Up } else { Trend::Down }
    }

    pub fn from_label(label: u32) -> Self {
        if label == 1 { Trend::Up } else { Trend::Down }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Up => write!(f, "up"),
            Trend::Down => write!(f, "down"),
        }
    }
}

/// Next-day price estimate for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionReport {
    pub symbol: String,
    pub period: String,
    pub last_price: f64,
    pub predicted_price: f64,
    pub change: f64,
    #[serde(rename = "percentage change")]
    pub percentage_change: f64,
    pub trend: Trend,
    pub note: String,
}

impl PredictionReport {
    /// Builds the report from unrounded prices. Derived fields use the raw values
    /// and are rounded last.
    pub fn new(symbol: &str, period: &str, last_price: f64, predicted_price: f64) -> Self {
        let diff = predicted_price - last_price;
        Self {
            symbol: symbol.to_string(),
            period: period.to_string(),
            last_price: round2(last_price),
            predicted_price: round2(predicted_price),
            change: round2(diff),
            percentage_change: round2(diff / last_price * 100.0),
            trend: Trend::from_prices(predicted_price, last_price),
            note: EDUCATIONAL_NOTE.to_string(),
        }
    }
}

/// Error mapping returned instead of a report, e.g. `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub error: String,
}

impl ErrorReport {
    pub fn invalid_symbol() -> Self {
        Self {
            error: INVALID_SYMBOL_MESSAGE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PredictionResponse {
    Report(PredictionReport),
    Error(ErrorReport),
}

impl PredictionResponse {
    pub fn report(&self) -> Option<&PredictionReport> {
        match self {
            PredictionResponse::Report(r) => Some(r),
            PredictionResponse::Error(_) => None,
        }
    }
}

/// Next-day direction from the random-forest classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationReport {
    pub symbol: String,
    pub period: String,
    pub last_price: f64,
    pub trend: Trend,
    pub test_accuracy: f64,
    pub train_rows: usize,
    pub test_rows: usize,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClassificationResponse {
    Report(ClassificationReport),
    Error(ErrorReport),
}

impl ClassificationResponse {
    pub fn report(&self) -> Option<&ClassificationReport> {
        match self {
            ClassificationResponse::Report(r) => Some(r),
            ClassificationResponse::Error(_) => None,
        }
    }
}
