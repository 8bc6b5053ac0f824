use super::predictor::NextDayModel;
use crate::domain::errors::PredictionError;
use crate::domain::ml::{DEFAULT_TRAIN_RATIO, ReturnFeatures, as_rows, chronological_split};
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::linear::linear_regression::{LinearRegression, LinearRegressionParameters};
use tracing::debug;

type OlsModel = LinearRegression<f64, f64, DenseMatrix<f64>, Vec<f64>>;

/// Fewest training rows an OLS fit with an intercept accepts.
pub const MIN_TRAIN_ROWS: usize = 2;

/// Fitted `close = slope * return + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FittedLine {
    pub slope: f64,
    pub intercept: f64,
}

impl FittedLine {
    pub fn evaluate(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegressionForecast {
    pub last_price: f64,
    /// Raw (unrounded) model output
    pub predicted_price: f64,
    pub line: FittedLine,
    pub train_rows: usize,
    pub holdout_rows: usize,
    /// Mean absolute error on the held-out suffix, if it is non-empty
    pub holdout_mae: Option<f64>,
}

/// Ordinary least squares from the day's return to the day's close.
///
/// Fits on the chronological prefix (`train_ratio` of rows) and feeds the most
/// recent observed return back in as tomorrow's input. This reuses known data
/// rather than forecasting the next return, so the output is a point estimate
/// and not a genuine forecast.
#[derive(Debug, Clone)]
pub struct NextDayRegressor {
    train_ratio: f64,
}

impl Default for NextDayRegressor {
    fn default() -> Self {
        Self::new(DEFAULT_TRAIN_RATIO)
    }
}

impl NextDayRegressor {
    pub fn new(train_ratio: f64) -> Self {
        Self { train_ratio }
    }

    /// Fits on centred data, the way an intercept-fitting OLS does, so the
    /// intercept comes out as exactly `mean(y) - slope * mean(x)`.
    ///
    /// A constant feature carries no slope information; the line is then flat
    /// at the mean close.
    fn fit(x: &[f64], y: &[f64]) -> Result<FittedLine, PredictionError> {
        let x_mean = mean(x);
        let y_mean = mean(y);

        if x.iter().all(|&v| v == x[0]) {
            return Ok(FittedLine {
                slope: 0.0,
                intercept: y_mean,
            });
        }

        let x_centred: Vec<f64> = x.iter().map(|v| v - x_mean).collect();
        let y_centred: Vec<f64> = y.iter().map(|v| v - y_mean).collect();
        let model: OlsModel = LinearRegression::fit(
            &to_matrix(&x_centred)?,
            &y_centred,
            LinearRegressionParameters::default(),
        )
        .map_err(|e| PredictionError::Model {
            reason: format!("OLS fit failed: {}", e),
        })?;

        // Slope from the 0 -> 1 step on the centred model
        let at = model
            .predict(&to_matrix(&[0.0, 1.0])?)
            .map_err(|e| PredictionError::Model {
                reason: format!("Prediction failed: {}", e),
            })?;
        let slope = at[1] - at[0];
        let line = FittedLine {
            slope,
            intercept: y_mean - slope * x_mean,
        };
        if !line.slope.is_finite() || !line.intercept.is_finite() {
            return Err(PredictionError::Model {
                reason: "model produced a non-finite fit".to_string(),
            });
        }
        Ok(line)
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

impl NextDayModel for NextDayRegressor {
    type Output = RegressionForecast;

    fn fit_predict(&self, features: &ReturnFeatures) -> Result<RegressionForecast, PredictionError> {
        let split = chronological_split(&features.returns, &features.closes, self.train_ratio);
        if split.train_len() < MIN_TRAIN_ROWS {
            return Err(PredictionError::InsufficientHistory {
                rows: split.train_len(),
                required: MIN_TRAIN_ROWS,
            });
        }

        let line = Self::fit(&split.train_x, &split.train_y)?;

        let holdout_mae = if split.test_len() > 0 {
            let total: f64 = split
                .test_x
                .iter()
                .zip(&split.test_y)
                .map(|(&x, a)| (line.evaluate(x) - a).abs())
                .sum();
            Some(total / split.test_len() as f64)
        } else {
            None
        };

        let (last_return, last_price) = match (features.last_return(), features.closes.last()) {
            (Some(r), Some(&c)) => (r, c),
            _ => {
                return Err(PredictionError::InsufficientHistory {
                    rows: 0,
                    required: MIN_TRAIN_ROWS,
                });
            }
        };
        let predicted_price = line.evaluate(last_return);

        debug!(
            "OLS fit on {} rows: close = {:.4} * return + {:.4}, holdout MAE {:?}",
            split.train_len(),
            line.slope,
            line.intercept,
            holdout_mae
        );

        Ok(RegressionForecast {
            last_price,
            predicted_price,
            line,
            train_rows: split.train_len(),
            holdout_rows: split.test_len(),
            holdout_mae,
        })
    }

    fn name(&self) -> &str {
        "SmartCore Linear Regression"
    }
}

fn to_matrix(x: &[f64]) -> Result<DenseMatrix<f64>, PredictionError> {
    DenseMatrix::from_2d_vec(&as_rows(x)).map_err(|e| PredictionError::Model {
        reason: format!("Matrix creation failed: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::market::PriceSeries;

    fn features_for(closes: &[f64]) -> ReturnFeatures {
        ReturnFeatures::from_series(&PriceSeries::from_closes("TEST", 0, closes)).unwrap()
    }

    #[test]
    fn test_line_matches_closed_form_ols() {
        let features = features_for(&[100.0, 102.0, 101.0, 104.0, 104.0, 101.9, 103.0, 107.1, 103.9, 106.0]);
        let forecast = NextDayRegressor::default().fit_predict(&features).unwrap();

        // 9 rows -> 7 training rows, 2 held out
        assert_eq!(forecast.train_rows, 7);
        assert_eq!(forecast.holdout_rows, 2);
        assert!(forecast.holdout_mae.is_some());
        assert_eq!(forecast.last_price, 106.0);

        let x = &features.returns[..7];
        let y = &features.closes[..7];
        let x_mean = x.iter().sum::<f64>() / 7.0;
        let y_mean = y.iter().sum::<f64>() / 7.0;
        let cov: f64 = x.iter().zip(y).map(|(a, b)| (a - x_mean) * (b - y_mean)).sum();
        let var: f64 = x.iter().map(|a| (a - x_mean).powi(2)).sum();
        let slope = cov / var;
        let intercept = y_mean - slope * x_mean;

        assert!((forecast.line.slope - slope).abs() < 1e-6);
        assert!((forecast.line.intercept - intercept).abs() < 1e-6);
    }

    #[test]
    fn test_fitted_line_matches_prediction() {
        let features = features_for(&[10.0, 10.5, 10.2, 10.8, 11.0, 10.7, 11.3, 11.1, 11.6, 11.4]);
        let forecast = NextDayRegressor::default().fit_predict(&features).unwrap();

        let expected = forecast.line.evaluate(features.last_return().unwrap());
        assert!((forecast.predicted_price - expected).abs() < 1e-6);
    }

    #[test]
    fn test_constant_returns_predict_mean_close() {
        let features = features_for(&[10.0; 12]);
        let forecast = NextDayRegressor::default().fit_predict(&features).unwrap();

        assert_eq!(forecast.line.slope, 0.0);
        assert_eq!(forecast.line.intercept, 10.0);
        assert_eq!(forecast.predicted_price, forecast.last_price);
    }

    #[test]
    fn test_refit_is_deterministic() {
        let features = features_for(&[50.0, 51.0, 49.5, 52.0, 53.5, 52.5, 54.0, 55.0, 54.2, 56.0]);
        let regressor = NextDayRegressor::default();

        let first = regressor.fit_predict(&features).unwrap();
        let second = regressor.fit_predict(&features).unwrap();
        assert_eq!(first.predicted_price, second.predicted_price);
    }

    #[test]
    fn test_too_few_training_rows() {
        // 3 closes -> 2 returns -> floor(2 * 0.8) = 1 training row
        let features = features_for(&[10.0, 11.0, 12.0]);
        let err = NextDayRegressor::default().fit_predict(&features).unwrap_err();
        assert!(matches!(
            err,
            PredictionError::InsufficientHistory { rows: 1, required: 2 }
        ));
    }
}
