use crate::domain::errors::PredictionError;
use crate::domain::market::PriceSeries;

/// Minimum number of bars needed before any return is defined.
pub const MIN_SERIES_LEN: usize = 2;

/// Day-over-day percentage change: `close[t] / close[t-1] - 1` for every `t >= 1`.
///
/// The first bar has no return and is dropped, so the output has `len - 1` entries.
/// Every close must be a positive finite price.
pub fn pct_returns(symbol: &str, closes: &[f64]) -> Result<Vec<f64>, PredictionError> {
    if closes.len() < MIN_SERIES_LEN {
        return Err(PredictionError::InsufficientHistory {
            rows: closes.len(),
            required: MIN_SERIES_LEN,
        });
    }

    closes
        .windows(2)
        .map(|w| {
            let (prev, curr) = (w[0], w[1]);
            if !(prev > 0.0 && prev.is_finite() && curr > 0.0 && curr.is_finite()) {
                return Err(PredictionError::InvalidData {
                    symbol: symbol.to_string(),
                    reason: format!("cannot compute return from {} to {}", prev, curr),
                });
            }
            Ok(curr / prev - 1.0)
        })
        .collect()
}

/// Row-aligned feature/label pairs derived from a price series.
///
/// `returns[i]` and `closes[i]` both describe bar `i + 1` of the source series.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnFeatures {
    pub returns: Vec<f64>,
    pub closes: Vec<f64>,
}

impl ReturnFeatures {
    pub fn from_series(series: &PriceSeries) -> Result<Self, PredictionError> {
        let all_closes = series.closes();
        let returns = pct_returns(series.symbol(), &all_closes)?;
        let closes = all_closes[1..].to_vec();
        debug_assert_eq!(returns.len(), closes.len());
        Ok(Self { returns, closes })
    }

    pub fn len(&self) -> usize {
        self.returns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.returns.is_empty()
    }

    /// Most recent observed return
    pub fn last_return(&self) -> Option<f64> {
        self.returns.last().copied()
    }

    /// Next-day direction labels: `1` when the following close is strictly higher, else `0`.
    ///
    /// The last row has no following close, so the result has `len() - 1` entries
    /// and lines up with `returns[..len() - 1]`.
    pub fn next_day_labels(&self) -> Vec<u32> {
        self.closes
            .windows(2)
            .map(|w| u32::from(w[1] > w[0]))
            .collect()
    }
}

/// Single-column feature matrix rows
pub fn as_rows(values: &[f64]) -> Vec<Vec<f64>> {
    values.iter().map(|&v| vec![v]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_returns_drop_first_row() {
        let series = PriceSeries::from_closes("TEST", 0, &[100.0, 110.0, 99.0, 99.0]);
        let features = ReturnFeatures::from_series(&series).unwrap();

        assert_eq!(features.len(), series.len() - 1);
        assert_eq!(features.closes, vec![110.0, 99.0, 99.0]);
        assert!(approx(features.returns[0], 0.1));
        assert!(approx(features.returns[1], -0.1));
        assert!(approx(features.returns[2], 0.0));
    }

    #[test]
    fn test_single_bar_is_insufficient() {
        let series = PriceSeries::from_closes("TEST", 0, &[100.0]);
        let err = ReturnFeatures::from_series(&series).unwrap_err();
        assert!(matches!(
            err,
            PredictionError::InsufficientHistory {
                rows: 1,
                required: 2
            }
        ));
    }

    #[test]
    fn test_empty_series_is_insufficient() {
        let series = PriceSeries::from_closes("TEST", 0, &[]);
        assert!(ReturnFeatures::from_series(&series).is_err());
    }

    #[test]
    fn test_zero_close_is_invalid_data() {
        let err = pct_returns("TEST", &[10.0, 0.0, 5.0]).unwrap_err();
        assert!(matches!(err, PredictionError::InvalidData { .. }));
    }

    #[test]
    fn test_zero_final_close_is_invalid_data() {
        let series = PriceSeries::from_closes("TEST", 0, &[10.0, 11.0, 10.5, 11.2, 10.8, 11.5, 0.0]);
        let err = ReturnFeatures::from_series(&series).unwrap_err();
        assert!(matches!(err, PredictionError::InvalidData { ref symbol, .. } if symbol == "TEST"));
    }

    #[test]
    fn test_negative_close_is_invalid_data() {
        assert!(pct_returns("TEST", &[10.0, -1.0]).is_err());
    }

    #[test]
    fn test_next_day_labels_treat_ties_as_down() {
        let series = PriceSeries::from_closes("TEST", 0, &[1.0, 2.0, 3.0, 3.0, 2.0]);
        let features = ReturnFeatures::from_series(&series).unwrap();
        // closes: [2, 3, 3, 2]
        assert_eq!(features.next_day_labels(), vec![1, 0, 0]);
    }

    #[test]
    fn test_as_rows() {
        assert_eq!(as_rows(&[0.1, 0.2]), vec![vec![0.1], vec![0.2]]);
    }
}
