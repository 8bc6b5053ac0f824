use crate::domain::errors::PredictionError;
use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lookback window understood by the market data provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Period {
    OneDay,
    FiveDays,
    OneMonth,
    ThreeMonths,
    SixMonths,
    OneYear,
    TwoYears,
    FiveYears,
    TenYears,
    YearToDate,
    Max,
}

impl Period {
    /// Provider range string (Yahoo `range=` parameter)
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::OneDay => "1d",
            Period::FiveDays => "5d",
            Period::OneMonth => "1mo",
            Period::ThreeMonths => "3mo",
            Period::SixMonths => "6mo",
            Period::OneYear => "1y",
            Period::TwoYears => "2y",
            Period::FiveYears => "5y",
            Period::TenYears => "10y",
            Period::YearToDate => "ytd",
            Period::Max => "max",
        }
    }

    pub fn all() -> Vec<Period> {
        vec![
            Period::OneDay,
            Period::FiveDays,
            Period::OneMonth,
            Period::ThreeMonths,
            Period::SixMonths,
            Period::OneYear,
            Period::TwoYears,
            Period::FiveYears,
            Period::TenYears,
            Period::YearToDate,
            Period::Max,
        ]
    }

    /// First calendar date (inclusive) covered by this window when it ends on `last`.
    ///
    /// Returns `None` for [`Period::Max`], which has no lower bound.
    pub fn window_start(&self, last: NaiveDate) -> Option<NaiveDate> {
        match self {
            // "1d" keeps only the last session
            Period::OneDay => Some(last),
            Period::FiveDays => last.checked_sub_days(Days::new(4)),
            Period::OneMonth => last.checked_sub_months(Months::new(1)),
            Period::ThreeMonths => last.checked_sub_months(Months::new(3)),
            Period::SixMonths => last.checked_sub_months(Months::new(6)),
            Period::OneYear => last.checked_sub_months(Months::new(12)),
            Period::TwoYears => last.checked_sub_months(Months::new(24)),
            Period::FiveYears => last.checked_sub_months(Months::new(60)),
            Period::TenYears => last.checked_sub_months(Months::new(120)),
            Period::YearToDate => NaiveDate::from_ymd_opt(last.year(), 1, 1),
            Period::Max => None,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Period {
    type Err = PredictionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Period::all()
            .into_iter()
            .find(|p| p.as_str() == normalized)
            .ok_or_else(|| PredictionError::InvalidPeriod {
                value: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_round_trips_canonical_strings() {
        for period in Period::all() {
            let parsed: Period = period.as_str().parse().unwrap();
            assert_eq!(parsed, period);
            assert_eq!(parsed.to_string(), period.as_str());
        }
    }

    #[test]
    fn test_period_parse_is_case_insensitive() {
        assert_eq!("1MO".parse::<Period>().unwrap(), Period::OneMonth);
        assert_eq!(" ytd ".parse::<Period>().unwrap(), Period::YearToDate);
    }

    #[test]
    fn test_period_rejects_unknown_window() {
        let err = "2w".parse::<Period>().unwrap_err();
        assert!(matches!(err, PredictionError::InvalidPeriod { ref value } if value == "2w"));
    }

    #[test]
    fn test_window_start() {
        let last = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
        assert_eq!(
            Period::OneMonth.window_start(last),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
        assert_eq!(
            Period::FiveDays.window_start(last),
            NaiveDate::from_ymd_opt(2024, 3, 27)
        );
        assert_eq!(
            Period::YearToDate.window_start(last),
            NaiveDate::from_ymd_opt(2024, 1, 1)
        );
        assert_eq!(Period::Max.window_start(last), None);
    }
}
