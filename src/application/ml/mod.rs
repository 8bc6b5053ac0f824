pub mod classifier;
pub mod predictor;
pub mod regression;

pub use classifier::{ClassifierSettings, TrendClassification, TrendClassifier};
pub use predictor::NextDayModel;
pub use regression::{FittedLine, NextDayRegressor, RegressionForecast};
