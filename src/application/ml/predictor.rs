use crate::domain::errors::PredictionError;
use crate::domain::ml::ReturnFeatures;

/// Interface for the next-day models.
///
/// Models are created, fitted and discarded within a single call; nothing is persisted.
pub trait NextDayModel: Send + Sync {
    type Output;

    /// Fit on `features` and produce the estimate for the day after the last row.
    fn fit_predict(&self, features: &ReturnFeatures) -> Result<Self::Output, PredictionError>;

    /// Get model name/type
    fn name(&self) -> &str;
}
