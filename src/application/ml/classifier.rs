use super::predictor::NextDayModel;
use crate::domain::errors::PredictionError;
use crate::domain::ml::{ReturnFeatures, as_rows, shuffled_split};
use crate::domain::prediction::Trend;
use smartcore::ensemble::random_forest_classifier::{
    RandomForestClassifier, RandomForestClassifierParameters,
};
use smartcore::linalg::basic::matrix::DenseMatrix;
use tracing::debug;

type Forest = RandomForestClassifier<f64, u32, DenseMatrix<f64>, Vec<u32>>;

pub const MIN_TRAIN_ROWS: usize = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierSettings {
    pub n_trees: u16,
    pub max_depth: u16,
    pub test_ratio: f64,
    pub seed: u64,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: 8,
            test_ratio: 0.2,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendClassification {
    pub last_price: f64,
    pub trend: Trend,
    /// Share of held-out rows classified correctly (0.0 when nothing is held out)
    pub test_accuracy: f64,
    pub train_rows: usize,
    pub test_rows: usize,
}

/// Random forest predicting whether tomorrow's close beats today's, from today's return.
#[derive(Debug, Clone, Default)]
pub struct TrendClassifier {
    settings: ClassifierSettings,
}

impl TrendClassifier {
    pub fn new(settings: ClassifierSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ClassifierSettings {
        &self.settings
    }

    fn params(&self) -> RandomForestClassifierParameters {
        RandomForestClassifierParameters::default()
            .with_n_trees(self.settings.n_trees.into())
            .with_max_depth(self.settings.max_depth)
            .with_seed(self.settings.seed)
    }

    /// Trains the forest, unless every training label is the same class.
    fn fit(&self, x: &[f64], y: &[u32]) -> Result<FittedClassifier, PredictionError> {
        match y.first() {
            Some(&first) if y.iter().all(|&label| label == first) => {
                debug!("All {} training labels are {}, skipping forest fit", y.len(), first);
                return Ok(FittedClassifier::SingleClass(first));
            }
            _ => {}
        }

        let train = to_matrix(x)?;
        let model = Forest::fit(&train, &y.to_vec(), self.params()).map_err(|e| {
            PredictionError::Model {
                reason: format!("Random forest fit failed: {}", e),
            }
        })?;
        Ok(FittedClassifier::Forest(Box::new(model)))
    }
}

enum FittedClassifier {
    Forest(Box<Forest>),
    SingleClass(u32),
}

impl FittedClassifier {
    fn predict(&self, x: &[f64]) -> Result<Vec<u32>, PredictionError> {
        match self {
            FittedClassifier::Forest(model) => {
                model
                    .predict(&to_matrix(x)?)
                    .map_err(|e| PredictionError::Model {
                        reason: format!("Classification failed: {}", e),
                    })
            }
            FittedClassifier::SingleClass(label) => Ok(vec![*label; x.len()]),
        }
    }
}

impl NextDayModel for TrendClassifier {
    type Output = TrendClassification;

    fn fit_predict(&self, features: &ReturnFeatures) -> Result<TrendClassification, PredictionError> {
        let labels = features.next_day_labels();
        let labelled = &features.returns[..labels.len()];

        let split = shuffled_split(labelled, &labels, self.settings.test_ratio, self.settings.seed);
        if split.train_len() < MIN_TRAIN_ROWS {
            return Err(PredictionError::InsufficientHistory {
                rows: split.train_len(),
                required: MIN_TRAIN_ROWS,
            });
        }

        let model = self.fit(&split.train_x, &split.train_y)?;

        let test_accuracy = if split.test_len() > 0 {
            let predicted = model.predict(&split.test_x)?;
            let correct = predicted
                .iter()
                .zip(&split.test_y)
                .filter(|(p, a)| p == a)
                .count();
            correct as f64 / split.test_len() as f64
        } else {
            0.0
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
        let label = model.predict(&[last_return])?
            .first()
            .copied()
            .ok_or_else(|| PredictionError::Model {
                reason: "No prediction returned".to_string(),
            })?;

        debug!(
            "Random forest ({} trees) trained on {} rows, test accuracy {:.2} over {} rows",
            self.settings.n_trees,
            split.train_len(),
            test_accuracy,
            split.test_len()
        );

        Ok(TrendClassification {
            last_price,
            trend: Trend::from_label(label),
            test_accuracy,
            train_rows: split.train_len(),
            test_rows: split.test_len(),
        })
    }

    fn name(&self) -> &str {
        "SmartCore Random Forest"
    }
}

fn to_matrix(x: &[f64]) -> Result<DenseMatrix<f64>, PredictionError> {
    DenseMatrix::from_2d_vec(&as_rows(x)).map_err(|e| PredictionError::Model {
        reason: format!("Matrix creation failed: {}", e),
    })
}
