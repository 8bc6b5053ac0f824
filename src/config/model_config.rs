//! Model configuration parsing from environment variables.

use crate::domain::ml::DEFAULT_TRAIN_RATIO;
use anyhow::{Context, Result};
use std::env;

#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Share of rows used for fitting; the rest is held out
    pub train_ratio: f64,
    pub classifier_trees: u16,
    pub classifier_max_depth: u16,
    pub random_seed: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            train_ratio: DEFAULT_TRAIN_RATIO,
            classifier_trees: 100,
            classifier_max_depth: 8,
            random_seed: 42,
        }
    }
}

impl ModelConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let train_ratio = match env::var("TRAIN_RATIO") {
            Ok(v) => v
                .parse::<f64>()
                .with_context(|| format!("Invalid TRAIN_RATIO: {}", v))?,
            Err(_) => defaults.train_ratio,
        };
        if !(train_ratio > 0.0 && train_ratio < 1.0) {
            anyhow::bail!("TRAIN_RATIO must be between 0 and 1 (exclusive), got {}", train_ratio);
        }

        Ok(Self {
            train_ratio,
            classifier_trees: env::var("CLASSIFIER_TREES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.classifier_trees),
            classifier_max_depth: env::var("CLASSIFIER_MAX_DEPTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.classifier_max_depth),
            random_seed: env::var("RANDOM_SEED")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.random_seed),
        })
    }
}
