//! Configuration module for trendcast.
//!
//! This module provides structured configuration loading from environment variables,
//! organized by concern: Data source, HTTP transport and Models.

mod data_source_config;
mod http_config;
mod model_config;

pub use data_source_config::{DataSource, DataSourceConfig};
pub use http_config::HttpConfig;
pub use model_config::ModelConfig;

use anyhow::{Context, Result};

/// Main application configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub data_source: DataSourceConfig,
    pub http: HttpConfig,
    pub model: ModelConfig,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Call `dotenvy::dotenv()` first if a `.env` file should be honored.
    pub fn from_env() -> Result<Self> {
        let data_source =
            DataSourceConfig::from_env().context("Failed to load data source config")?;
        let http = HttpConfig::from_env();
        let model = ModelConfig::from_env().context("Failed to load model config")?;

        Ok(Self {
            data_source,
            http,
            model,
        })
    }
}
