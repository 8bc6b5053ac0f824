//! Market data source configuration parsing from environment variables.

use anyhow::Result;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Where daily history comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Yahoo,
    Csv,
}

impl FromStr for DataSource {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "yahoo" => Ok(DataSource::Yahoo),
            "csv" => Ok(DataSource::Csv),
            _ => anyhow::bail!("Invalid DATA_SOURCE: {}. Must be 'yahoo' or 'csv'", s),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DataSourceConfig {
    pub source: DataSource,
    pub yahoo_base_url: String,
    pub csv_data_dir: PathBuf,
}

impl Default for DataSourceConfig {
    fn default() -> Self {
        Self {
            source: DataSource::Yahoo,
            yahoo_base_url: "https://query1.finance.yahoo.com".to_string(),
            csv_data_dir: PathBuf::from("data/prices"),
        }
    }
}

impl DataSourceConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let source = match env::var("DATA_SOURCE") {
            Ok(v) => DataSource::from_str(&v)?,
            Err(_) => defaults.source,
        };

        Ok(Self {
            source,
            yahoo_base_url: env::var("YAHOO_BASE_URL").unwrap_or(defaults.yahoo_base_url),
            csv_data_dir: env::var("CSV_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.csv_data_dir),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_source_parse() {
        assert_eq!("Yahoo".parse::<DataSource>().unwrap(), DataSource::Yahoo);
        assert_eq!("csv".parse::<DataSource>().unwrap(), DataSource::Csv);
        assert!("bloomberg".parse::<DataSource>().is_err());
    }
}
