use thiserror::Error;

/// Message returned in the error mapping for unknown symbols.
pub const INVALID_SYMBOL_MESSAGE: &str = "unable to fetch data: invalid symbol";

/// Errors raised while fetching data, building features or fitting models
#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("Invalid symbol: {symbol}")]
    InvalidSymbol { symbol: String },

    #[error("Invalid period: {value}")]
    InvalidPeriod { value: String },

    #[error("Insufficient history: {rows} rows, need at least {required}")]
    InsufficientHistory { rows: usize, required: usize },

    #[error("Invalid market data for {symbol}: {reason}")]
    InvalidData { symbol: String, reason: String },

    #[error("Model failure: {reason}")]
    Model { reason: String },

    #[error("Market data provider failed: {0:#}")]
    Provider(#[from] anyhow::Error),
}
