// Price series, periods and ticker metadata
pub mod market;

// Feature construction and dataset splitting
pub mod ml;

// Port interfaces
pub mod ports;

// Result mappings returned to callers
pub mod prediction;

// Domain-specific error types
pub mod errors;
