// Next-day models
pub mod ml;

// Fetch, fit and respond
pub mod prediction_service;
