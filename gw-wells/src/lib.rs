//! Well observations, trend statistics and the prediction API client.

pub mod config;
pub mod coordinate;
pub mod decimal_year;
pub mod error;
pub mod history;
pub mod observation;
pub mod prediction;
pub mod regression;
pub mod severity;
pub mod stats;
pub mod well;
