//! Core domain types and logic.

pub mod analysis;
pub mod config_validation;
pub mod error;
pub mod indicator;
pub mod price_series;
pub mod signal;
