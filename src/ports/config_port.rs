//! Configuration access port trait.

use crate::domain::error::AnalyzerError;

/// Sectioned key/value configuration.
///
/// Missing keys are `Ok(None)`; present but malformed values are errors.
pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    fn get_int(&self, section: &str, key: &str) -> Result<Option<i64>, AnalyzerError>;
    fn get_double(&self, section: &str, key: &str) -> Result<Option<f64>, AnalyzerError>;
}
