//! INI file configuration adapter.

use crate::domain::error::AnalyzerError;
use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AnalyzerError> {
        let path = path.as_ref();
        let mut config = Ini::new();
        config
            .load(path)
            .map_err(|reason| AnalyzerError::ConfigParse {
                file: path.display().to_string(),
                reason,
            })?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, AnalyzerError> {
        let mut config = Ini::new();
        config
            .read(content.to_string())
            .map_err(|reason| AnalyzerError::ConfigParse {
                file: "<string>".to_string(),
                reason,
            })?;
        Ok(Self { config })
    }

    /// An adapter with no sections; every lookup falls back to defaults.
    pub fn empty() -> Self {
        Self { config: Ini::new() }
    }

    fn invalid(section: &str, key: &str, reason: String) -> AnalyzerError {
        AnalyzerError::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason,
        }
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config
            .get(section, key)
            .filter(|v| !v.trim().is_empty())
    }

    fn get_int(&self, section: &str, key: &str) -> Result<Option<i64>, AnalyzerError> {
        if self.get_string(section, key).is_none() {
            return Ok(None);
        }
        self.config
            .getint(section, key)
            .map_err(|reason| Self::invalid(section, key, reason))
    }

    fn get_double(&self, section: &str, key: &str) -> Result<Option<f64>, AnalyzerError> {
        if self.get_string(section, key).is_none() {
            return Ok(None);
        }
        self.config
            .getfloat(section, key)
            .map_err(|reason| Self::invalid(section, key, reason))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn from_string_parses_config() {
        let content = r#"
[input]
close_column = Adj Close

[rsi]
period = 21
smoothing = wilder
overbought = 80.5
"#;
        let adapter = FileConfigAdapter::from_string(content).unwrap();
        assert_eq!(
            adapter.get_string("input", "close_column"),
            Some("Adj Close".to_string())
        );
        assert_eq!(adapter.get_int("rsi", "period").unwrap(), Some(21));
        assert_eq!(
            adapter.get_string("rsi", "smoothing"),
            Some("wilder".to_string())
        );
        assert_eq!(adapter.get_double("rsi", "overbought").unwrap(), Some(80.5));
    }

    #[test]
    fn missing_keys_are_none() {
        let adapter = FileConfigAdapter::from_string("[rsi]\nperiod = 14\n").unwrap();
        assert_eq!(adapter.get_string("rsi", "missing"), None);
        assert_eq!(adapter.get_string("missing_section", "key"), None);
        assert_eq!(adapter.get_int("rsi", "missing").unwrap(), None);
        assert_eq!(adapter.get_double("macd", "fast").unwrap(), None);
    }

    #[test]
    fn blank_value_is_missing() {
        let adapter = FileConfigAdapter::from_string("[rsi]\nperiod =\n").unwrap();
        assert_eq!(adapter.get_string("rsi", "period"), None);
        assert_eq!(adapter.get_int("rsi", "period").unwrap(), None);
    }

    #[test]
    fn negative_int_is_returned_as_is() {
        let adapter = FileConfigAdapter::from_string("[rsi]\nperiod = -5\n").unwrap();
        assert_eq!(adapter.get_int("rsi", "period").unwrap(), Some(-5));
    }

    #[test]
    fn non_numeric_int_is_error() {
        let adapter = FileConfigAdapter::from_string("[rsi]\nperiod = abc\n").unwrap();
        let err = adapter.get_int("rsi", "period").unwrap_err();
        assert!(matches!(
            err,
            AnalyzerError::ConfigInvalid { section, key, .. } if section == "rsi" && key == "period"
        ));
    }

    #[test]
    fn non_numeric_double_is_error() {
        let adapter =
            FileConfigAdapter::from_string("[bollinger]\nmultiplier = wide\n").unwrap();
        assert!(adapter.get_double("bollinger", "multiplier").is_err());
    }

    #[test]
    fn empty_adapter_has_nothing() {
        let adapter = FileConfigAdapter::empty();
        assert_eq!(adapter.get_string("rsi", "period"), None);
        assert_eq!(adapter.get_int("rsi", "period").unwrap(), None);
    }

    #[test]
    fn from_file_reads_config() {
        let file = create_temp_config("[volatility]\nperiod = 10\n");
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(adapter.get_int("volatility", "period").unwrap(), Some(10));
    }

    #[test]
    fn from_file_returns_error_for_missing_file() {
        let result = FileConfigAdapter::from_file("/nonexistent/path/stockta.ini");
        assert!(matches!(result, Err(AnalyzerError::ConfigParse { .. })));
    }
}
