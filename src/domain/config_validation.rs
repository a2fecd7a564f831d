//! Configuration validation.
//!
//! Validates all indicator parameters before any computation runs.

use crate::domain::analysis::AnalysisConfig;
use crate::domain::error::AnalyzerError;

pub fn validate_analysis_config(config: &AnalysisConfig) -> Result<(), AnalyzerError> {
    validate_periods(config)?;
    validate_thresholds(config)?;
    validate_moving_averages(config)?;
    validate_macd(config)?;
    validate_bollinger(config)?;
    validate_outlier_threshold(config)?;
    Ok(())
}

fn invalid(section: &str, key: &str, reason: impl Into<String>) -> AnalyzerError {
    AnalyzerError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.into(),
    }
}

fn validate_periods(config: &AnalysisConfig) -> Result<(), AnalyzerError> {
    let periods = [
        ("rsi", "period", config.rsi_period),
        ("moving_average", "short", config.ma_short),
        ("moving_average", "long", config.ma_long),
        ("macd", "fast", config.macd_fast),
        ("macd", "slow", config.macd_slow),
        ("macd", "signal", config.macd_signal),
    ];
    for (section, key, value) in periods {
        if value == 0 {
            return Err(invalid(section, key, format!("{key} must be at least 1")));
        }
    }
    let sample_periods = [
        ("bollinger", "period", config.bollinger_period),
        ("volatility", "period", config.volatility_period),
    ];
    for (section, key, value) in sample_periods {
        if value < 2 {
            return Err(invalid(section, key, "period must be at least 2"));
        }
    }
    Ok(())
}

fn validate_thresholds(config: &AnalysisConfig) -> Result<(), AnalyzerError> {
    let t = &config.rsi_thresholds;
    if !(0.0..=100.0).contains(&t.overbought) {
        return Err(invalid("rsi", "overbought", "overbought must be between 0 and 100"));
    }
    if !(0.0..=100.0).contains(&t.oversold) {
        return Err(invalid("rsi", "oversold", "oversold must be between 0 and 100"));
    }
    if t.oversold >= t.overbought {
        return Err(invalid(
            "rsi",
            "oversold",
            "oversold must be below overbought",
        ));
    }
    Ok(())
}

fn validate_moving_averages(config: &AnalysisConfig) -> Result<(), AnalyzerError> {
    if config.ma_short >= config.ma_long {
        return Err(invalid(
            "moving_average",
            "short",
            "short must be less than long",
        ));
    }
    Ok(())
}

fn validate_macd(config: &AnalysisConfig) -> Result<(), AnalyzerError> {
    if config.macd_fast >= config.macd_slow {
        return Err(invalid("macd", "fast", "fast must be less than slow"));
    }
    Ok(())
}

fn validate_bollinger(config: &AnalysisConfig) -> Result<(), AnalyzerError> {
    let m = config.bollinger_multiplier;
    if !m.is_finite() || m < 0.0 {
        return Err(invalid(
            "bollinger",
            "multiplier",
            "multiplier must be non-negative",
        ));
    }
    Ok(())
}

fn validate_outlier_threshold(config: &AnalysisConfig) -> Result<(), AnalyzerError> {
    let t = config.outlier_threshold;
    if !t.is_finite() || t <= 0.0 {
        return Err(invalid(
            "input",
            "outlier_threshold",
            "outlier_threshold must be positive",
        ));
    }
    Ok(())
}
