//! Rolling volatility indicator.
//!
//! Sample standard deviation over n closing prices.
//! VOLATILITY(n)[i] = sqrt(sum((C[i-j] - SMA(n)[i])^2 for j in 0..n) / (n - 1))
//! Warmup: first (n-1) points are `None`. n must be at least 2.

use crate::domain::error::{require_period, AnalyzerError};
use crate::domain::indicator::{IndicatorSeries, IndicatorType, IndicatorValue};

pub const DEFAULT_VOLATILITY_PERIOD: usize = 30;

pub fn calculate_volatility(
    prices: &[f64],
    period: usize,
) -> Result<IndicatorSeries, AnalyzerError> {
    require_period("period", period)?;
    if period < 2 {
        return Err(AnalyzerError::invalid_parameter(
            "period",
            "sample standard deviation needs at least 2 points",
        ));
    }

    let values = (0..prices.len())
        .map(|i| {
            (i + 1 >= period).then(|| {
                IndicatorValue::Simple(sample_stddev(&prices[i + 1 - period..=i]))
            })
        })
        .collect();

    Ok(IndicatorSeries {
        indicator_type: IndicatorType::Volatility(period),
        values,
    })
}

/// Sample standard deviation of a window of at least two values.
pub(crate) fn sample_stddev(window: &[f64]) -> f64 {
    let n = window.len() as f64;
    let mean = window.iter().sum::<f64>() / n;
    let variance = window
        .iter()
        .map(|p| {
            let diff = p - mean;
            diff * diff
        })
        .sum::<f64>()
        / (n - 1.0);
    variance.sqrt()
}
