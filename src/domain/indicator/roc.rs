//! ROC (Rate of Change) indicator implementation.
//!
//! ROC(n)[i] = ((C[i] - C[i-n]) / C[i-n]) * 100
//! If C[i-n] == 0: `None`
//! Warmup: first n points are `None`. Percentage change is ROC(1).

use crate::domain::error::{require_period, AnalyzerError};
use crate::domain::indicator::{IndicatorSeries, IndicatorType, IndicatorValue};

pub fn calculate_roc(prices: &[f64], period: usize) -> Result<IndicatorSeries, AnalyzerError> {
    require_period("period", period)?;

    let values = (0..prices.len())
        .map(|i| {
            if i < period {
                return None;
            }
            let prev = prices[i - period];
            (prev != 0.0).then(|| IndicatorValue::Simple((prices[i] - prev) / prev * 100.0))
        })
        .collect();

    Ok(IndicatorSeries {
        indicator_type: IndicatorType::Roc(period),
        values,
    })
}

/// Bar-to-bar percentage change, ROC(1).
pub fn calculate_pct_change(prices: &[f64]) -> Result<IndicatorSeries, AnalyzerError> {
    calculate_roc(prices, 1)
}
