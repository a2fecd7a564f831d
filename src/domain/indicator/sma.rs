//! Simple Moving Average indicator.
//!
//! SMA(n)[i] = mean(C[i-n+1..=i])
//! Warmup: first (n-1) points are `None`.

use crate::domain::error::{require_period, AnalyzerError};
use crate::domain::indicator::{IndicatorSeries, IndicatorType, IndicatorValue};

pub fn calculate_sma(prices: &[f64], period: usize) -> Result<IndicatorSeries, AnalyzerError> {
    require_period("period", period)?;

    let values = (0..prices.len())
        .map(|i| {
            (i + 1 >= period).then(|| {
                let window = &prices[i + 1 - period..=i];
                IndicatorValue::Simple(window.iter().sum::<f64>() / period as f64)
            })
        })
        .collect();

    Ok(IndicatorSeries {
        indicator_type: IndicatorType::Sma(period),
        values,
    })
}
