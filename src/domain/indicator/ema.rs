//! Exponential Moving Average indicator.
//!
//! k = 2/(n+1), seed with first SMA, then EMA[i] = C[i]*k + EMA[i-1]*(1-k).
//! Warmup: first (n-1) points are `None`.
//! Unlike an adjusted exponential average there is no value before the seed.

use crate::domain::error::{require_period, AnalyzerError};
use crate::domain::indicator::{IndicatorSeries, IndicatorType, IndicatorValue};

pub fn calculate_ema(prices: &[f64], period: usize) -> Result<IndicatorSeries, AnalyzerError> {
    require_period("period", period)?;

    let values = ema_values(prices, period)
        .into_iter()
        .map(|v| v.map(IndicatorValue::Simple))
        .collect();

    Ok(IndicatorSeries {
        indicator_type: IndicatorType::Ema(period),
        values,
    })
}

/// Raw EMA over `prices`; `period` must be non-zero.
pub(crate) fn ema_values(prices: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut values = Vec::with_capacity(prices.len());
    let k = 2.0 / (period as f64 + 1.0);
    let mut ema = 0.0;
    let mut sum = 0.0;

    for (i, &price) in prices.iter().enumerate() {
        if i < period - 1 {
            sum += price;
            values.push(None);
        } else if i == period - 1 {
            sum += price;
            ema = sum / period as f64;
            values.push(Some(ema));
        } else {
            ema = price * k + ema * (1.0 - k);
            values.push(Some(ema));
        }
    }

    values
}
