//! Bollinger Bands indicator.
//!
//! Bollinger Bands consist of:
//! - Middle: Simple Moving Average (SMA) over n periods
//! - Upper: Middle + (multiplier × StdDev)
//! - Lower: Middle - (multiplier × StdDev)
//!
//! Where StdDev is the sample standard deviation (divides by N-1), so the
//! period must be at least 2.
//!
//! Default parameters: period=20, multiplier=2.0
//! Warmup: first (period-1) points are `None`.

use crate::domain::error::{require_period, AnalyzerError};
use crate::domain::indicator::stddev::sample_stddev;
use crate::domain::indicator::{IndicatorSeries, IndicatorType, IndicatorValue};

pub const DEFAULT_PERIOD: usize = 20;
pub const DEFAULT_MULTIPLIER: f64 = 2.0;

pub fn calculate_bollinger(
    prices: &[f64],
    period: usize,
    multiplier: f64,
) -> Result<IndicatorSeries, AnalyzerError> {
    require_period("period", period)?;
    if period < 2 {
        return Err(AnalyzerError::invalid_parameter(
            "period",
            "sample standard deviation needs at least 2 points",
        ));
    }
    if !multiplier.is_finite() || multiplier < 0.0 {
        return Err(AnalyzerError::invalid_parameter(
            "multiplier",
            format!("must be a non-negative number, got {multiplier}"),
        ));
    }

    let values = (0..prices.len())
        .map(|i| {
            (i + 1 >= period).then(|| {
                let window = &prices[i + 1 - period..=i];
                let middle = window.iter().sum::<f64>() / period as f64;
                let stddev = sample_stddev(window);

                IndicatorValue::Bollinger {
                    upper: middle + multiplier * stddev,
                    middle,
                    lower: middle - multiplier * stddev,
                }
            })
        })
        .collect();

    Ok(IndicatorSeries {
        indicator_type: IndicatorType::Bollinger {
            period,
            stddev_mult_x100: (multiplier * 100.0).round() as u32,
        },
        values,
    })
}
