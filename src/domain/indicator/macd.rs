//! MACD (Moving Average Convergence Divergence) indicator.
//!
//! MACD Line = EMA(fast) - EMA(slow)
//! Signal Line = EMA(signal) of MACD Line, seeded with the SMA of its first `signal` values
//! Histogram = MACD Line - Signal Line
//!
//! Default parameters: fast=12, slow=26, signal=9
//! Warmup: slow - 1 + signal - 1 points.
//!
//! The EMAs are SMA-seeded, so early values differ from an adjusted
//! exponential average (pandas `ewm(span=n)`), which reports from index 0.
//! The two converge as the series lengthens.

use crate::domain::error::{require_period, AnalyzerError};
use crate::domain::indicator::ema::ema_values;
use crate::domain::indicator::{IndicatorSeries, IndicatorType, IndicatorValue};

pub const DEFAULT_FAST: usize = 12;
pub const DEFAULT_SLOW: usize = 26;
pub const DEFAULT_SIGNAL: usize = 9;

pub fn calculate_macd(
    prices: &[f64],
    fast: usize,
    slow: usize,
    signal_period: usize,
) -> Result<IndicatorSeries, AnalyzerError> {
    require_period("fast", fast)?;
    require_period("slow", slow)?;
    require_period("signal", signal_period)?;
    if fast >= slow {
        return Err(AnalyzerError::invalid_parameter(
            "fast",
            format!("fast period {fast} must be shorter than slow period {slow}"),
        ));
    }

    let indicator_type = IndicatorType::Macd {
        fast,
        slow,
        signal: signal_period,
    };

    let macd_warmup = slow - 1;
    if prices.len() <= macd_warmup {
        return Ok(IndicatorSeries::missing(indicator_type, prices.len()));
    }

    let ema_fast = ema_values(prices, fast);
    let ema_slow = ema_values(prices, slow);

    // both EMAs are available from macd_warmup onwards since fast < slow
    let macd_line: Vec<f64> = ema_fast[macd_warmup..]
        .iter()
        .zip(&ema_slow[macd_warmup..])
        .map(|(f, s)| f.unwrap_or_default() - s.unwrap_or_default())
        .collect();
    let signal_line = ema_values(&macd_line, signal_period);

    let mut values: Vec<Option<IndicatorValue>> = vec![None; macd_warmup];
    values.extend(macd_line.iter().zip(&signal_line).map(|(&line, signal)| {
        signal.map(|signal| IndicatorValue::Macd {
            line,
            signal,
            histogram: line - signal,
        })
    }));

    Ok(IndicatorSeries {
        indicator_type,
        values,
    })
}

pub fn calculate_macd_default(prices: &[f64]) -> Result<IndicatorSeries, AnalyzerError> {
    calculate_macd(prices, DEFAULT_FAST, DEFAULT_SLOW, DEFAULT_SIGNAL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn rising(count: usize) -> Vec<f64> {
        (0..count).map(|i| 100.0 + i as f64).collect()
    }

    #[test]
    fn macd_warmup_default() {
        let series = calculate_macd_default(&rising(40)).unwrap();

        let warmup = DEFAULT_SLOW - 1 + DEFAULT_SIGNAL - 1;
        for i in 0..warmup {
            assert!(series.get(i).is_none(), "Index {} should be missing", i);
        }
        assert!(series.get(warmup).is_some(), "Index {} should be available", warmup);
        assert_eq!(series.len(), 40);
    }

    #[test]
    fn macd_histogram_equals_line_minus_signal() {
        let series = calculate_macd_default(&rising(40)).unwrap();

        for value in series.values.iter().flatten() {
            if let IndicatorValue::Macd {
                line,
                signal,
                histogram,
            } = *value
            {
                assert!((histogram - (line - signal)).abs() < f64::EPSILON);
            } else {
                panic!("Expected Macd value");
            }
        }
    }

    #[test]
    fn macd_line_is_ema_fast_minus_ema_slow() {
        let prices = [10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 100.0];
        let series = calculate_macd(&prices, 3, 5, 2).unwrap();

        let ema_fast = ema_values(&prices, 3);
        let ema_slow = ema_values(&prices, 5);

        for (i, value) in series.values.iter().enumerate() {
            if let Some(IndicatorValue::Macd { line, .. }) = value {
                let expected = ema_fast[i].unwrap() - ema_slow[i].unwrap();
                assert_relative_eq!(*line, expected, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn macd_custom_parameters() {
        let series = calculate_macd(&rising(20), 5, 10, 3).unwrap();

        let warmup = 10 - 1 + 3 - 1;
        assert!(series.get(warmup - 1).is_none());
        assert!(series.get(warmup).is_some());
    }

    #[test]
    fn macd_short_input_is_all_missing() {
        let series = calculate_macd_default(&rising(30)).unwrap();
        assert_eq!(series.len(), 30);
        assert_eq!(series.first_valid_index(), None);

        let series = calculate_macd_default(&[]).unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn macd_flat_prices_are_zero() {
        let series = calculate_macd(&[50.0; 12], 2, 4, 3).unwrap();
        match series.latest() {
            Some(IndicatorValue::Macd {
                line,
                signal,
                histogram,
            }) => {
                assert_relative_eq!(line, 0.0);
                assert_relative_eq!(signal, 0.0);
                assert_relative_eq!(histogram, 0.0);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn macd_zero_period() {
        let prices = [100.0, 101.0, 102.0];
        assert!(calculate_macd(&prices, 0, 26, 9).is_err());
        assert!(calculate_macd(&prices, 12, 0, 9).is_err());
        assert!(calculate_macd(&prices, 12, 26, 0).is_err());
    }

    #[test]
    fn macd_fast_must_be_shorter() {
        let err = calculate_macd(&[1.0, 2.0], 26, 12, 9).unwrap_err();
        assert!(matches!(err, AnalyzerError::InvalidParameter { name, .. } if name == "fast"));
    }

    #[test]
    fn macd_indicator_type() {
        let series = calculate_macd(&[100.0, 101.0, 102.0], 5, 10, 3).unwrap();
        assert_eq!(
            series.indicator_type,
            IndicatorType::Macd {
                fast: 5,
                slow: 10,
                signal: 3
            }
        );
    }
}
