//! RSI (Relative Strength Index) indicator implementation.
//!
//! delta[i] = C[i] - C[i-1], gain = max(delta, 0), loss = max(-delta, 0).
//!
//! Averages over the trailing n deltas, by smoothing:
//! - `Simple` (default): plain mean of the last n gains/losses
//! - `Wilder`: seed with the mean of the first n, then avg = (prev_avg * (n-1) + current) / n
//!
//! Formula: RSI = 100 - (100 / (1 + avg_gain / avg_loss))
//! If avg_loss == 0 and avg_gain > 0: RSI = 100
//! If avg_loss == 0 and avg_gain == 0: RSI = 50
//!
//! Warmup: first n points are `None` (need n price changes for the first average).
//! Fewer than n + 1 prices is an error rather than an all-missing series, as is
//! a non-finite price or a price change that overflows `f64`.

use crate::domain::error::{require_finite, require_period, AnalyzerError};
use crate::domain::indicator::{IndicatorSeries, IndicatorType, IndicatorValue};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_RSI_PERIOD: usize = 14;

/// How average gain and loss are formed from the per-bar changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RsiSmoothing {
    #[default]
    Simple,
    Wilder,
}

impl fmt::Display for RsiSmoothing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RsiSmoothing::Simple => write!(f, "simple"),
            RsiSmoothing::Wilder => write!(f, "wilder"),
        }
    }
}

impl FromStr for RsiSmoothing {
    type Err = AnalyzerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "simple" | "sma" => Ok(RsiSmoothing::Simple),
            "wilder" | "rma" => Ok(RsiSmoothing::Wilder),
            other => Err(AnalyzerError::invalid_parameter(
                "smoothing",
                format!("unknown smoothing '{other}' (expected simple or wilder)"),
            )),
        }
    }
}

/// RSI with the default (simple moving average) smoothing.
pub fn calculate_rsi(prices: &[f64], period: usize) -> Result<IndicatorSeries, AnalyzerError> {
    calculate_rsi_with(prices, period, RsiSmoothing::default())
}

pub fn calculate_rsi_default(prices: &[f64]) -> Result<IndicatorSeries, AnalyzerError> {
    calculate_rsi(prices, DEFAULT_RSI_PERIOD)
}

pub fn calculate_rsi_with(
    prices: &[f64],
    period: usize,
    smoothing: RsiSmoothing,
) -> Result<IndicatorSeries, AnalyzerError> {
    require_period("period", period)?;
    if prices.len() < period + 1 {
        return Err(AnalyzerError::InsufficientData {
            points: prices.len(),
            minimum: period + 1,
        });
    }
    require_finite(prices)?;

    let changes: Vec<f64> = prices.windows(2).map(|w| w[1] - w[0]).collect();
    if let Some(i) = changes.iter().position(|c| !c.is_finite()) {
        return Err(AnalyzerError::invalid_parameter(
            "prices",
            format!("price change overflows at index {}", i + 1),
        ));
    }
    let (gains, losses): (Vec<f64>, Vec<f64>) = changes
        .iter()
        .map(|&change| (change.max(0.0), (-change).max(0.0)))
        .unzip();

    let mut values: Vec<Option<IndicatorValue>> = vec![None; period];
    values.reserve(prices.len() - period);

    // averages are accumulated from pre-divided terms so they stay finite
    let n = period as f64;
    let window_mean = |xs: &[f64]| xs.iter().map(|x| x / n).sum::<f64>();
    let mut avg_gain = window_mean(&gains[..period]);
    let mut avg_loss = window_mean(&losses[..period]);
    values.push(Some(IndicatorValue::Simple(rsi_from_averages(
        avg_gain, avg_loss,
    ))));

    // delta index `end` closes the window ending at price index `end + 1`
    for end in period..gains.len() {
        match smoothing {
            RsiSmoothing::Simple => {
                let start = end + 1 - period;
                avg_gain = window_mean(&gains[start..=end]);
                avg_loss = window_mean(&losses[start..=end]);
            }
            RsiSmoothing::Wilder => {
                avg_gain += (gains[end] - avg_gain) / n;
                avg_loss += (losses[end] - avg_loss) / n;
            }
        }
        values.push(Some(IndicatorValue::Simple(rsi_from_averages(
            avg_gain, avg_loss,
        ))));
    }

    Ok(IndicatorSeries {
        indicator_type: IndicatorType::Rsi { period, smoothing },
        values,
    })
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        if avg_gain == 0.0 { 50.0 } else { 100.0 }
    } else {
        let rsi = 100.0 - (100.0 / (1.0 + avg_gain / avg_loss));
        rsi.clamp(0.0, 100.0)
    }
}
