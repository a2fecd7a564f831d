//! Technical indicator implementations.
//!
//! This module provides types for representing indicator values and series:
//! - `IndicatorValue`: Enum for different indicator output shapes
//! - `IndicatorType`: Enum for indicator identity + parameters
//! - `IndicatorSeries`: One optional value per input price; `None` marks warmup
//!
//! Every calculator takes closing prices in chronological order and returns a
//! series aligned to the input index.

pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod roc;
pub mod rsi;
pub mod sma;
pub mod stddev;

pub use bollinger::calculate_bollinger;
pub use ema::calculate_ema;
pub use macd::{calculate_macd, calculate_macd_default};
pub use roc::{calculate_pct_change, calculate_roc};
pub use rsi::{calculate_rsi, calculate_rsi_default, calculate_rsi_with, RsiSmoothing};
pub use sma::calculate_sma;
pub use stddev::calculate_volatility;

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IndicatorValue {
    Simple(f64),
    Macd {
        line: f64,
        signal: f64,
        histogram: f64,
    },
    Bollinger {
        upper: f64,
        middle: f64,
        lower: f64,
    },
}

impl IndicatorValue {
    pub fn as_simple(&self) -> Option<f64> {
        match self {
            IndicatorValue::Simple(v) => Some(*v),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    Sma(usize),
    Ema(usize),
    Rsi {
        period: usize,
        smoothing: RsiSmoothing,
    },
    Roc(usize),
    Volatility(usize),
    Macd {
        fast: usize,
        slow: usize,
        signal: usize,
    },
    Bollinger {
        period: usize,
        stddev_mult_x100: u32,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSeries {
    pub indicator_type: IndicatorType,
    pub values: Vec<Option<IndicatorValue>>,
}

impl IndicatorSeries {
    /// A series with every entry unavailable.
    pub fn missing(indicator_type: IndicatorType, len: usize) -> Self {
        Self {
            indicator_type,
            values: vec![None; len],
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<IndicatorValue> {
        self.values.get(index).copied().flatten()
    }

    /// Single-valued view; multi-valued entries map to `None`.
    pub fn simple_values(&self) -> Vec<Option<f64>> {
        self.values
            .iter()
            .map(|v| v.and_then(|v| v.as_simple()))
            .collect()
    }

    /// Value at the last index, if available.
    pub fn latest(&self) -> Option<IndicatorValue> {
        self.values.last().copied().flatten()
    }

    pub fn latest_simple(&self) -> Option<f64> {
        self.latest().and_then(|v| v.as_simple())
    }

    /// Index of the first available entry.
    pub fn first_valid_index(&self) -> Option<usize> {
        self.values.iter().position(Option::is_some)
    }
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::Sma(period) => write!(f, "SMA({})", period),
            IndicatorType::Ema(period) => write!(f, "EMA({})", period),
            IndicatorType::Rsi {
                period,
                smoothing: RsiSmoothing::Simple,
            } => write!(f, "RSI({})", period),
            IndicatorType::Rsi {
                period,
                smoothing: RsiSmoothing::Wilder,
            } => write!(f, "RSI({},wilder)", period),
            IndicatorType::Roc(period) => write!(f, "ROC({})", period),
            IndicatorType::Volatility(period) => write!(f, "VOLATILITY({})", period),
            IndicatorType::Macd { fast, slow, signal } => {
                write!(f, "MACD({},{},{})", fast, slow, signal)
            }
            IndicatorType::Bollinger {
                period,
                stddev_mult_x100,
            } => {
                let mult = *stddev_mult_x100 as f64 / 100.0;
                write!(f, "BOLLINGER({},{})", period, mult)
            }
        }
    }
}
