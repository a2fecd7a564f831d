//! Latest-bar analysis: every indicator plus the derived signals.

use crate::domain::error::AnalyzerError;
use crate::domain::indicator::{
    bollinger, calculate_bollinger, calculate_macd, calculate_pct_change, calculate_rsi_with,
    calculate_sma, calculate_volatility, macd, rsi, stddev, IndicatorValue, RsiSmoothing,
};
use crate::domain::price_series::{PriceSeries, DEFAULT_OUTLIER_THRESHOLD};
use crate::domain::signal::{
    classify_bands, classify_ma, classify_macd, classify_short_ma, classify_rsi, composite_score, recommend,
    BandSignal, MaSignal, MacdSignal, Recommendation, RsiSignal, RsiThresholds,
};
use chrono::NaiveDate;

pub const DEFAULT_MA_SHORT: usize = 50;
pub const DEFAULT_MA_LONG: usize = 200;

/// Indicator parameters. Built from config by the CLI, validated before use.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    pub rsi_period: usize,
    pub rsi_smoothing: RsiSmoothing,
    pub rsi_thresholds: RsiThresholds,
    pub ma_short: usize,
    pub ma_long: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub bollinger_period: usize,
    pub bollinger_multiplier: f64,
    pub volatility_period: usize,
    /// Bar-to-bar move (as a fraction) above which a close is smoothed.
    pub outlier_threshold: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            rsi_period: rsi::DEFAULT_RSI_PERIOD,
            rsi_smoothing: RsiSmoothing::default(),
            rsi_thresholds: RsiThresholds::default(),
            ma_short: DEFAULT_MA_SHORT,
            ma_long: DEFAULT_MA_LONG,
            macd_fast: macd::DEFAULT_FAST,
            macd_slow: macd::DEFAULT_SLOW,
            macd_signal: macd::DEFAULT_SIGNAL,
            bollinger_period: bollinger::DEFAULT_PERIOD,
            bollinger_multiplier: bollinger::DEFAULT_MULTIPLIER,
            volatility_period: stddev::DEFAULT_VOLATILITY_PERIOD,
            outlier_threshold: DEFAULT_OUTLIER_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MacdReading {
    pub line: f64,
    pub signal: f64,
    pub histogram: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub points: usize,
    pub date: Option<NaiveDate>,
    pub close: f64,
    pub rsi: f64,
    pub rsi_signal: RsiSignal,
    pub ma_short: Option<f64>,
    pub ma_long: Option<f64>,
    pub ma_signal: Option<MaSignal>,
    pub macd: Option<MacdReading>,
    pub macd_signal: Option<MacdSignal>,
    pub bands: Option<Bands>,
    pub band_signal: Option<BandSignal>,
    pub volatility: Option<f64>,
    pub pct_change: Option<f64>,
    pub score: i32,
    pub recommendation: Recommendation,
}

/// Compute every indicator over `series` and classify the last bar.
///
/// RSI must be available at the last bar, so the RSI error rules apply to the
/// whole analysis. The other indicators may still be in warmup; their signals
/// are then `None` and contribute nothing to the score. While only the long
/// MA is in warmup the MA signal is judged against the short MA alone.
pub fn analyze_latest(
    series: &PriceSeries,
    config: &AnalysisConfig,
) -> Result<Snapshot, AnalyzerError> {
    let closes = series.closes();

    let rsi_series = calculate_rsi_with(&closes, config.rsi_period, config.rsi_smoothing)?;
    let rsi = rsi_series
        .latest_simple()
        .ok_or(AnalyzerError::InsufficientData {
            points: closes.len(),
            minimum: config.rsi_period + 1,
        })?;

    let last = series.last().ok_or(AnalyzerError::InsufficientData {
        points: 0,
        minimum: 1,
    })?;
    let close = last.close;

    let ma_short = calculate_sma(&closes, config.ma_short)?.latest_simple();
    let ma_long = calculate_sma(&closes, config.ma_long)?.latest_simple();
    let ma_signal = match (ma_short, ma_long) {
        (Some(short), Some(long)) => Some(classify_ma(close, short, long)),
        (Some(short), None) => Some(classify_short_ma(close, short)),
        (None, _) => None,
    };

    let macd = match calculate_macd(&closes, config.macd_fast, config.macd_slow, config.macd_signal)?
        .latest()
    {
        Some(IndicatorValue::Macd {
            line,
            signal,
            histogram,
        }) => Some(MacdReading {
            line,
            signal,
            histogram,
        }),
        _ => None,
    };
    let macd_signal = macd.as_ref().map(|m| classify_macd(m.line, m.signal));

    let bands = match calculate_bollinger(&closes, config.bollinger_period, config.bollinger_multiplier)?
        .latest()
    {
        Some(IndicatorValue::Bollinger {
            upper,
            middle,
            lower,
        }) => Some(Bands {
            upper,
            middle,
            lower,
        }),
        _ => None,
    };
    let band_signal = bands
        .as_ref()
        .map(|b| classify_bands(close, b.upper, b.lower));

    let volatility = calculate_volatility(&closes, config.volatility_period)?.latest_simple();
    let pct_change = calculate_pct_change(&closes)?.latest_simple();

    let rsi_signal = classify_rsi(rsi, &config.rsi_thresholds);
    let score = composite_score(ma_signal, Some(rsi_signal), macd_signal);

    Ok(Snapshot {
        points: closes.len(),
        date: last.date,
        close,
        rsi,
        rsi_signal,
        ma_short,
        ma_long,
        ma_signal,
        macd,
        macd_signal,
        bands,
        band_signal,
        volatility,
        pct_change,
        score,
        recommendation: recommend(score),
    })
}
