//! Signal classification for the latest bar.
//!
//! Each classifier maps indicator readings to a discrete signal; the composite
//! score sums the MA, RSI and MACD contributions and is clamped to [-3, 3].

use std::fmt;

pub const DEFAULT_OVERBOUGHT: f64 = 70.0;
pub const DEFAULT_OVERSOLD: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RsiThresholds {
    pub overbought: f64,
    pub oversold: f64,
}

impl Default for RsiThresholds {
    fn default() -> Self {
        Self {
            overbought: DEFAULT_OVERBOUGHT,
            oversold: DEFAULT_OVERSOLD,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RsiSignal {
    Overbought,
    Oversold,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaSignal {
    StrongBullish,
    Bullish,
    StrongBearish,
    Bearish,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacdSignal {
    Bullish,
    Bearish,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandSignal {
    AboveUpper,
    BelowLower,
    WithinRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recommendation {
    StrongBuy,
    Buy,
    Hold,
    Sell,
    StrongSell,
}

pub fn classify_rsi(rsi: f64, thresholds: &RsiThresholds) -> RsiSignal {
    if rsi > thresholds.overbought {
        RsiSignal::Overbought
    } else if rsi < thresholds.oversold {
        RsiSignal::Oversold
    } else {
        RsiSignal::Neutral
    }
}

pub fn classify_ma(close: f64, short_ma: f64, long_ma: f64) -> MaSignal {
    if close > short_ma && short_ma > long_ma {
        MaSignal::StrongBullish
    } else if close > short_ma {
        MaSignal::Bullish
    } else if close < short_ma && short_ma < long_ma {
        MaSignal::StrongBearish
    } else {
        MaSignal::Bearish
    }
}

/// MA signal when the long average is not yet available.
pub fn classify_short_ma(close: f64, short_ma: f64) -> MaSignal {
    if close > short_ma {
        MaSignal::Bullish
    } else {
        MaSignal::Bearish
    }
}

pub fn classify_macd(line: f64, signal: f64) -> MacdSignal {
    if line > signal {
        MacdSignal::Bullish
    } else {
        MacdSignal::Bearish
    }
}

pub fn classify_bands(close: f64, upper: f64, lower: f64) -> BandSignal {
    if close > upper {
        BandSignal::AboveUpper
    } else if close < lower {
        BandSignal::BelowLower
    } else {
        BandSignal::WithinRange
    }
}

/// Unavailable signals contribute nothing.
pub fn composite_score(
    ma: Option<MaSignal>,
    rsi: Option<RsiSignal>,
    macd: Option<MacdSignal>,
) -> i32 {
    let ma_score = match ma {
        Some(MaSignal::StrongBullish) => 2,
        Some(MaSignal::Bullish) => 1,
        Some(MaSignal::StrongBearish) => -2,
        Some(MaSignal::Bearish) => -1,
        None => 0,
    };
    let rsi_score = match rsi {
        Some(RsiSignal::Overbought) => -1,
        Some(RsiSignal::Oversold) => 1,
        Some(RsiSignal::Neutral) | None => 0,
    };
    let macd_score = match macd {
        Some(MacdSignal::Bullish) => 1,
        Some(MacdSignal::Bearish) => -1,
        None => 0,
    };
    (ma_score + rsi_score + macd_score).clamp(-3, 3)
}

pub fn recommend(score: i32) -> Recommendation {
    match score {
        s if s >= 2 => Recommendation::StrongBuy,
        1 => Recommendation::Buy,
        0 => Recommendation::Hold,
        -1 => Recommendation::Sell,
        _ => Recommendation::StrongSell,
    }
}

impl fmt::Display for RsiSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RsiSignal::Overbought => "Overbought",
            RsiSignal::Oversold => "Oversold",
            RsiSignal::Neutral => "Neutral",
        };
        f.write_str(s)
    }
}

impl fmt::Display for MaSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MaSignal::StrongBullish => "Strong Bullish",
            MaSignal::Bullish => "Bullish",
            MaSignal::StrongBearish => "Strong Bearish",
            MaSignal::Bearish => "Bearish",
        };
        f.write_str(s)
    }
}

impl fmt::Display for MacdSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MacdSignal::Bullish => f.write_str("Bullish"),
            MacdSignal::Bearish => f.write_str("Bearish"),
        }
    }
}

impl fmt::Display for BandSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BandSignal::AboveUpper => "Above upper band",
            BandSignal::BelowLower => "Below lower band",
            BandSignal::WithinRange => "Within range",
        };
        f.write_str(s)
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Recommendation::StrongBuy => "Strong Buy",
            Recommendation::Buy => "Buy",
            Recommendation::Hold => "Hold",
            Recommendation::Sell => "Sell",
            Recommendation::StrongSell => "Strong Sell",
        };
        f.write_str(s)
    }
}
