//! CSV output for RSI series and snapshots.

use crate::domain::analysis::Snapshot;
use crate::domain::error::AnalyzerError;
use crate::domain::indicator::IndicatorSeries;
use crate::domain::price_series::PriceSeries;
use crate::domain::signal::{classify_rsi, RsiThresholds};
use std::io::Write;

fn io_err(e: csv::Error) -> AnalyzerError {
    AnalyzerError::Io(std::io::Error::from(e))
}

fn fmt_opt(value: Option<f64>) -> String {
    value.map(|v| format!("{:.4}", v)).unwrap_or_default()
}

fn fmt_label<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// `index,date,close,rsi,signal`; unavailable cells are left empty.
pub fn write_rsi_csv<W: Write>(
    writer: W,
    prices: &PriceSeries,
    rsi: &IndicatorSeries,
    thresholds: &RsiThresholds,
) -> Result<(), AnalyzerError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["index", "date", "close", "rsi", "signal"])
        .map_err(io_err)?;

    for (i, (point, value)) in prices.points.iter().zip(rsi.simple_values()).enumerate() {
        let signal = value.map(|v| classify_rsi(v, thresholds));
        wtr.write_record([
            i.to_string(),
            fmt_label(point.date),
            point.close.to_string(),
            fmt_opt(value),
            fmt_label(signal),
        ])
        .map_err(io_err)?;
    }

    wtr.flush()?;
    Ok(())
}

/// `key,value` listing of a snapshot.
pub fn write_snapshot_csv<W: Write>(writer: W, snapshot: &Snapshot) -> Result<(), AnalyzerError> {
    let mut wtr = csv::Writer::from_writer(writer);
    let rows: Vec<(&str, String)> = vec![
        ("points", snapshot.points.to_string()),
        ("date", fmt_label(snapshot.date)),
        ("close", snapshot.close.to_string()),
        ("rsi", format!("{:.4}", snapshot.rsi)),
        ("rsi_signal", snapshot.rsi_signal.to_string()),
        ("ma_short", fmt_opt(snapshot.ma_short)),
        ("ma_long", fmt_opt(snapshot.ma_long)),
        ("ma_signal", fmt_label(snapshot.ma_signal)),
        ("macd_line", fmt_opt(snapshot.macd.as_ref().map(|m| m.line))),
        ("macd_signal_line", fmt_opt(snapshot.macd.as_ref().map(|m| m.signal))),
        ("macd_histogram", fmt_opt(snapshot.macd.as_ref().map(|m| m.histogram))),
        ("macd_signal", fmt_label(snapshot.macd_signal)),
        ("bb_upper", fmt_opt(snapshot.bands.as_ref().map(|b| b.upper))),
        ("bb_middle", fmt_opt(snapshot.bands.as_ref().map(|b| b.middle))),
        ("bb_lower", fmt_opt(snapshot.bands.as_ref().map(|b| b.lower))),
        ("bb_signal", fmt_label(snapshot.band_signal)),
        ("volatility", fmt_opt(snapshot.volatility)),
        ("pct_change", fmt_opt(snapshot.pct_change)),
        ("score", format!("{:+}", snapshot.score)),
        ("recommendation", snapshot.recommendation.to_string()),
    ];

    wtr.write_record(["key", "value"]).map_err(io_err)?;
    for (key, value) in rows {
        wtr.write_record([key, value.as_str()]).map_err(io_err)?;
    }
    wtr.flush()?;
    Ok(())
}
