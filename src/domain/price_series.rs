//! Closing price series, gap filling and outlier smoothing.

use crate::domain::error::AnalyzerError;
use chrono::NaiveDate;

/// Bar-to-bar moves larger than 50% are treated as outliers.
pub const DEFAULT_OUTLIER_THRESHOLD: f64 = 0.5;

/// One row as read from a source; the close may be missing.
#[derive(Debug, Clone, PartialEq)]
pub struct RawPricePoint {
    pub date: Option<NaiveDate>,
    pub close: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PricePoint {
    pub date: Option<NaiveDate>,
    pub close: f64,
}

/// Chronologically ordered closing prices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceSeries {
    pub points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn from_closes(closes: &[f64]) -> Self {
        Self {
            points: closes
                .iter()
                .map(|&close| PricePoint { date: None, close })
                .collect(),
        }
    }

    /// Build a dense series from raw rows, filling gaps. Returns the number of filled closes.
    pub fn from_raw(raw: &[RawPricePoint]) -> Result<(Self, usize), AnalyzerError> {
        let closes: Vec<Option<f64>> = raw.iter().map(|p| p.close).collect();
        let (filled, gaps) = fill_gaps(&closes)?;
        let points = raw
            .iter()
            .zip(filled)
            .map(|(p, close)| PricePoint {
                date: p.date,
                close,
            })
            .collect();
        Ok((Self { points }, gaps))
    }

    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// Smooth outlier closes in place; see [`smooth_outliers`].
    pub fn smooth_outliers(&mut self, threshold: f64) -> usize {
        let mut closes = self.closes();
        let replaced = smooth_outliers(&mut closes, threshold);
        for (point, close) in self.points.iter_mut().zip(closes) {
            point.close = close;
        }
        replaced
    }
}

/// Forward fill missing closes, then backward fill any leading gap.
///
/// Non-finite values count as missing.
pub fn fill_gaps(closes: &[Option<f64>]) -> Result<(Vec<f64>, usize), AnalyzerError> {
    let first_known = closes
        .iter()
        .flatten()
        .copied()
        .find(|v| v.is_finite())
        .ok_or(AnalyzerError::InsufficientData {
            points: 0,
            minimum: 1,
        })?;

    let mut last = first_known;
    let mut gaps = 0;
    let filled = closes
        .iter()
        .map(|close| match close.filter(|v| v.is_finite()) {
            Some(v) => {
                last = v;
                v
            }
            None => {
                gaps += 1;
                last
            }
        })
        .collect();

    Ok((filled, gaps))
}

/// Replace closes whose move from the previous close exceeds `threshold`
/// (a fraction, 0.5 = 50%) with the centered 3-point mean.
///
/// Flags and means are computed from the unmodified input. A flagged last
/// close has no right neighbour and is kept. A move off a zero close counts
/// as an outlier unless the close stays zero. Returns the number of replaced closes.
pub fn smooth_outliers(closes: &mut [f64], threshold: f64) -> usize {
    let original = closes.to_vec();
    let mut replaced = 0;

    for i in 1..original.len().saturating_sub(1) {
        let prev = original[i - 1];
        let is_outlier = if prev == 0.0 {
            original[i] != 0.0
        } else {
            (original[i] / prev - 1.0).abs() > threshold
        };
        if is_outlier {
            closes[i] = (prev + original[i] + original[i + 1]) / 3.0;
            replaced += 1;
        }
    }

    replaced
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn smooth_spike_and_rebound() {
        let mut closes = [100.0, 100.0, 300.0, 100.0, 100.0];
        let replaced = smooth_outliers(&mut closes, DEFAULT_OUTLIER_THRESHOLD);

        // both the jump up and the drop back are flagged
        assert_eq!(replaced, 2);
        assert_relative_eq!(closes[2], 500.0 / 3.0, epsilon = 1e-10);
        assert_relative_eq!(closes[3], 500.0 / 3.0, epsilon = 1e-10);
        assert_eq!(closes[0], 100.0);
        assert_eq!(closes[4], 100.0);
    }

    #[test]
    fn smooth_leaves_normal_moves() {
        let mut closes = [100.0, 120.0, 90.0, 130.0];
        assert_eq!(smooth_outliers(&mut closes, DEFAULT_OUTLIER_THRESHOLD), 0);
        assert_eq!(closes, [100.0, 120.0, 90.0, 130.0]);
    }

    #[test]
    fn smooth_keeps_last_close() {
        let mut closes = [10.0, 10.0, 10.0, 30.0];
        assert_eq!(smooth_outliers(&mut closes, DEFAULT_OUTLIER_THRESHOLD), 0);
        assert_eq!(closes[3], 30.0);
    }

    #[test]
    fn smooth_move_off_zero() {
        let mut closes = [0.0, 6.0, 6.0];
        assert_eq!(smooth_outliers(&mut closes, DEFAULT_OUTLIER_THRESHOLD), 1);
        assert_relative_eq!(closes[1], 4.0, epsilon = 1e-10);

        let mut flat_zero = [0.0, 0.0, 0.0];
        assert_eq!(smooth_outliers(&mut flat_zero, DEFAULT_OUTLIER_THRESHOLD), 0);
    }

    #[test]
    fn smooth_short_series_is_untouched() {
        let mut closes = [1.0, 100.0];
        assert_eq!(smooth_outliers(&mut closes, DEFAULT_OUTLIER_THRESHOLD), 0);
        assert_eq!(smooth_outliers(&mut [], DEFAULT_OUTLIER_THRESHOLD), 0);
    }

    #[test]
    fn series_smooth_outliers_keeps_dates() {
        let raw: Vec<RawPricePoint> = [10.0, 40.0, 10.0]
            .iter()
            .enumerate()
            .map(|(i, &c)| RawPricePoint {
                date: NaiveDate::from_ymd_opt(2024, 5, 1 + i as u32),
                close: Some(c),
            })
            .collect();
        let (mut series, _) = PriceSeries::from_raw(&raw).unwrap();
        assert_eq!(series.smooth_outliers(0.5), 1);
        assert_relative_eq!(series.points[1].close, 20.0, epsilon = 1e-10);
        assert_eq!(series.points[1].date, NaiveDate::from_ymd_opt(2024, 5, 2));
    }

    #[test]
    fn fill_forward() {
        let (filled, gaps) = fill_gaps(&[Some(1.0), None, None, Some(4.0), None]).unwrap();
        assert_eq!(filled, vec![1.0, 1.0, 1.0, 4.0, 4.0]);
        assert_eq!(gaps, 3);
    }

    #[test]
    fn fill_leading_gap_backward() {
        let (filled, gaps) = fill_gaps(&[None, None, Some(3.0), Some(5.0)]).unwrap();
        assert_eq!(filled, vec![3.0, 3.0, 3.0, 5.0]);
        assert_eq!(gaps, 2);
    }

    #[test]
    fn fill_treats_nan_as_missing() {
        let (filled, gaps) = fill_gaps(&[Some(2.0), Some(f64::NAN), Some(6.0)]).unwrap();
        assert_eq!(filled, vec![2.0, 2.0, 6.0]);
        assert_eq!(gaps, 1);
    }

    #[test]
    fn fill_no_gaps() {
        let (filled, gaps) = fill_gaps(&[Some(1.0), Some(2.0)]).unwrap();
        assert_eq!(filled, vec![1.0, 2.0]);
        assert_eq!(gaps, 0);
    }

    #[test]
    fn fill_all_missing_is_error() {
        assert!(matches!(
            fill_gaps(&[None, None]),
            Err(AnalyzerError::InsufficientData { .. })
        ));
        assert!(fill_gaps(&[]).is_err());
    }

    #[test]
    fn series_from_raw_keeps_dates() {
        let d = |day| NaiveDate::from_ymd_opt(2024, 3, day);
        let raw = vec![
            RawPricePoint {
                date: d(1),
                close: Some(10.0),
            },
            RawPricePoint {
                date: d(4),
                close: None,
            },
            RawPricePoint {
                date: d(5),
                close: Some(12.0),
            },
        ];
        let (series, gaps) = PriceSeries::from_raw(&raw).unwrap();
        assert_eq!(gaps, 1);
        assert_eq!(series.closes(), vec![10.0, 10.0, 12.0]);
        assert_eq!(series.points[1].date, d(4));
        assert_eq!(series.last().map(|p| p.close), Some(12.0));
    }

    #[test]
    fn series_from_closes() {
        let series = PriceSeries::from_closes(&[1.0, 2.0, 3.0]);
        assert_eq!(series.len(), 3);
        assert!(!series.is_empty());
        assert!(series.points.iter().all(|p| p.date.is_none()));
    }
}
