#![allow(dead_code)]

use chrono::NaiveDate;
use std::io::Write;
use stockta::domain::error::AnalyzerError;
use stockta::domain::price_series::RawPricePoint;
use stockta::ports::price_port::PricePort;

pub struct MockPricePort {
    pub rows: Vec<RawPricePoint>,
    pub error: Option<String>,
}

impl MockPricePort {
    pub fn new(rows: Vec<RawPricePoint>) -> Self {
        Self { rows, error: None }
    }

    pub fn from_closes(closes: &[Option<f64>]) -> Self {
        Self::new(
            closes
                .iter()
                .map(|&close| RawPricePoint { date: None, close })
                .collect(),
        )
    }

    pub fn with_error(reason: &str) -> Self {
        Self {
            rows: Vec::new(),
            error: Some(reason.to_string()),
        }
    }
}

impl PricePort for MockPricePort {
    fn fetch_prices(&self) -> Result<Vec<RawPricePoint>, AnalyzerError> {
        if let Some(reason) = &self.error {
            return Err(AnalyzerError::data(reason.clone()));
        }
        Ok(self.rows.clone())
    }
}

pub fn date(day_offset: i64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Duration::days(day_offset)
}

pub fn rising_closes(n: usize) -> Vec<f64> {
    (0..n).map(|i| 100.0 + i as f64).collect()
}

pub fn falling_closes(n: usize) -> Vec<f64> {
    (0..n).map(|i| 500.0 - i as f64).collect()
}

/// Render closes as a dated price CSV.
pub fn price_csv(closes: &[f64]) -> String {
    let mut out = String::from("date,open,close,volume\n");
    for (i, close) in closes.iter().enumerate() {
        out.push_str(&format!("{},{},{},1000\n", date(i as i64), close, close));
    }
    out
}

pub fn write_temp_file(content: &str, suffix: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

pub fn write_temp_csv(content: &str) -> tempfile::NamedTempFile {
    write_temp_file(content, ".csv")
}

pub fn write_temp_ini(content: &str) -> tempfile::NamedTempFile {
    write_temp_file(content, ".ini")
}
