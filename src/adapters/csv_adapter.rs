//! CSV price file adapter.
//!
//! Columns are located by header name, case-insensitively. Only the close
//! column is required; an optional date column is carried through.

use crate::domain::error::AnalyzerError;
use crate::domain::price_series::RawPricePoint;
use crate::ports::price_port::PricePort;
use chrono::NaiveDate;
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

pub const DEFAULT_CLOSE_COLUMN: &str = "close";
pub const DEFAULT_DATE_COLUMN: &str = "date";
const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvColumns {
    pub close: String,
    pub date: String,
}

impl Default for CsvColumns {
    fn default() -> Self {
        Self {
            close: DEFAULT_CLOSE_COLUMN.to_string(),
            date: DEFAULT_DATE_COLUMN.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CsvInput {
    Path(PathBuf),
    Stdin,
}

impl CsvInput {
    /// `-` means standard input.
    pub fn from_arg(arg: &str) -> Self {
        if arg == "-" {
            CsvInput::Stdin
        } else {
            CsvInput::Path(PathBuf::from(arg))
        }
    }
}

pub struct CsvAdapter {
    input: CsvInput,
    columns: CsvColumns,
}

impl CsvAdapter {
    pub fn new(input: CsvInput, columns: CsvColumns) -> Self {
        Self { input, columns }
    }
}

impl PricePort for CsvAdapter {
    fn fetch_prices(&self) -> Result<Vec<RawPricePoint>, AnalyzerError> {
        match &self.input {
            CsvInput::Path(path) => {
                let file = File::open(path).map_err(|e| {
                    AnalyzerError::data(format!("failed to read {}: {}", path.display(), e))
                })?;
                let rows = read_prices(file, &self.columns)?;
                tracing::debug!(path = %path.display(), rows = rows.len(), "read price file");
                Ok(rows)
            }
            CsvInput::Stdin => {
                let rows = read_prices(std::io::stdin().lock(), &self.columns)?;
                tracing::debug!(rows = rows.len(), "read prices from stdin");
                Ok(rows)
            }
        }
    }
}

/// Parse price rows from any CSV reader.
pub fn read_prices<R: Read>(
    reader: R,
    columns: &CsvColumns,
) -> Result<Vec<RawPricePoint>, AnalyzerError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| AnalyzerError::data(format!("CSV header error: {}", e)))?
        .clone();
    let find = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));

    let close_idx = find(columns.close.as_str()).ok_or_else(|| {
        AnalyzerError::data(format!("missing {} column", columns.close))
    })?;
    let date_idx = find(columns.date.as_str());

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(|e| AnalyzerError::data(format!("CSV parse error: {}", e)))?;
        let line = record.position().map_or(0, |p| p.line());

        let close = match record.get(close_idx).unwrap_or("") {
            "" => None,
            raw => Some(raw.parse::<f64>().map_err(|e| {
                AnalyzerError::data(format!("invalid close value '{}' on line {}: {}", raw, line, e))
            })?),
        };

        let date = match date_idx.map(|i| record.get(i).unwrap_or("")) {
            None | Some("") => None,
            Some(raw) => Some(NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|e| {
                AnalyzerError::data(format!("invalid date '{}' on line {}: {}", raw, line, e))
            })?),
        };

        rows.push(RawPricePoint { date, close });
    }

    Ok(rows)
}
