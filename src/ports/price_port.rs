//! Price source port trait.

use crate::domain::error::AnalyzerError;
use crate::domain::price_series::{PriceSeries, RawPricePoint};

pub trait PricePort {
    /// Rows in chronological order; closes may be missing.
    fn fetch_prices(&self) -> Result<Vec<RawPricePoint>, AnalyzerError>;

    /// Dense series with gaps filled, plus the number of filled closes.
    fn load_series(&self) -> Result<(PriceSeries, usize), AnalyzerError> {
        let raw = self.fetch_prices()?;
        PriceSeries::from_raw(&raw)
    }
}
