//! Price data access port trait.

use crate::domain::error::LabError;
use crate::domain::price_series::PriceSeries;

pub trait DataPort {
    /// Loads a validated, date-sorted price series. Rows that fail to parse
    /// are dropped; an empty result is an error.
    fn load_prices(&self) -> Result<PriceSeries, LabError>;
}
