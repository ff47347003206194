//! Technical indicator implementations.
//!
//! Every indicator produces an `IndicatorSeries` with one point per price,
//! index-aligned to the source `PriceSeries`. Points without enough history
//! carry `value: None`.

pub mod rolling_high;
pub mod rsi;
pub mod sma;
pub mod stddev;

use chrono::NaiveDate;
use std::fmt;

use crate::domain::price_series::PriceSeries;

/// Window of the prior-day rolling high used for breakout detection.
pub const BREAKOUT_WINDOW: usize = 20;
/// Window of the rolling volatility column.
pub const VOLATILITY_WINDOW: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorPoint {
    pub date: NaiveDate,
    pub value: Option<f64>,
}

impl IndicatorPoint {
    pub fn is_valid(&self) -> bool {
        self.value.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    Sma(usize),
    Rsi(usize),
    /// Highest price over the prior `n` days, excluding the current one.
    RollingHigh(usize),
    Stddev(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSeries {
    pub indicator_type: IndicatorType,
    pub values: Vec<IndicatorPoint>,
}

impl IndicatorSeries {
    /// Builds a series from per-index values, taking dates from `prices`.
    pub(crate) fn from_values(
        indicator_type: IndicatorType,
        prices: &PriceSeries,
        values: Vec<Option<f64>>,
    ) -> Self {
        let values = prices
            .points()
            .iter()
            .zip(values)
            .map(|(p, value)| IndicatorPoint {
                date: p.date,
                value,
            })
            .collect();
        Self {
            indicator_type,
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).and_then(|p| p.value)
    }

    pub fn valid_count(&self) -> usize {
        self.values.iter().filter(|p| p.is_valid()).count()
    }
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::Sma(period) => write!(f, "SMA({})", period),
            IndicatorType::Rsi(period) => write!(f, "RSI({})", period),
            IndicatorType::RollingHigh(period) => write!(f, "HIGH({})", period),
            IndicatorType::Stddev(period) => write!(f, "STDDEV({})", period),
        }
    }
}

/// Window lengths for one indicator computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndicatorParams {
    pub ma_short_window: usize,
    pub ma_long_window: usize,
    pub rsi_period: usize,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            ma_short_window: 50,
            ma_long_window: 200,
            rsi_period: 14,
        }
    }
}

/// All indicator columns the strategies read, aligned to one price series.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSet {
    pub ma_short: IndicatorSeries,
    pub ma_long: IndicatorSeries,
    pub rsi: IndicatorSeries,
    pub rolling_high: IndicatorSeries,
    pub rolling_std: IndicatorSeries,
}

impl IndicatorSet {
    pub fn compute(prices: &PriceSeries, params: &IndicatorParams) -> Self {
        Self {
            ma_short: sma::calculate_sma(prices, params.ma_short_window),
            ma_long: sma::calculate_sma(prices, params.ma_long_window),
            rsi: rsi::calculate_rsi(prices, params.rsi_period),
            rolling_high: rolling_high::calculate_prior_high(prices, BREAKOUT_WINDOW),
            rolling_std: stddev::calculate_stddev(prices, VOLATILITY_WINDOW),
        }
    }

    pub fn len(&self) -> usize {
        self.ma_short.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ma_short.is_empty()
    }
}
