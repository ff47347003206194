//! Simple Moving Average.
//!
//! SMA(n)[i] = sum(P[i-j] for j in 0..n) / n
//! Warmup: first (n-1) points are undefined.

use crate::domain::indicator::{IndicatorSeries, IndicatorType};
use crate::domain::price_series::PriceSeries;

pub fn calculate_sma(prices: &PriceSeries, period: usize) -> IndicatorSeries {
    let closes = prices.prices();
    let mut values = Vec::with_capacity(closes.len());

    for i in 0..closes.len() {
        let value = if period > 0 && i + 1 >= period {
            let window = &closes[i + 1 - period..=i];
            Some(window.iter().sum::<f64>() / period as f64)
        } else {
            None
        };
        values.push(value);
    }

    IndicatorSeries::from_values(IndicatorType::Sma(period), prices, values)
}
