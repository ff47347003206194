//! Rolling Standard Deviation indicator.
//!
//! Sample standard deviation over n prices (n - 1 denominator).
//! STDDEV(n)[i] = sqrt(sum((P[i-j] - SMA(n)[i])^2 for j in 0..n) / (n - 1))
//! Warmup: first (n-1) points are undefined. A window below 2 is undefined everywhere.

use crate::domain::indicator::{IndicatorSeries, IndicatorType};
use crate::domain::price_series::PriceSeries;

pub fn calculate_stddev(prices: &PriceSeries, period: usize) -> IndicatorSeries {
    let closes = prices.prices();
    let mut values = Vec::with_capacity(closes.len());

    for i in 0..closes.len() {
        let value = if period >= 2 && i + 1 >= period {
            let window = &closes[i + 1 - period..=i];
            let mean: f64 = window.iter().sum::<f64>() / period as f64;
            let variance: f64 = window
                .iter()
                .map(|p| {
                    let diff = p - mean;
                    diff * diff
                })
                .sum::<f64>()
                / (period - 1) as f64;
            Some(variance.sqrt())
        } else {
            None
        };
        values.push(value);
    }

    IndicatorSeries::from_values(IndicatorType::Stddev(period), prices, values)
}
