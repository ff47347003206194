//! RSI (Relative Strength Index) indicator implementation.
//!
//! Uses simple trailing means (not Wilder's smoothing) of gains and losses:
//! - delta[i] = P[i] - P[i-1]
//! - gain[i] = mean(max(delta, 0)) over the last n deltas
//! - loss[i] = mean(max(-delta, 0)) over the last n deltas
//!
//! Formula: RSI = 100 - (100 / (1 + gain / loss))
//! If loss == 0 and gain > 0: RSI = 100
//! If loss == 0 and gain == 0 (no movement): RSI = 0
//!
//! The missing delta at index 0 counts as no movement, so the window is full
//! at index n-1 and the first n-1 points are undefined.

use crate::domain::indicator::{IndicatorSeries, IndicatorType};
use crate::domain::price_series::PriceSeries;

pub fn calculate_rsi(prices: &PriceSeries, period: usize) -> IndicatorSeries {
    let closes = prices.prices();
    let mut values = vec![None; closes.len()];

    if period == 0 || closes.len() < period {
        return IndicatorSeries::from_values(IndicatorType::Rsi(period), prices, values);
    }

    // gains[i] and losses[i] belong to price index i; index 0 has no prior price
    let mut gains: Vec<f64> = Vec::with_capacity(closes.len());
    let mut losses: Vec<f64> = Vec::with_capacity(closes.len());
    gains.push(0.0);
    losses.push(0.0);
    for w in closes.windows(2) {
        let change = w[1] - w[0];
        gains.push(if change > 0.0 { change } else { 0.0 });
        losses.push(if change < 0.0 { -change } else { 0.0 });
    }

    for i in (period - 1)..closes.len() {
        let start = i + 1 - period;
        let avg_gain = gains[start..=i].iter().sum::<f64>() / period as f64;
        let avg_loss = losses[start..=i].iter().sum::<f64>() / period as f64;
        values[i] = Some(rsi_from_averages(avg_gain, avg_loss));
    }

    IndicatorSeries::from_values(IndicatorType::Rsi(period), prices, values)
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        if avg_gain > 0.0 { 100.0 } else { 0.0 }
    } else {
        100.0 - (100.0 / (1.0 + avg_gain / avg_loss))
    }
}
