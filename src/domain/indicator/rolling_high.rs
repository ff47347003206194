//! Prior-day rolling high, used for breakout detection.
//!
//! HIGH(n)[i] = max(P[i-n..i]), the current day excluded, so a breakout
//! requires today's price to exceed the peak of the preceding n days.
//! Warmup: first n points are undefined.

use crate::domain::indicator::{IndicatorSeries, IndicatorType};
use crate::domain::price_series::PriceSeries;

pub fn calculate_prior_high(prices: &PriceSeries, period: usize) -> IndicatorSeries {
    let closes = prices.prices();
    let mut values = Vec::with_capacity(closes.len());

    for i in 0..closes.len() {
        let value = if period > 0 && i >= period {
            closes[i - period..i].iter().copied().reduce(f64::max)
        } else {
            None
        };
        values.push(value);
    }

    IndicatorSeries::from_values(IndicatorType::RollingHigh(period), prices, values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::price_series::PricePoint;
    use chrono::NaiveDate;

    fn make_series(prices: &[f64]) -> PriceSeries {
        PriceSeries::new(
            prices
                .iter()
                .enumerate()
                .map(|(i, &price)| PricePoint {
                    date: NaiveDate::from_ymd_opt(2024, 1, (i + 1) as u32).unwrap(),
                    price,
                })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn prior_high_warmup_is_period_points() {
        let series = calculate_prior_high(&make_series(&[1.0, 2.0, 3.0, 4.0]), 2);
        assert!(series.get(0).is_none());
        assert!(series.get(1).is_none());
        assert!(series.get(2).is_some());
    }

    #[test]
    fn prior_high_excludes_current_day() {
        let series = calculate_prior_high(&make_series(&[5.0, 3.0, 4.0, 10.0, 2.0]), 3);
        // index 3 sees [5, 3, 4], not its own 10
        assert_eq!(series.get(3), Some(5.0));
        // index 4 sees [3, 4, 10]
        assert_eq!(series.get(4), Some(10.0));
    }

    #[test]
    fn prior_high_zero_period() {
        let series = calculate_prior_high(&make_series(&[1.0, 2.0]), 0);
        assert_eq!(series.valid_count(), 0);
    }

    #[test]
    fn prior_high_indicator_type() {
        let series = calculate_prior_high(&make_series(&[1.0]), 20);
        assert_eq!(series.indicator_type, IndicatorType::RollingHigh(20));
    }
}
