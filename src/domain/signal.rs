//! Signal generation: maps indicators to a position series per strategy.
//!
//! # Evaluation Semantics
//!
//! - Every comparison is evaluated at a single index; no lookback beyond what
//!   the indicators already encode
//! - A comparison against an undefined indicator is `false`, so binary
//!   variants stay flat (0) during warmup
//! - `Blended` is the elementwise mean of five binary variants

use crate::domain::indicator::IndicatorSet;
use crate::domain::position::PositionSeries;
use crate::domain::price_series::PriceSeries;
use crate::domain::strategy::Strategy;

/// Single dispatch point from a strategy variant to its signal function.
pub fn generate_positions(
    strategy: &Strategy,
    prices: &PriceSeries,
    indicators: &IndicatorSet,
) -> PositionSeries {
    let values = match *strategy {
        Strategy::BuyHold => vec![1.0; prices.len()],
        Strategy::Momentum => momentum(prices, indicators),
        Strategy::DualMaCrossover => dual_ma_crossover(prices, indicators),
        Strategy::MeanReversion {
            deviation_threshold,
        } => mean_reversion(prices, indicators, deviation_threshold),
        Strategy::RsiReversal { oversold_level } => {
            rsi_reversal(prices, indicators, oversold_level)
        }
        Strategy::VolatilityBreakout => volatility_breakout(prices, indicators),
        Strategy::TrendPullback => trend_pullback(prices, indicators),
        Strategy::Blended {
            deviation_threshold,
            oversold_level,
        } => blended(prices, indicators, deviation_threshold, oversold_level),
    };
    PositionSeries::new(values)
}

fn momentum(prices: &PriceSeries, ind: &IndicatorSet) -> Vec<f64> {
    binary(prices.len(), |i| {
        above(Some(prices.price(i)), ind.ma_short.get(i))
    })
}

fn dual_ma_crossover(prices: &PriceSeries, ind: &IndicatorSet) -> Vec<f64> {
    binary(prices.len(), |i| above(ind.ma_short.get(i), ind.ma_long.get(i)))
}

fn mean_reversion(prices: &PriceSeries, ind: &IndicatorSet, deviation_threshold: f64) -> Vec<f64> {
    binary(prices.len(), |i| match ind.ma_short.get(i) {
        Some(ma) => {
            let deviation = (prices.price(i) - ma) / ma;
            deviation.is_finite() && deviation < -deviation_threshold
        }
        None => false,
    })
}

fn rsi_reversal(prices: &PriceSeries, ind: &IndicatorSet, oversold_level: f64) -> Vec<f64> {
    binary(prices.len(), |i| above(Some(oversold_level), ind.rsi.get(i)))
}

fn volatility_breakout(prices: &PriceSeries, ind: &IndicatorSet) -> Vec<f64> {
    binary(prices.len(), |i| {
        above(Some(prices.price(i)), ind.rolling_high.get(i))
    })
}

fn trend_pullback(prices: &PriceSeries, ind: &IndicatorSet) -> Vec<f64> {
    binary(prices.len(), |i| {
        let uptrend = above(ind.ma_short.get(i), ind.ma_long.get(i));
        let pullback = above(ind.ma_short.get(i), Some(prices.price(i)));
        uptrend && pullback
    })
}

fn blended(
    prices: &PriceSeries,
    ind: &IndicatorSet,
    deviation_threshold: f64,
    oversold_level: f64,
) -> Vec<f64> {
    let legs = [
        momentum(prices, ind),
        dual_ma_crossover(prices, ind),
        mean_reversion(prices, ind, deviation_threshold),
        rsi_reversal(prices, ind, oversold_level),
        volatility_breakout(prices, ind),
    ];
    (0..prices.len())
        .map(|i| legs.iter().map(|leg| leg[i]).sum::<f64>() / legs.len() as f64)
        .collect()
}

fn binary(len: usize, rule: impl Fn(usize) -> bool) -> Vec<f64> {
    (0..len).map(|i| if rule(i) { 1.0 } else { 0.0 }).collect()
}

/// `left > right`, false when either side is undefined.
fn above(left: Option<f64>, right: Option<f64>) -> bool {
    match (left, right) {
        (Some(l), Some(r)) => l > r,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::indicator::IndicatorParams;
    use crate::domain::price_series::PricePoint;
    use crate::domain::strategy::{SignalParams, StrategyKind};
    use chrono::NaiveDate;

    fn make_series(prices: &[f64]) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        PriceSeries::new(
            prices
                .iter()
                .enumerate()
                .map(|(i, &price)| PricePoint {
                    date: start + chrono::Duration::days(i as i64),
                    price,
                })
                .collect(),
        )
        .unwrap()
    }

    fn params(short: usize, long: usize, rsi: usize) -> IndicatorParams {
        IndicatorParams {
            ma_short_window: short,
            ma_long_window: long,
            rsi_period: rsi,
        }
    }

    fn positions(strategy: Strategy, prices: &[f64], p: IndicatorParams) -> Vec<f64> {
        let series = make_series(prices);
        let ind = IndicatorSet::compute(&series, &p);
        generate_positions(&strategy, &series, &ind).values().to_vec()
    }

    #[test]
    fn buy_hold_always_invested() {
        let pos = positions(Strategy::BuyHold, &[1.0, 2.0, 3.0], params(2, 3, 2));
        assert_eq!(pos, vec![1.0, 1.0, 1.0]);
    }

    #[test]
    fn momentum_scenario() {
        let pos = positions(
            Strategy::Momentum,
            &[100.0, 102.0, 101.0, 105.0, 99.0, 99.0, 99.0],
            params(2, 3, 2),
        );
        // index 0: MA undefined → 0
        assert_eq!(pos[0], 0.0);
        // 102 > 101
        assert_eq!(pos[1], 1.0);
        // 101 < 101.5
        assert_eq!(pos[2], 0.0);
        // 105 > 103
        assert_eq!(pos[3], 1.0);
        // 99 < 102
        assert_eq!(pos[4], 0.0);
        // 99 == 99 is not strictly above
        assert_eq!(pos[5], 0.0);
        assert_eq!(pos[6], 0.0);
    }

    #[test]
    fn dual_ma_crossover_waits_for_long_window() {
        let prices: Vec<f64> = (0..10).map(|i| 100.0 + i as f64).collect();
        let pos = positions(Strategy::DualMaCrossover, &prices, params(2, 5, 2));
        assert_eq!(&pos[..4], &[0.0; 4]);
        assert_eq!(&pos[4..], &[1.0; 6]);
    }

    #[test]
    fn mean_reversion_threshold() {
        // MA(2) at index 2 = 95, deviation (90-95)/95 ≈ -5.3%
        let prices = [100.0, 100.0, 90.0];
        let deep = positions(
            Strategy::MeanReversion {
                deviation_threshold: 0.03,
            },
            &prices,
            params(2, 3, 2),
        );
        assert_eq!(deep, vec![0.0, 0.0, 1.0]);

        let shallow = positions(
            Strategy::MeanReversion {
                deviation_threshold: 0.06,
            },
            &prices,
            params(2, 3, 2),
        );
        assert_eq!(shallow, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn mean_reversion_zero_ma_stays_flat() {
        let pos = positions(
            Strategy::MeanReversion {
                deviation_threshold: 0.03,
            },
            &[0.0, 0.0, 0.0],
            params(2, 3, 2),
        );
        assert_eq!(pos, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn rsi_reversal_oversold() {
        let prices: Vec<f64> = (0..6).map(|i| 100.0 - i as f64).collect();
        let pos = positions(
            Strategy::RsiReversal {
                oversold_level: 30.0,
            },
            &prices,
            params(2, 3, 3),
        );
        // RSI undefined for the first 2 points, then 0 (all losses)
        assert_eq!(pos, vec![0.0, 0.0, 1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn rsi_reversal_constant_prices_enter_after_warmup() {
        // no movement → RSI 0, which is below any positive oversold level
        let pos = positions(
            Strategy::RsiReversal {
                oversold_level: 30.0,
            },
            &[50.0; 5],
            params(2, 3, 2),
        );
        assert_eq!(pos, vec![0.0, 1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn volatility_breakout_needs_prior_20_days() {
        let mut prices = vec![100.0; 20];
        prices.push(101.0);
        prices.push(100.5);
        let pos = positions(Strategy::VolatilityBreakout, &prices, params(2, 3, 2));
        assert!(pos[..20].iter().all(|&p| p == 0.0));
        assert_eq!(pos[20], 1.0);
        assert_eq!(pos[21], 0.0);
    }

    #[test]
    fn volatility_breakout_rising_series_is_always_breaking_out() {
        let prices: Vec<f64> = (0..25).map(|i| 100.0 + i as f64).collect();
        let pos = positions(Strategy::VolatilityBreakout, &prices, params(2, 3, 2));
        assert!(pos[..20].iter().all(|&p| p == 0.0));
        assert!(pos[20..].iter().all(|&p| p == 1.0));
    }

    #[test]
    fn trend_pullback_conjunction() {
        // uptrend then a dip below MA(2) while MA(2) stays above MA(4)
        let prices = [100.0, 102.0, 104.0, 106.0, 108.0, 107.0];
        let pos = positions(Strategy::TrendPullback, &prices, params(2, 4, 2));
        // index 5: MA2 = 107.5 > MA4 = 106.25, price 107 < 107.5
        assert_eq!(pos[5], 1.0);
        // index 4: price 108 above MA2 = 107 → not a pullback
        assert_eq!(pos[4], 0.0);
    }

    #[test]
    fn blended_is_mean_of_five_legs() {
        let prices: Vec<f64> = (0..25).map(|i| 100.0 + i as f64).collect();
        let series = make_series(&prices);
        let ind = IndicatorSet::compute(&series, &params(2, 4, 3));
        let sp = SignalParams::default();

        let blended = generate_positions(&Strategy::from_kind(StrategyKind::Blended, &sp), &series, &ind);
        let legs: Vec<PositionSeries> = [
            StrategyKind::Momentum,
            StrategyKind::DualMaCrossover,
            StrategyKind::MeanReversion,
            StrategyKind::RsiReversal,
            StrategyKind::VolatilityBreakout,
        ]
        .into_iter()
        .map(|k| generate_positions(&Strategy::from_kind(k, &sp), &series, &ind))
        .collect();

        for i in 0..prices.len() {
            let expected = legs.iter().map(|l| l.values()[i]).sum::<f64>() / 5.0;
            assert_eq!(blended.values()[i], expected);
        }
        // steady uptrend after warmup: momentum, dual MA and breakout are on
        assert!((blended.values()[24] - 0.6).abs() < 1e-12);
    }

    #[test]
    fn binary_variants_emit_only_zero_or_one() {
        let prices: Vec<f64> = (0..60)
            .map(|i| 100.0 + (i as f64 * 0.7).sin() * 10.0)
            .collect();
        let series = make_series(&prices);
        let ind = IndicatorSet::compute(&series, &params(5, 15, 7));
        for strategy in Strategy::all(&SignalParams::default()) {
            let pos = generate_positions(&strategy, &series, &ind);
            assert_eq!(pos.len(), prices.len());
            for &v in pos.values() {
                if strategy.kind() == StrategyKind::Blended {
                    assert!((0.0..=1.0).contains(&v));
                } else {
                    assert!(v == 0.0 || v == 1.0, "{} emitted {}", strategy.name(), v);
                }
            }
        }
    }
}
