//! One full recomputation: prices → indicators → positions → backtest → comparison.
//!
//! Nothing is cached between calls; every parameter change runs this again.

use chrono::NaiveDate;

use crate::domain::backtest::{run_backtest, BacktestResult};
use crate::domain::comparison::{run_comparison, ComparisonReport};
use crate::domain::error::LabError;
use crate::domain::indicator::IndicatorSet;
use crate::domain::lab_config::LabConfig;
use crate::domain::position::PositionSeries;
use crate::domain::price_series::PriceSeries;
use crate::domain::signal::generate_positions;
use crate::domain::strategy::StrategyKind;

/// Below this many observations the longer windows rarely produce a signal.
pub const SHORT_SERIES_WARNING: usize = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct LabRun {
    pub strategy: StrategyKind,
    pub prices: PriceSeries,
    pub indicators: IndicatorSet,
    pub positions: PositionSeries,
    pub result: BacktestResult,
    pub comparison: ComparisonReport,
}

pub fn run_lab(prices: &PriceSeries, config: &LabConfig) -> Result<LabRun, LabError> {
    config.validate()?;
    if prices.len() < SHORT_SERIES_WARNING {
        tracing::warn!(
            observations = prices.len(),
            "dataset is short; some strategies may not trigger"
        );
    }

    let indicators = IndicatorSet::compute(prices, &config.indicator_params());
    tracing::debug!(
        ma_short = config.ma_short_window,
        ma_long = config.ma_long_window,
        rsi_period = config.rsi_period,
        "indicators computed"
    );

    let strategy = config.selected_strategy();
    let positions = generate_positions(&strategy, prices, &indicators);
    let result = run_backtest(prices, &positions, &config.backtest_config())?;
    let comparison = run_comparison(
        prices,
        &indicators,
        &config.signal_params(),
        &config.backtest_config(),
    )?;

    Ok(LabRun {
        strategy: config.strategy,
        prices: prices.clone(),
        indicators,
        positions,
        result,
        comparison,
    })
}

/// One row of the per-date export table. `None` marks an undefined value.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ExportRow {
    pub date: NaiveDate,
    pub price: f64,
    pub ma_short: Option<f64>,
    pub ma_long: Option<f64>,
    pub rsi: Option<f64>,
    pub rolling_high_20: Option<f64>,
    pub rolling_std_20: Option<f64>,
    pub position: Option<f64>,
    pub daily_return: Option<f64>,
    pub strategy_return: Option<f64>,
    pub equity: f64,
}

pub fn export_rows(run: &LabRun) -> Vec<ExportRow> {
    let ind = &run.indicators;
    let res = &run.result;
    run.prices
        .points()
        .iter()
        .enumerate()
        .map(|(i, p)| ExportRow {
            date: p.date,
            price: p.price,
            ma_short: ind.ma_short.get(i),
            ma_long: ind.ma_long.get(i),
            rsi: ind.rsi.get(i),
            rolling_high_20: ind.rolling_high.get(i),
            rolling_std_20: ind.rolling_std.get(i),
            position: run.positions.get(i),
            daily_return: res.daily_returns[i],
            strategy_return: res.returns[i],
            equity: res.equity[i] * res.initial_capital,
        })
        .collect()
}
