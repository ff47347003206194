//! Vectorised backtest: positions and prices in, returns, equity and metrics out.
//!
//! The position held at the close of day `i-1` earns the return realised on
//! day `i`. A signal never earns the return of the day it fires.

use crate::domain::error::LabError;
use crate::domain::metrics;
use crate::domain::position::PositionSeries;
use crate::domain::price_series::PriceSeries;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BacktestConfig {
    /// Scales the normalised equity curve; metrics do not depend on it.
    pub initial_capital: f64,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            initial_capital: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestResult {
    pub daily_returns: Vec<Option<f64>>,
    /// Strategy returns; `None` where the day return or prior position is undefined.
    pub returns: Vec<Option<f64>>,
    /// Equity normalised to 1.0 before the first date.
    pub equity: Vec<f64>,
    pub total_return_pct: f64,
    pub max_drawdown_pct: f64,
    pub sharpe_ratio: f64,
    pub trade_count: usize,
    pub initial_capital: f64,
}

impl BacktestResult {
    /// Result for a run where no position was ever defined.
    fn zeroed(daily_returns: Vec<Option<f64>>, config: &BacktestConfig) -> Self {
        let len = daily_returns.len();
        Self {
            daily_returns,
            returns: vec![None; len],
            equity: vec![1.0; len],
            total_return_pct: 0.0,
            max_drawdown_pct: 0.0,
            sharpe_ratio: 0.0,
            trade_count: 0,
            initial_capital: config.initial_capital,
        }
    }

    /// Equity curve in currency units.
    pub fn capital_curve(&self) -> Vec<f64> {
        self.equity
            .iter()
            .map(|e| e * self.initial_capital)
            .collect()
    }

    pub fn final_equity(&self) -> f64 {
        self.equity.last().copied().unwrap_or(1.0) * self.initial_capital
    }

    /// True when the strategy never entered the market.
    pub fn is_idle(&self) -> bool {
        self.trade_count == 0
    }
}

pub fn run_backtest(
    prices: &PriceSeries,
    positions: &PositionSeries,
    config: &BacktestConfig,
) -> Result<BacktestResult, LabError> {
    if prices.len() != positions.len() {
        return Err(LabError::LengthMismatch {
            prices: prices.len(),
            positions: positions.len(),
        });
    }

    let daily_returns = prices.daily_returns();
    if !positions.has_defined_values() {
        return Ok(BacktestResult::zeroed(daily_returns, config));
    }

    let mut returns = Vec::with_capacity(daily_returns.len());
    returns.push(None);
    for i in 1..daily_returns.len() {
        let r = match (daily_returns[i], positions.get(i - 1)) {
            (Some(day), Some(held)) => Some(day * held),
            _ => None,
        };
        returns.push(r);
    }

    let mut equity = Vec::with_capacity(returns.len());
    let mut running = 1.0_f64;
    for r in &returns {
        running *= 1.0 + r.unwrap_or(0.0);
        equity.push(running);
    }

    let defined: Vec<f64> = returns.iter().flatten().copied().collect();

    Ok(BacktestResult {
        total_return_pct: metrics::total_return_pct(&equity),
        max_drawdown_pct: metrics::max_drawdown_pct(&equity),
        sharpe_ratio: metrics::sharpe_ratio(&defined),
        trade_count: positions.trade_count(),
        initial_capital: config.initial_capital,
        daily_returns,
        returns,
        equity,
    })
}
