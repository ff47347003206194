//! Multi-strategy comparison over one price series.

use chrono::NaiveDate;

use crate::domain::backtest::{run_backtest, BacktestConfig, BacktestResult};
use crate::domain::error::LabError;
use crate::domain::indicator::IndicatorSet;
use crate::domain::price_series::PriceSeries;
use crate::domain::signal::generate_positions;
use crate::domain::strategy::{SignalParams, Strategy, StrategyKind};

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    pub kind: StrategyKind,
    pub total_return_pct: f64,
    pub sharpe_ratio: f64,
    pub max_drawdown_pct: f64,
    pub trade_count: usize,
}

impl ComparisonRow {
    fn from_result(kind: StrategyKind, result: &BacktestResult) -> Self {
        Self {
            kind,
            total_return_pct: result.total_return_pct,
            sharpe_ratio: result.sharpe_ratio,
            max_drawdown_pct: result.max_drawdown_pct,
            trade_count: result.trade_count,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EquityCurve {
    pub kind: StrategyKind,
    pub equity: Vec<f64>,
}

/// One row and one equity curve per variant, in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonReport {
    pub dates: Vec<NaiveDate>,
    pub rows: Vec<ComparisonRow>,
    pub curves: Vec<EquityCurve>,
}

impl ComparisonReport {
    pub fn row(&self, kind: StrategyKind) -> Option<&ComparisonRow> {
        self.rows.iter().find(|r| r.kind == kind)
    }

    pub fn curve(&self, kind: StrategyKind) -> Option<&EquityCurve> {
        self.curves.iter().find(|c| c.kind == kind)
    }

    /// Highest Sharpe ratio; the earliest declared variant wins ties.
    pub fn best_by_sharpe(&self) -> Option<&ComparisonRow> {
        self.rows.iter().fold(None, |best: Option<&ComparisonRow>, row| match best {
            Some(b) if b.sharpe_ratio >= row.sharpe_ratio => Some(b),
            _ => Some(row),
        })
    }
}

pub fn run_comparison(
    prices: &PriceSeries,
    indicators: &IndicatorSet,
    signal_params: &SignalParams,
    config: &BacktestConfig,
) -> Result<ComparisonReport, LabError> {
    let strategies = Strategy::all(signal_params);
    let mut rows = Vec::with_capacity(strategies.len());
    let mut curves = Vec::with_capacity(strategies.len());

    for strategy in &strategies {
        let positions = generate_positions(strategy, prices, indicators);
        let result = run_backtest(prices, &positions, config)?;
        tracing::debug!(
            strategy = strategy.name(),
            total_return_pct = result.total_return_pct,
            trades = result.trade_count,
            "strategy backtested"
        );
        rows.push(ComparisonRow::from_result(strategy.kind(), &result));
        curves.push(EquityCurve {
            kind: strategy.kind(),
            equity: result.equity,
        });
    }

    Ok(ComparisonReport {
        dates: prices.dates(),
        rows,
        curves,
    })
}
