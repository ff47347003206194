//! Run configuration: strategy selection plus indicator and signal parameters.

use crate::domain::backtest::BacktestConfig;
use crate::domain::config_validation;
use crate::domain::error::LabError;
use crate::domain::indicator::IndicatorParams;
use crate::domain::strategy::{SignalParams, Strategy, StrategyKind};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabConfig {
    pub strategy: StrategyKind,
    pub ma_short_window: usize,
    pub ma_long_window: usize,
    pub rsi_period: usize,
    pub rsi_oversold_level: i64,
    /// Percent, e.g. 3.0 for a 3% dip.
    pub mean_reversion_deviation_pct: f64,
    pub initial_capital: f64,
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::BuyHold,
            ma_short_window: 50,
            ma_long_window: 200,
            rsi_period: 14,
            rsi_oversold_level: 30,
            mean_reversion_deviation_pct: 3.0,
            initial_capital: 1.0,
        }
    }
}

impl LabConfig {
    pub fn validate(&self) -> Result<(), LabError> {
        config_validation::check_window("ma_short_window", self.ma_short_window as i64)?;
        config_validation::check_window("ma_long_window", self.ma_long_window as i64)?;
        config_validation::check_window("rsi_period", self.rsi_period as i64)?;
        config_validation::check_oversold_level(self.rsi_oversold_level)?;
        config_validation::check_deviation_pct(self.mean_reversion_deviation_pct)?;
        config_validation::check_initial_capital(self.initial_capital)?;
        if self.ma_short_window >= self.ma_long_window {
            tracing::warn!(
                short = self.ma_short_window,
                long = self.ma_long_window,
                "short MA window is not shorter than long MA window"
            );
        }
        Ok(())
    }

    pub fn indicator_params(&self) -> IndicatorParams {
        IndicatorParams {
            ma_short_window: self.ma_short_window,
            ma_long_window: self.ma_long_window,
            rsi_period: self.rsi_period,
        }
    }

    pub fn signal_params(&self) -> SignalParams {
        SignalParams {
            deviation_threshold: self.mean_reversion_deviation_pct / 100.0,
            oversold_level: self.rsi_oversold_level as f64,
        }
    }

    pub fn backtest_config(&self) -> BacktestConfig {
        BacktestConfig {
            initial_capital: self.initial_capital,
        }
    }

    pub fn selected_strategy(&self) -> Strategy {
        Strategy::from_kind(self.strategy, &self.signal_params())
    }
}
