//! Strategy variants and their parameters.
//!
//! `StrategyKind` is the bare tag (name, parsing, declaration order).
//! `Strategy` carries the parameters each variant actually reads.

use std::fmt;
use std::str::FromStr;

use crate::domain::error::LabError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    BuyHold,
    Momentum,
    DualMaCrossover,
    MeanReversion,
    RsiReversal,
    VolatilityBreakout,
    TrendPullback,
    Blended,
}

impl StrategyKind {
    /// Declaration order; comparison tables follow it.
    pub const ALL: [StrategyKind; 8] = [
        StrategyKind::BuyHold,
        StrategyKind::Momentum,
        StrategyKind::DualMaCrossover,
        StrategyKind::MeanReversion,
        StrategyKind::RsiReversal,
        StrategyKind::VolatilityBreakout,
        StrategyKind::TrendPullback,
        StrategyKind::Blended,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            StrategyKind::BuyHold => "Buy & Hold",
            StrategyKind::Momentum => "Momentum (Single MA)",
            StrategyKind::DualMaCrossover => "Dual MA Crossover",
            StrategyKind::MeanReversion => "Mean Reversion",
            StrategyKind::RsiReversal => "RSI Reversal",
            StrategyKind::VolatilityBreakout => "Volatility Breakout",
            StrategyKind::TrendPullback => "Trend Pullback",
            StrategyKind::Blended => "Blended Strategy",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            StrategyKind::BuyHold => "Always invested. Shows long-term compounding.",
            StrategyKind::Momentum => "Buy when price is above the short moving average.",
            StrategyKind::DualMaCrossover => "Buy while the short MA is above the long MA.",
            StrategyKind::MeanReversion => "Buy deep dips below the short MA, expecting a bounce.",
            StrategyKind::RsiReversal => "Buy when RSI is oversold.",
            StrategyKind::VolatilityBreakout => "Buy closes above the prior 20-day high.",
            StrategyKind::TrendPullback => "Buy pullbacks below the short MA in an uptrend.",
            StrategyKind::Blended => "Equal-weight mix of five single-rule strategies.",
        }
    }

    fn aliases(&self) -> &'static [&'static str] {
        match self {
            StrategyKind::BuyHold => &["buy-hold", "buy_hold", "buyhold"],
            StrategyKind::Momentum => &["momentum", "single-ma"],
            StrategyKind::DualMaCrossover => &["dual-ma", "dual_ma", "dual-ma-crossover", "crossover"],
            StrategyKind::MeanReversion => &["mean-reversion", "mean_reversion"],
            StrategyKind::RsiReversal => &["rsi", "rsi-reversal", "rsi_reversal"],
            StrategyKind::VolatilityBreakout => &["breakout", "volatility-breakout", "volatility_breakout"],
            StrategyKind::TrendPullback => &["trend-pullback", "trend_pullback", "pullback"],
            StrategyKind::Blended => &["blended", "blend"],
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StrategyKind {
    type Err = LabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        StrategyKind::ALL
            .into_iter()
            .find(|kind| {
                kind.name().to_lowercase() == needle || kind.aliases().contains(&needle.as_str())
            })
            .ok_or_else(|| LabError::UnknownStrategy {
                name: s.trim().to_string(),
            })
    }
}

/// Thresholds shared by the parameterised variants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalParams {
    /// Fractional dip below MA_short that triggers mean reversion (0.03 = 3%).
    pub deviation_threshold: f64,
    pub oversold_level: f64,
}

impl Default for SignalParams {
    fn default() -> Self {
        Self {
            deviation_threshold: 0.03,
            oversold_level: 30.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Strategy {
    BuyHold,
    Momentum,
    DualMaCrossover,
    MeanReversion { deviation_threshold: f64 },
    RsiReversal { oversold_level: f64 },
    VolatilityBreakout,
    TrendPullback,
    Blended {
        deviation_threshold: f64,
        oversold_level: f64,
    },
}

impl Strategy {
    pub fn from_kind(kind: StrategyKind, params: &SignalParams) -> Self {
        match kind {
            StrategyKind::BuyHold => Strategy::BuyHold,
            StrategyKind::Momentum => Strategy::Momentum,
            StrategyKind::DualMaCrossover => Strategy::DualMaCrossover,
            StrategyKind::MeanReversion => Strategy::MeanReversion {
                deviation_threshold: params.deviation_threshold,
            },
            StrategyKind::RsiReversal => Strategy::RsiReversal {
                oversold_level: params.oversold_level,
            },
            StrategyKind::VolatilityBreakout => Strategy::VolatilityBreakout,
            StrategyKind::TrendPullback => Strategy::TrendPullback,
            StrategyKind::Blended => Strategy::Blended {
                deviation_threshold: params.deviation_threshold,
                oversold_level: params.oversold_level,
            },
        }
    }

    /// Every variant in declaration order.
    pub fn all(params: &SignalParams) -> Vec<Strategy> {
        StrategyKind::ALL
            .into_iter()
            .map(|kind| Strategy::from_kind(kind, params))
            .collect()
    }

    pub fn kind(&self) -> StrategyKind {
        match self {
            Strategy::BuyHold => StrategyKind::BuyHold,
            Strategy::Momentum => StrategyKind::Momentum,
            Strategy::DualMaCrossover => StrategyKind::DualMaCrossover,
            Strategy::MeanReversion { .. } => StrategyKind::MeanReversion,
            Strategy::RsiReversal { .. } => StrategyKind::RsiReversal,
            Strategy::VolatilityBreakout => StrategyKind::VolatilityBreakout,
            Strategy::TrendPullback => StrategyKind::TrendPullback,
            Strategy::Blended { .. } => StrategyKind::Blended,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind().name()
    }
}
