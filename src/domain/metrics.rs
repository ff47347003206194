//! Performance metrics over a strategy return series and its equity curve.
//!
//! Every metric resolves degenerate inputs locally to a defined number; none
//! of these functions return NaN.

pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// `(equity[last] - 1) * 100` for an equity curve normalised to start at 1.
pub fn total_return_pct(equity: &[f64]) -> f64 {
    match equity.last() {
        Some(last) => (last - 1.0) * 100.0,
        None => 0.0,
    }
}

/// Worst `equity / running_peak - 1` in percent. Always ≤ 0.
pub fn max_drawdown_pct(equity: &[f64]) -> f64 {
    let mut peak = f64::NEG_INFINITY;
    let mut max_dd = 0.0_f64;

    for &value in equity {
        if value > peak {
            peak = value;
        }
        if peak > 0.0 {
            let dd = value / peak - 1.0;
            if dd < max_dd {
                max_dd = dd;
            }
        }
    }

    max_dd * 100.0
}

/// Annualised Sharpe ratio: `mean / sample_stddev * sqrt(252)`.
///
/// Zero when fewer than two returns exist or the returns have no variance.
/// Zero variance is detected on the inputs, not on the computed stddev, which
/// carries rounding residue for a constant series.
pub fn sharpe_ratio(returns: &[f64]) -> f64 {
    if returns.len() < 2 || returns.iter().all(|&r| r == returns[0]) {
        return 0.0;
    }

    let n = returns.len() as f64;
    let mean: f64 = returns.iter().sum::<f64>() / n;
    let variance: f64 = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / (n - 1.0);
    let stddev = variance.sqrt();

    if stddev > 0.0 && stddev.is_finite() {
        mean / stddev * TRADING_DAYS_PER_YEAR.sqrt()
    } else {
        0.0
    }
}
