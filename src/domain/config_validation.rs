//! Configuration validation.
//!
//! Validates every recognised key before a run. Missing keys are allowed
//! (defaults apply); present keys must parse and be in range.

use crate::domain::error::LabError;
use crate::domain::strategy::StrategyKind;
use crate::ports::config_port::ConfigPort;

pub const STRATEGY_SECTION: &str = "strategy";
pub const BACKTEST_SECTION: &str = "backtest";

pub fn validate_lab_config(config: &dyn ConfigPort) -> Result<(), LabError> {
    validate_strategy_name(config)?;
    for key in ["ma_short_window", "ma_long_window", "rsi_period"] {
        if let Some(value) = config.read_int(STRATEGY_SECTION, key)? {
            check_window(key, value)?;
        }
    }
    if let Some(value) = config.read_int(STRATEGY_SECTION, "rsi_oversold_level")? {
        check_oversold_level(value)?;
    }
    if let Some(value) = config.read_float(STRATEGY_SECTION, "mean_reversion_deviation_pct")? {
        check_deviation_pct(value)?;
    }
    if let Some(value) = config.read_float(BACKTEST_SECTION, "initial_capital")? {
        check_initial_capital(value)?;
    }
    Ok(())
}

fn validate_strategy_name(config: &dyn ConfigPort) -> Result<(), LabError> {
    match config.get_string(STRATEGY_SECTION, "name") {
        Some(name) if !name.trim().is_empty() => name.parse::<StrategyKind>().map(|_| ()),
        _ => Ok(()),
    }
}

pub(crate) fn check_window(key: &str, value: i64) -> Result<(), LabError> {
    if value <= 0 {
        return Err(invalid(
            STRATEGY_SECTION,
            key,
            format!("{} must be positive", key),
        ));
    }
    Ok(())
}

pub(crate) fn check_oversold_level(value: i64) -> Result<(), LabError> {
    if !(0..=100).contains(&value) {
        return Err(invalid(
            STRATEGY_SECTION,
            "rsi_oversold_level",
            "rsi_oversold_level must be between 0 and 100".to_string(),
        ));
    }
    Ok(())
}

pub(crate) fn check_deviation_pct(value: f64) -> Result<(), LabError> {
    if !(value > 0.0 && value.is_finite()) {
        return Err(invalid(
            STRATEGY_SECTION,
            "mean_reversion_deviation_pct",
            "mean_reversion_deviation_pct must be positive".to_string(),
        ));
    }
    Ok(())
}

pub(crate) fn check_initial_capital(value: f64) -> Result<(), LabError> {
    if !(value > 0.0 && value.is_finite()) {
        return Err(invalid(
            BACKTEST_SECTION,
            "initial_capital",
            "initial_capital must be positive".to_string(),
        ));
    }
    Ok(())
}

fn invalid(section: &str, key: &str, reason: String) -> LabError {
    LabError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::file_config_adapter::FileConfigAdapter;

    fn make_config(content: &str) -> FileConfigAdapter {
        FileConfigAdapter::from_string(content).unwrap()
    }

    #[test]
    fn valid_config_passes() {
        let config = make_config(
            r#"
[strategy]
name = Dual MA Crossover
ma_short_window = 20
ma_long_window = 100
rsi_period = 14
rsi_oversold_level = 30
mean_reversion_deviation_pct = 3

[backtest]
initial_capital = 10000
"#,
        );
        assert!(validate_lab_config(&config).is_ok());
    }

    #[test]
    fn empty_config_passes() {
        let config = make_config("[strategy]\n");
        assert!(validate_lab_config(&config).is_ok());
    }

    #[test]
    fn unknown_strategy_fails() {
        let config = make_config("[strategy]\nname = Martingale\n");
        let err = validate_lab_config(&config).unwrap_err();
        assert!(matches!(err, LabError::UnknownStrategy { name } if name == "Martingale"));
    }

    #[test]
    fn zero_window_fails() {
        let config = make_config("[strategy]\nma_long_window = 0\n");
        let err = validate_lab_config(&config).unwrap_err();
        assert!(matches!(err, LabError::ConfigInvalid { key, .. } if key == "ma_long_window"));
    }

    #[test]
    fn non_numeric_window_fails() {
        let config = make_config("[strategy]\nrsi_period = fourteen\n");
        let err = validate_lab_config(&config).unwrap_err();
        assert!(matches!(err, LabError::ConfigInvalid { key, .. } if key == "rsi_period"));
    }

    #[test]
    fn oversold_level_out_of_range_fails() {
        let config = make_config("[strategy]\nrsi_oversold_level = 101\n");
        let err = validate_lab_config(&config).unwrap_err();
        assert!(
            matches!(err, LabError::ConfigInvalid { key, .. } if key == "rsi_oversold_level")
        );
    }

    #[test]
    fn oversold_level_bounds_inclusive() {
        assert!(validate_lab_config(&make_config("[strategy]\nrsi_oversold_level = 0\n")).is_ok());
        assert!(
            validate_lab_config(&make_config("[strategy]\nrsi_oversold_level = 100\n")).is_ok()
        );
    }

    #[test]
    fn deviation_must_be_positive() {
        let config = make_config("[strategy]\nmean_reversion_deviation_pct = 0\n");
        let err = validate_lab_config(&config).unwrap_err();
        assert!(matches!(
            err,
            LabError::ConfigInvalid { key, .. } if key == "mean_reversion_deviation_pct"
        ));
    }

    #[test]
    fn initial_capital_negative_fails() {
        let config = make_config("[backtest]\ninitial_capital = -100\n");
        let err = validate_lab_config(&config).unwrap_err();
        assert!(
            matches!(err, LabError::ConfigInvalid { section, key, .. } if section == "backtest" && key == "initial_capital")
        );
    }
}
