//! CLI definition and dispatch.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::comparison::ComparisonReport;
use crate::domain::config_validation::{
    validate_lab_config, BACKTEST_SECTION, STRATEGY_SECTION,
};
use crate::domain::error::LabError;
use crate::domain::lab_config::LabConfig;
use crate::domain::pipeline::{run_lab, LabRun};
use crate::domain::strategy::StrategyKind;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "strategy-lab", about = "Backtest simple trading rules on a daily price series")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Backtest one strategy and print its metrics
    Run {
        #[command(flatten)]
        lab: LabArgs,
        /// Export the per-date table to this CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Backtest every strategy and print the comparison table
    Compare {
        #[command(flatten)]
        lab: LabArgs,
        /// Export the comparison table to this CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

/// Inputs shared by `run` and `compare`. Flags override the config file.
#[derive(Args, Debug, Default)]
pub struct LabArgs {
    /// Price CSV with a date column and a close/price column
    #[arg(short, long)]
    pub data: PathBuf,
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Strategy name, e.g. "momentum" or "Dual MA Crossover"
    #[arg(short, long)]
    pub strategy: Option<String>,
    #[arg(long)]
    pub ma_short: Option<usize>,
    #[arg(long)]
    pub ma_long: Option<usize>,
    #[arg(long)]
    pub rsi_period: Option<usize>,
    #[arg(long)]
    pub rsi_oversold: Option<i64>,
    /// Mean reversion dip in percent
    #[arg(long)]
    pub deviation_pct: Option<f64>,
    #[arg(long)]
    pub initial_capital: Option<f64>,
}

pub fn run(cli: Cli) -> ExitCode {
    let outcome = match cli.command {
        Command::Run { lab, output } => run_single(&lab, output.as_ref()),
        Command::Compare { lab, output } => run_compare(&lab, output.as_ref()),
        Command::Validate { config } => run_validate(&config),
    };
    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            (&e).into()
        }
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, LabError> {
    FileConfigAdapter::from_file(path).map_err(|e| LabError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Reads a `LabConfig` from a validated config source, defaulting missing keys.
pub fn build_lab_config(adapter: &dyn ConfigPort) -> Result<LabConfig, LabError> {
    let defaults = LabConfig::default();
    let strategy = match adapter
        .get_string(STRATEGY_SECTION, "name")
        .filter(|s| !s.trim().is_empty())
    {
        Some(name) => name.parse::<StrategyKind>()?,
        None => defaults.strategy,
    };

    let window = |key: &str, default: usize| -> Result<usize, LabError> {
        let value = adapter.get_int(STRATEGY_SECTION, key, default as i64);
        usize::try_from(value).map_err(|_| LabError::ConfigInvalid {
            section: STRATEGY_SECTION.into(),
            key: key.into(),
            reason: format!("{} must be positive", key),
        })
    };

    Ok(LabConfig {
        strategy,
        ma_short_window: window("ma_short_window", defaults.ma_short_window)?,
        ma_long_window: window("ma_long_window", defaults.ma_long_window)?,
        rsi_period: window("rsi_period", defaults.rsi_period)?,
        rsi_oversold_level: adapter.get_int(
            STRATEGY_SECTION,
            "rsi_oversold_level",
            defaults.rsi_oversold_level,
        ),
        mean_reversion_deviation_pct: adapter.get_double(
            STRATEGY_SECTION,
            "mean_reversion_deviation_pct",
            defaults.mean_reversion_deviation_pct,
        ),
        initial_capital: adapter.get_double(
            BACKTEST_SECTION,
            "initial_capital",
            defaults.initial_capital,
        ),
    })
}

/// Config file (if any), then command-line overrides, then validation.
pub fn resolve_lab_config(args: &LabArgs) -> Result<LabConfig, LabError> {
    let mut config = match &args.config {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading config");
            let adapter = load_config(path)?;
            validate_lab_config(&adapter)?;
            build_lab_config(&adapter)?
        }
        None => LabConfig::default(),
    };

    if let Some(name) = &args.strategy {
        config.strategy = name.parse()?;
    }
    if let Some(v) = args.ma_short {
        config.ma_short_window = v;
    }
    if let Some(v) = args.ma_long {
        config.ma_long_window = v;
    }
    if let Some(v) = args.rsi_period {
        config.rsi_period = v;
    }
    if let Some(v) = args.rsi_oversold {
        config.rsi_oversold_level = v;
    }
    if let Some(v) = args.deviation_pct {
        config.mean_reversion_deviation_pct = v;
    }
    if let Some(v) = args.initial_capital {
        config.initial_capital = v;
    }

    config.validate()?;
    Ok(config)
}

fn execute(args: &LabArgs) -> Result<LabRun, LabError> {
    let config = resolve_lab_config(args)?;
    let prices = CsvAdapter::new(args.data.clone()).load_prices()?;
    tracing::info!(
        strategy = config.strategy.name(),
        from = %prices.first_date(),
        to = %prices.last_date(),
        "running backtest"
    );
    run_lab(&prices, &config)
}

fn run_single(args: &LabArgs, output: Option<&PathBuf>) -> Result<(), LabError> {
    let run = execute(args)?;
    print!("{}", format_run_summary(&run));
    if let Some(path) = output {
        CsvReportAdapter.write_run(&run, path)?;
    }
    Ok(())
}

fn run_compare(args: &LabArgs, output: Option<&PathBuf>) -> Result<(), LabError> {
    let run = execute(args)?;
    print!("{}", format_comparison(&run.comparison));
    if let Some(path) = output {
        CsvReportAdapter.write_comparison(&run.comparison, path)?;
    }
    Ok(())
}

fn run_validate(path: &PathBuf) -> Result<(), LabError> {
    let adapter = load_config(path)?;
    validate_lab_config(&adapter)?;
    let config = build_lab_config(&adapter)?;
    config.validate()?;
    println!("{}: valid (strategy: {})", path.display(), config.strategy);
    Ok(())
}

pub fn format_run_summary(run: &LabRun) -> String {
    let r = &run.result;
    let mut out = format!("=== {} ===\n{}\n", run.strategy, run.strategy.description());
    if r.is_idle() {
        out.push_str("No trades generated for this strategy & parameters.\n");
        return out;
    }
    out.push_str(&format!("Return %:      {:.2}\n", r.total_return_pct));
    out.push_str(&format!("Sharpe:        {:.2}\n", r.sharpe_ratio));
    out.push_str(&format!("MaxDD %:       {:.2}\n", r.max_drawdown_pct));
    out.push_str(&format!("Trades:        {}\n", r.trade_count));
    out.push_str(&format!("Final equity:  {:.2}\n", r.final_equity()));
    out
}

pub fn format_comparison(report: &ComparisonReport) -> String {
    let mut out = format!(
        "{:<22} {:>10} {:>8} {:>10} {:>7}\n",
        "Strategy", "Return %", "Sharpe", "MaxDD %", "Trades"
    );
    for row in &report.rows {
        out.push_str(&format!(
            "{:<22} {:>10.2} {:>8.2} {:>10.2} {:>7}\n",
            row.name(),
            row.total_return_pct,
            row.sharpe_ratio,
            row.max_drawdown_pct,
            row.trade_count
        ));
    }
    out
}
