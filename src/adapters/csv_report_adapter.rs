//! CSV report adapter: per-date run table and comparison table.

use serde::Serialize;
use std::path::Path;

use crate::domain::comparison::ComparisonReport;
use crate::domain::error::LabError;
use crate::domain::pipeline::{export_rows, LabRun};
use crate::ports::report_port::ReportPort;

pub struct CsvReportAdapter;

#[derive(Debug, Serialize)]
struct ComparisonRecord<'a> {
    strategy: &'a str,
    return_pct: f64,
    sharpe: f64,
    max_drawdown_pct: f64,
    trades: usize,
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

impl CsvReportAdapter {
    pub fn write_run_to<W: std::io::Write>(run: &LabRun, writer: W) -> Result<(), LabError> {
        let mut wtr = csv::Writer::from_writer(writer);
        for row in export_rows(run) {
            wtr.serialize(row)?;
        }
        wtr.flush()?;
        Ok(())
    }

    pub fn write_comparison_to<W: std::io::Write>(
        report: &ComparisonReport,
        writer: W,
    ) -> Result<(), LabError> {
        let mut wtr = csv::Writer::from_writer(writer);
        for row in &report.rows {
            wtr.serialize(ComparisonRecord {
                strategy: row.name(),
                return_pct: round2(row.total_return_pct),
                sharpe: round2(row.sharpe_ratio),
                max_drawdown_pct: round2(row.max_drawdown_pct),
                trades: row.trade_count,
            })?;
        }
        wtr.flush()?;
        Ok(())
    }
}

impl ReportPort for CsvReportAdapter {
    fn write_run(&self, run: &LabRun, output_path: &Path) -> Result<(), LabError> {
        let file = std::fs::File::create(output_path)?;
        Self::write_run_to(run, file)?;
        tracing::info!(path = %output_path.display(), rows = run.prices.len(), "run table written");
        Ok(())
    }

    fn write_comparison(
        &self,
        report: &ComparisonReport,
        output_path: &Path,
    ) -> Result<(), LabError> {
        let file = std::fs::File::create(output_path)?;
        Self::write_comparison_to(report, file)?;
        tracing::info!(path = %output_path.display(), "comparison table written");
        Ok(())
    }
}
