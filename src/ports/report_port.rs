//! Report export port trait.

use std::path::Path;

use crate::domain::comparison::ComparisonReport;
use crate::domain::error::LabError;
use crate::domain::pipeline::LabRun;

/// Port for writing computed results. Writers serialise; they never compute.
pub trait ReportPort {
    /// Per-date table for the selected strategy.
    fn write_run(&self, run: &LabRun, output_path: &Path) -> Result<(), LabError>;

    fn write_comparison(
        &self,
        report: &ComparisonReport,
        output_path: &Path,
    ) -> Result<(), LabError>;
}
