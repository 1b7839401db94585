//! CSV report adapter.
//!
//! Writes a backtest's trade log as CSV, one row per execution attempt.
//! The summary figures stay on stdout (the CLI prints them); the log
//! file is the machine-readable artifact.

use crate::domain::backtest::BacktestResult;
use crate::domain::error::TraderError;
use crate::ports::report_port::ReportPort;

pub struct CsvReportAdapter;

impl ReportPort for CsvReportAdapter {
    fn write(&self, result: &BacktestResult, output_path: &str) -> Result<(), TraderError> {
        let mut writer = csv::Writer::from_path(output_path).map_err(|e| TraderError::Report {
            reason: format!("failed to create {}: {}", output_path, e),
        })?;
        for record in &result.trade_log {
            writer.serialize(record).map_err(|e| TraderError::Report {
                reason: format!("failed to write trade record: {}", e),
            })?;
        }
        writer.flush().map_err(|e| TraderError::Report {
            reason: format!("failed to flush {}: {}", output_path, e),
        })?;
        Ok(())
    }
}
