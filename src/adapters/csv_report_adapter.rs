//! CSV report adapter: result table plus a freshness metadata record.

use crate::domain::error::ScreenerError;
use crate::domain::valuation::ValuationResult;
use crate::ports::report_port::ReportPort;
use serde::Serialize;
use std::fs;
use std::path::Path;

pub struct CsvReportAdapter;

/// Companion freshness record written next to the result tables after a
/// refresh run.
#[derive(Debug, Clone, Serialize)]
pub struct RefreshMetadata {
    /// UTC ISO-8601 timestamp of the refresh.
    pub last_updated: String,
    pub tickers_total: usize,
    pub tickers_normal_ok: usize,
    pub tickers_conservative_ok: usize,
}

impl CsvReportAdapter {
    pub fn new() -> Self {
        Self
    }

    pub fn write_metadata(&self, meta: &RefreshMetadata, path: &Path) -> Result<(), ScreenerError> {
        let json = serde_json::to_string_pretty(meta).map_err(|e| ScreenerError::Report {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        fs::write(path, json).map_err(|e| ScreenerError::Report {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}

impl Default for CsvReportAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportPort for CsvReportAdapter {
    fn write_batch(&self, batch: &[ValuationResult], path: &Path) -> Result<(), ScreenerError> {
        let mut wtr = csv::Writer::from_path(path).map_err(|e| ScreenerError::Report {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        for result in batch {
            wtr.serialize(result).map_err(|e| ScreenerError::Report {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        }

        wtr.flush().map_err(|e| ScreenerError::Report {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::classify::Status;
    use tempfile::TempDir;

    fn sample_result(ticker: &str, fcf_yield: f64) -> ValuationResult {
        ValuationResult {
            ticker: ticker.to_string(),
            price: 25.0,
            market_cap: 10_000.0,
            fco: 1_000.0,
            adjusted_fco: 1_000.0,
            capex: -300.0,
            capex_raw: -300.0,
            depreciation: 250.0,
            expansion_adjusted: false,
            interest: 50.0,
            taxes: 100.0,
            leases: 40.0,
            fcf: 510.0,
            fcf_yield,
            revenue_growth_5y: 0.10,
            sector: "Technology".to_string(),
            status: Status::Expensive,
        }
    }

    #[test]
    fn writes_header_and_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("screener_normal.csv");
        let batch = vec![sample_result("AAPL", 0.051), sample_result("MSFT", 0.045)];

        CsvReportAdapter::new().write_batch(&batch, &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("Ticker,Price,Market Cap,FCO,Adjusted FCO"));
        assert!(header.ends_with("Sector,Status"));
        assert_eq!(lines.count(), 2);
        assert!(content.contains("AAPL"));
        assert!(content.contains("Expensive"));
    }

    #[test]
    fn empty_batch_still_writes_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.csv");

        CsvReportAdapter::new().write_batch(&[], &path).unwrap();

        assert!(path.exists());
    }

    #[test]
    fn metadata_round_trips_as_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("metadata.json");
        let meta = RefreshMetadata {
            last_updated: "2026-08-25T06:00:00Z".to_string(),
            tickers_total: 200,
            tickers_normal_ok: 180,
            tickers_conservative_ok: 178,
        };

        CsvReportAdapter::new().write_metadata(&meta, &path).unwrap();

        let parsed: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed["tickers_total"], 200);
        assert_eq!(parsed["last_updated"], "2026-08-25T06:00:00Z");
    }

    #[test]
    fn unwritable_path_is_report_error() {
        let err = CsvReportAdapter::new()
            .write_batch(&[], Path::new("/nonexistent/dir/out.csv"))
            .unwrap_err();
        assert!(matches!(err, ScreenerError::Report { .. }));
    }
}
