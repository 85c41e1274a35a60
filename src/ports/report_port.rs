//! Report generation port trait.

use crate::domain::error::ScreenerError;
use crate::domain::valuation::ValuationResult;
use std::path::Path;

/// Port for persisting a screener batch as a tabular report.
pub trait ReportPort {
    fn write_batch(&self, batch: &[ValuationResult], path: &Path) -> Result<(), ScreenerError>;
}
