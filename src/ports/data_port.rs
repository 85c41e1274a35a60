//! Fundamentals data access port trait.

use crate::domain::error::ScreenerError;
use crate::domain::snapshot::CompanySnapshot;

/// Source of per-ticker financial statements and market metadata.
///
/// Implementations signal transient upstream faults with
/// [`ScreenerError::Provider`] so the runner can retry them; anything
/// else is treated as permanent.
pub trait FundamentalsPort {
    fn fetch_company(&self, ticker: &str) -> Result<CompanySnapshot, ScreenerError>;
}
