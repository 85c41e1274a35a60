//! Snapshot-file fundamentals adapter.
//!
//! Reads per-ticker statement snapshots from a directory:
//!
//! - `<TICKER>_cashflow.csv`, `<TICKER>_income.csv`, `<TICKER>_balance.csv`
//!   — headerless rows of `label,v0,v1,...` with values most-recent-first;
//!   empty cells become NaN.
//! - `<TICKER>_summary.json` — market metadata record.
//!
//! A missing statement file is read as an empty table so the calculator
//! applies its own fatal-statement rule; a missing summary file yields an
//! all-absent summary.

use crate::domain::error::ScreenerError;
use crate::domain::snapshot::{CompanySnapshot, MarketSummary};
use crate::domain::statement::StatementTable;
use crate::ports::data_port::FundamentalsPort;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub struct SnapshotAdapter {
    base_path: PathBuf,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryRecord {
    market_cap: Option<f64>,
    shares_outstanding: Option<f64>,
    current_price: Option<f64>,
    previous_close: Option<f64>,
    sector: Option<String>,
}

impl SnapshotAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn statement_path(&self, ticker: &str, kind: &str) -> PathBuf {
        self.base_path.join(format!("{ticker}_{kind}.csv"))
    }

    fn read_statement(&self, ticker: &str, kind: &str) -> Result<StatementTable, ScreenerError> {
        let path = self.statement_path(ticker, kind);
        if !path.exists() {
            return Ok(StatementTable::new());
        }
        let content = fs::read_to_string(&path).map_err(|e| ScreenerError::SnapshotRead {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        parse_statement(&content, &path)
    }

    fn read_summary(&self, ticker: &str) -> Result<MarketSummary, ScreenerError> {
        let path = self.base_path.join(format!("{ticker}_summary.json"));
        if !path.exists() {
            return Ok(MarketSummary::default());
        }
        let content = fs::read_to_string(&path).map_err(|e| ScreenerError::SnapshotRead {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let record: SummaryRecord =
            serde_json::from_str(&content).map_err(|e| ScreenerError::SnapshotRead {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        Ok(MarketSummary {
            market_cap: record.market_cap,
            shares_outstanding: record.shares_outstanding,
            current_price: record.current_price,
            previous_close: record.previous_close,
            sector: record.sector,
        })
    }
}

fn parse_statement(content: &str, path: &Path) -> Result<StatementTable, ScreenerError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut table = StatementTable::new();
    for result in rdr.records() {
        let record = result.map_err(|e| ScreenerError::SnapshotRead {
            path: path.display().to_string(),
            reason: format!("CSV parse error: {e}"),
        })?;

        let mut fields = record.iter();
        let Some(label) = fields.next() else {
            continue;
        };
        if label.trim().is_empty() {
            continue;
        }

        let mut values = Vec::new();
        for field in fields {
            let trimmed = field.trim();
            if trimmed.is_empty() {
                values.push(f64::NAN);
                continue;
            }
            let value: f64 = trimmed.parse().map_err(|_| ScreenerError::SnapshotRead {
                path: path.display().to_string(),
                reason: format!("invalid numeric value '{trimmed}' for '{label}'"),
            })?;
            values.push(value);
        }
        table.insert(label.trim(), values);
    }

    Ok(table)
}

impl FundamentalsPort for SnapshotAdapter {
    fn fetch_company(&self, ticker: &str) -> Result<CompanySnapshot, ScreenerError> {
        Ok(CompanySnapshot {
            cash_flow: self.read_statement(ticker, "cashflow")?,
            income: self.read_statement(ticker, "income")?,
            balance_sheet: self.read_statement(ticker, "balance")?,
            summary: self.read_summary(ticker)?,
        })
    }
}
