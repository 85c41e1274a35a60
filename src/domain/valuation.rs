//! FCF valuation pipeline.
//!
//! Methodology:
//!   FCF   = FCO (or adjusted FCO) + capex − interest − taxes − leases
//!   Yield = FCF / market cap
//!
//! Conservative mode additionally subtracts the working-capital delta
//! from FCO and caps capex at the depreciation level when it looks like
//! expansion spending rather than maintenance.

use serde::Serialize;

use super::classify::{self, Status};
use super::error::ScreenerError;
use super::growth::revenue_growth;
use super::snapshot::CompanySnapshot;
use super::statement::{resolve, resolve_series, StatementTable};
use crate::ports::data_port::FundamentalsPort;

/// Capex beyond this multiple of depreciation is treated as expansion
/// spending in conservative mode.
const EXPANSION_CAPEX_RATIO: f64 = 1.5;

const SECTOR_UNKNOWN: &str = "Unknown";

// Candidate line-item labels, preferred reporting convention first.
const FCO_LABELS: [&str; 3] = [
    "Operating Cash Flow",
    "Total Cash From Operating Activities",
    "Cash Flow From Continuing Operating Activities",
];
const WORKING_CAPITAL_LABELS: [&str; 1] = ["Change In Working Capital"];
const CAPEX_LABELS: [&str; 3] = [
    "Capital Expenditure",
    "Capital Expenditures",
    "Purchase Of PPE",
];
const DEPRECIATION_CF_LABELS: [&str; 2] = [
    "Depreciation Amortization Depletion",
    "Depreciation And Amortization",
];
const DEPRECIATION_INC_LABELS: [&str; 2] = ["Depreciation And Amortization", "Depreciation"];
const INTEREST_INC_LABELS: [&str; 2] = ["Interest Expense", "Interest Expense Non Operating"];
const INTEREST_CF_LABELS: [&str; 2] = ["Interest Paid Supplemental Data", "Interest Paid Cff"];
const TAX_INC_LABELS: [&str; 2] = ["Tax Provision", "Income Tax Expense"];
const TAX_CF_LABELS: [&str; 2] = ["Income Tax Paid Supplemental Data", "Taxes Refund Paid"];
const LEASE_LABELS: [&str; 2] = ["Capital Lease Obligations", "Lease Liabilities"];
const LEASE_LONG_TERM_LABEL: [&str; 1] = ["Long Term Capital Lease Obligation"];
const LEASE_CURRENT_LABEL: [&str; 1] = ["Current Capital Lease Obligation"];
const REVENUE_LABELS: [&str; 2] = ["Total Revenue", "Revenue"];

/// Valuation methodology.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Conservative,
}

impl Mode {
    pub fn is_conservative(self) -> bool {
        self == Mode::Conservative
    }

    pub fn parse(value: &str) -> Option<Mode> {
        match value.to_lowercase().as_str() {
            "normal" => Some(Mode::Normal),
            "conservative" => Some(Mode::Conservative),
            _ => None,
        }
    }

    /// Lowercase name used for config values and output file names.
    pub fn name(self) -> &'static str {
        match self {
            Mode::Normal => "normal",
            Mode::Conservative => "conservative",
        }
    }
}

/// Flat record of primitives extracted from a snapshot. Every value
/// defaults to `0.0` when unresolved — "unknown" and "zero" are
/// identical by design.
#[derive(Debug, Clone)]
pub struct ResolvedFinancials {
    pub fco: f64,
    pub working_capital_delta: f64,
    /// Normalized non-positive (outflow convention) regardless of the
    /// source's sign convention.
    pub capex_raw: f64,
    pub depreciation: f64,
    pub interest: f64,
    pub taxes: f64,
    pub leases: f64,
    pub market_cap: f64,
    pub price: f64,
    pub sector: String,
    /// Revenue series, most-recent-first, NaN entries retained.
    pub revenue: Vec<f64>,
}

impl ResolvedFinancials {
    pub fn extract(snapshot: &CompanySnapshot) -> Self {
        let cf = &snapshot.cash_flow;
        let inc = &snapshot.income;
        let bs = &snapshot.balance_sheet;

        let fco = resolve(cf, &FCO_LABELS);
        let working_capital_delta = resolve(cf, &WORKING_CAPITAL_LABELS);

        let capex = resolve(cf, &CAPEX_LABELS);
        let capex_raw = if capex > 0.0 { -capex } else { capex };

        let mut depreciation = resolve(cf, &DEPRECIATION_CF_LABELS);
        if depreciation == 0.0 {
            depreciation = resolve(inc, &DEPRECIATION_INC_LABELS);
        }

        let mut interest = resolve(inc, &INTEREST_INC_LABELS).abs();
        if interest == 0.0 {
            interest = resolve(cf, &INTEREST_CF_LABELS).abs();
        }

        let mut taxes = resolve(inc, &TAX_INC_LABELS).abs();
        if taxes == 0.0 {
            taxes = resolve(cf, &TAX_CF_LABELS).abs();
        }

        let leases = resolve_leases(bs);

        ResolvedFinancials {
            fco,
            working_capital_delta,
            capex_raw,
            depreciation,
            interest,
            taxes,
            leases,
            market_cap: snapshot.summary.market_cap(),
            price: snapshot.summary.price(),
            sector: snapshot
                .summary
                .sector
                .clone()
                .unwrap_or_else(|| SECTOR_UNKNOWN.to_string()),
            revenue: resolve_series(inc, &REVENUE_LABELS),
        }
    }
}

fn resolve_leases(balance_sheet: &StatementTable) -> f64 {
    if balance_sheet.is_empty() {
        return 0.0;
    }
    let leases = resolve(balance_sheet, &LEASE_LABELS).abs();
    if leases != 0.0 {
        return leases;
    }
    // Primary labels absent: sum the split long-term and current lines.
    resolve(balance_sheet, &LEASE_LONG_TERM_LABEL).abs()
        + resolve(balance_sheet, &LEASE_CURRENT_LABEL).abs()
}

/// Output record for one entity. Immutable once produced; the runner only
/// collects and sorts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValuationResult {
    #[serde(rename = "Ticker")]
    pub ticker: String,
    #[serde(rename = "Price")]
    pub price: f64,
    #[serde(rename = "Market Cap")]
    pub market_cap: f64,
    #[serde(rename = "FCO")]
    pub fco: f64,
    #[serde(rename = "Adjusted FCO")]
    pub adjusted_fco: f64,
    #[serde(rename = "Capex")]
    pub capex: f64,
    #[serde(rename = "Capex (Raw)")]
    pub capex_raw: f64,
    #[serde(rename = "Depreciation")]
    pub depreciation: f64,
    #[serde(rename = "Expansion Adjusted")]
    pub expansion_adjusted: bool,
    #[serde(rename = "Interest")]
    pub interest: f64,
    #[serde(rename = "Taxes")]
    pub taxes: f64,
    #[serde(rename = "Leases")]
    pub leases: f64,
    #[serde(rename = "FCF")]
    pub fcf: f64,
    /// Decimal ratio, not a percentage.
    #[serde(rename = "FCF Yield")]
    pub fcf_yield: f64,
    /// Decimal ratio, not a percentage.
    #[serde(rename = "Rev Growth 5Y")]
    pub revenue_growth_5y: f64,
    #[serde(rename = "Sector")]
    pub sector: String,
    #[serde(rename = "Status")]
    pub status: Status,
}

/// Pure valuation of one snapshot. Fails only when the cash-flow or
/// income statement is entirely unavailable; every line-item-level
/// absence degrades to `0.0` instead.
pub fn value_snapshot(
    ticker: &str,
    snapshot: &CompanySnapshot,
    mode: Mode,
) -> Result<ValuationResult, ScreenerError> {
    if !snapshot.has_core_statements() {
        return Err(ScreenerError::StatementsUnavailable {
            ticker: ticker.to_string(),
        });
    }

    let fin = ResolvedFinancials::extract(snapshot);

    let adjusted_fco = if mode.is_conservative() {
        fin.fco - fin.working_capital_delta
    } else {
        fin.fco
    };

    // Expansion adjustment: capex well beyond depreciation funds growth,
    // not replacement; conservative mode caps it at maintenance level.
    let mut capex = fin.capex_raw;
    let mut expansion_adjusted = false;
    if mode.is_conservative()
        && fin.depreciation != 0.0
        && fin.capex_raw.abs() > fin.depreciation.abs() * EXPANSION_CAPEX_RATIO
    {
        capex = -fin.depreciation.abs();
        expansion_adjusted = true;
    }

    let fcf = adjusted_fco + capex - fin.interest - fin.taxes - fin.leases;

    let fcf_yield = if fin.market_cap != 0.0 {
        fcf / fin.market_cap
    } else {
        0.0
    };

    let revenue_growth_5y = revenue_growth(&fin.revenue);
    let status = classify::classify(fcf_yield, &fin.sector);

    Ok(ValuationResult {
        ticker: ticker.to_string(),
        price: fin.price,
        market_cap: fin.market_cap,
        fco: fin.fco,
        adjusted_fco,
        capex,
        capex_raw: fin.capex_raw,
        depreciation: fin.depreciation,
        expansion_adjusted,
        interest: fin.interest,
        taxes: fin.taxes,
        leases: fin.leases,
        fcf,
        fcf_yield,
        revenue_growth_5y,
        sector: fin.sector,
        status,
    })
}

/// Fetch a ticker through the data port and value it.
pub fn evaluate(
    port: &dyn FundamentalsPort,
    ticker: &str,
    mode: Mode,
) -> Result<ValuationResult, ScreenerError> {
    let snapshot = port.fetch_company(ticker)?;
    value_snapshot(ticker, &snapshot, mode)
}
