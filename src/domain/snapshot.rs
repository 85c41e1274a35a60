//! Per-entity data bundle as supplied by the fundamentals provider.

use super::statement::StatementTable;

/// Quote and profile metadata for one entity. Every field is optional —
/// the provider may omit any of them.
#[derive(Debug, Clone, Default)]
pub struct MarketSummary {
    pub market_cap: Option<f64>,
    pub shares_outstanding: Option<f64>,
    pub current_price: Option<f64>,
    pub previous_close: Option<f64>,
    pub sector: Option<String>,
}

impl MarketSummary {
    /// Current price falling back to previous close, `0.0` when neither
    /// is reported.
    pub fn price(&self) -> f64 {
        self.current_price.or(self.previous_close).unwrap_or(0.0)
    }

    /// Reported market cap, or `shares_outstanding × price` when the
    /// provider omits it. Both factors must be non-zero for the
    /// reconstruction; otherwise `0.0`.
    pub fn market_cap(&self) -> f64 {
        if let Some(cap) = self.market_cap
            && cap != 0.0
        {
            return cap;
        }
        let shares = self.shares_outstanding.unwrap_or(0.0);
        let price = self.price();
        if shares != 0.0 && price != 0.0 {
            shares * price
        } else {
            0.0
        }
    }
}

/// Everything the provider returns for one ticker: the three statement
/// tables plus the market summary. Read-only input to the calculator.
#[derive(Debug, Clone, Default)]
pub struct CompanySnapshot {
    pub cash_flow: StatementTable,
    pub income: StatementTable,
    pub balance_sheet: StatementTable,
    pub summary: MarketSummary,
}

impl CompanySnapshot {
    /// The calculator refuses entities missing either core statement;
    /// the balance sheet alone being absent is tolerated.
    pub fn has_core_statements(&self) -> bool {
        !self.cash_flow.is_empty() && !self.income.is_empty()
    }
}
