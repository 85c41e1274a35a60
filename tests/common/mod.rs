#![allow(dead_code)]

use fcfscreen::domain::error::ScreenerError;
use fcfscreen::domain::snapshot::{CompanySnapshot, MarketSummary};
use fcfscreen::ports::data_port::FundamentalsPort;
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory fundamentals port: tickers resolve to fixture snapshots,
/// fail permanently, or fail transiently a set number of times.
pub struct MockFundamentalsPort {
    pub snapshots: HashMap<String, CompanySnapshot>,
    pub transient_failures: RefCell<HashMap<String, u32>>,
    pub calls: RefCell<Vec<String>>,
}

impl MockFundamentalsPort {
    pub fn new() -> Self {
        Self {
            snapshots: HashMap::new(),
            transient_failures: RefCell::new(HashMap::new()),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn with_snapshot(mut self, ticker: &str, snapshot: CompanySnapshot) -> Self {
        self.snapshots.insert(ticker.to_string(), snapshot);
        self
    }

    pub fn with_transient_failures(self, ticker: &str, count: u32) -> Self {
        self.transient_failures
            .borrow_mut()
            .insert(ticker.to_string(), count);
        self
    }

    pub fn call_count(&self, ticker: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|t| t.as_str() == ticker)
            .count()
    }
}

impl FundamentalsPort for MockFundamentalsPort {
    fn fetch_company(&self, ticker: &str) -> Result<CompanySnapshot, ScreenerError> {
        self.calls.borrow_mut().push(ticker.to_string());

        let mut failures = self.transient_failures.borrow_mut();
        if let Some(remaining) = failures.get_mut(ticker) {
            if *remaining > 0 {
                *remaining -= 1;
                return Err(ScreenerError::Provider {
                    ticker: ticker.to_string(),
                    reason: "simulated timeout".into(),
                });
            }
        }

        self.snapshots
            .get(ticker)
            .cloned()
            .ok_or_else(|| ScreenerError::StatementsUnavailable {
                ticker: ticker.to_string(),
            })
    }
}

/// A complete fixture snapshot with every metric the pipeline touches.
pub fn full_snapshot(sector: &str, market_cap: f64) -> CompanySnapshot {
    let mut snap = CompanySnapshot::default();
    snap.cash_flow.insert("Operating Cash Flow", vec![1_000.0]);
    snap.cash_flow
        .insert("Change In Working Capital", vec![200.0]);
    snap.cash_flow.insert("Capital Expenditure", vec![-300.0]);
    snap.cash_flow
        .insert("Depreciation And Amortization", vec![250.0]);
    snap.income.insert("Interest Expense", vec![-50.0]);
    snap.income.insert("Tax Provision", vec![100.0]);
    snap.income
        .insert("Total Revenue", vec![121.0, 110.0, 100.0]);
    snap.balance_sheet
        .insert("Capital Lease Obligations", vec![40.0]);
    snap.summary = MarketSummary {
        market_cap: Some(market_cap),
        shares_outstanding: None,
        current_price: Some(25.0),
        previous_close: None,
        sector: Some(sector.to_string()),
    };
    snap
}

/// A minimal snapshot with only FCO, revenue and market cap resolved.
pub fn minimal_snapshot(fco: f64, market_cap: f64) -> CompanySnapshot {
    let mut snap = CompanySnapshot::default();
    snap.cash_flow.insert("Operating Cash Flow", vec![fco]);
    snap.income.insert("Total Revenue", vec![100.0]);
    snap.summary.market_cap = Some(market_cap);
    snap
}
