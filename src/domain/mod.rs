//! Core valuation engine: statement resolution, FCF calculation,
//! classification, and the batch screener runner.

pub mod statement;
pub mod snapshot;
pub mod valuation;
pub mod growth;
pub mod classify;
pub mod screener;
pub mod config_validation;
pub mod error;
