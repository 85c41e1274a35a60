//! fcfscreen — Free Cash Flow Yield equity screener.
//!
//! Hexagonal architecture: engine logic in [`domain`], port traits in
//! [`ports`], concrete implementations in [`adapters`].

pub mod cli;
pub mod domain;
pub mod ports;
pub mod adapters;
