//! Screener configuration validation.
//!
//! Validates all config fields before a screening run starts.

use super::error::{ScreenerError, WatchlistError};
use super::valuation::Mode;
use crate::ports::config_port::ConfigPort;
use std::collections::HashSet;

pub fn validate_screener_config(config: &dyn ConfigPort) -> Result<(), ScreenerError> {
    validate_mode(config)?;
    validate_max_attempts(config)?;
    validate_backoff(config)?;
    validate_pace(config)?;
    validate_tickers(config)?;
    validate_snapshot_dir(config)?;
    Ok(())
}

fn validate_mode(config: &dyn ConfigPort) -> Result<(), ScreenerError> {
    if let Some(value) = config.get_string("screener", "mode") {
        if Mode::parse(&value).is_none() {
            return Err(ScreenerError::ConfigInvalid {
                section: "screener".to_string(),
                key: "mode".to_string(),
                reason: format!("unknown mode '{value}' (expected normal or conservative)"),
            });
        }
    }
    Ok(())
}

fn validate_max_attempts(config: &dyn ConfigPort) -> Result<(), ScreenerError> {
    let value = config.get_int("screener", "max_attempts", 3);
    if value < 1 {
        return Err(ScreenerError::ConfigInvalid {
            section: "screener".to_string(),
            key: "max_attempts".to_string(),
            reason: "max_attempts must be at least 1".to_string(),
        });
    }
    Ok(())
}

fn validate_backoff(config: &dyn ConfigPort) -> Result<(), ScreenerError> {
    let value = config.get_int("screener", "backoff_ms", 2000);
    if value < 0 {
        return Err(ScreenerError::ConfigInvalid {
            section: "screener".to_string(),
            key: "backoff_ms".to_string(),
            reason: "backoff_ms must be non-negative".to_string(),
        });
    }
    Ok(())
}

fn validate_pace(config: &dyn ConfigPort) -> Result<(), ScreenerError> {
    let value = config.get_int("screener", "pace_ms", 1500);
    if value < 0 {
        return Err(ScreenerError::ConfigInvalid {
            section: "screener".to_string(),
            key: "pace_ms".to_string(),
            reason: "pace_ms must be non-negative".to_string(),
        });
    }
    Ok(())
}

fn validate_tickers(config: &dyn ConfigPort) -> Result<(), ScreenerError> {
    let value = config.get_string("screener", "tickers").ok_or_else(|| {
        ScreenerError::ConfigMissing {
            section: "screener".to_string(),
            key: "tickers".to_string(),
        }
    })?;
    parse_tickers(&value)?;
    Ok(())
}

fn validate_snapshot_dir(config: &dyn ConfigPort) -> Result<(), ScreenerError> {
    config
        .get_string("data", "snapshot_dir")
        .ok_or_else(|| ScreenerError::ConfigMissing {
            section: "data".to_string(),
            key: "snapshot_dir".to_string(),
        })?;
    Ok(())
}

/// Parse a comma-separated watchlist. Tickers are upper-cased; empty
/// tokens and duplicates are rejected.
pub fn parse_tickers(input: &str) -> Result<Vec<String>, WatchlistError> {
    let mut tickers = Vec::new();
    let mut seen = HashSet::new();

    for token in input.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(WatchlistError::EmptyToken);
        }
        let ticker = trimmed.to_uppercase();
        if seen.contains(&ticker) {
            return Err(WatchlistError::DuplicateTicker(ticker));
        }
        seen.insert(ticker.clone());
        tickers.push(ticker);
    }

    Ok(tickers)
}
