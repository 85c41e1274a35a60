//! Batch screener runner.
//!
//! Iterates a ticker list sequentially, retrying transient provider
//! faults, pacing requests to stay under informal upstream rate limits,
//! and dropping failed tickers from the batch rather than aborting it.

use std::cmp::Ordering;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use super::error::ScreenerError;
use super::valuation::{evaluate, Mode, ValuationResult};
use crate::ports::data_port::FundamentalsPort;

/// Bounded retry for transient provider faults. Permanent failures
/// (missing statements, malformed data) are never retried.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            max_attempts: 3,
            backoff: Duration::from_secs(2),
        }
    }
}

/// Runner-level settings. The pacing delay is enforced between
/// consecutive tickers, never after the last one.
#[derive(Debug, Clone)]
pub struct ScreenerConfig {
    pub mode: Mode,
    pub retry: RetryPolicy,
    pub pace_delay: Duration,
}

impl Default for ScreenerConfig {
    fn default() -> Self {
        ScreenerConfig {
            mode: Mode::Normal,
            retry: RetryPolicy::default(),
            pace_delay: Duration::from_millis(1500),
        }
    }
}

/// Cooperative cancellation signal, checked between tickers and between
/// retry attempts. Cancelling returns whatever the batch holds so far.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, AtomicOrdering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(AtomicOrdering::Relaxed)
    }
}

/// Progress hook invoked after each ticker completes (successfully or
/// not) with `(processed, total)`. Purely observational.
pub type ProgressHook<'a> = &'a mut dyn FnMut(usize, usize);

/// Evaluate one ticker with bounded retry. Only transient errors consume
/// additional attempts; the backoff delay is slept between attempts.
pub fn evaluate_with_retry(
    port: &dyn FundamentalsPort,
    ticker: &str,
    mode: Mode,
    retry: &RetryPolicy,
    cancel: &CancelToken,
) -> Result<ValuationResult, ScreenerError> {
    let attempts = retry.max_attempts.max(1);
    let mut last_err = None;

    for attempt in 1..=attempts {
        if cancel.is_cancelled() {
            break;
        }
        match evaluate(port, ticker, mode) {
            Ok(result) => return Ok(result),
            Err(e) if e.is_transient() && attempt < attempts => {
                debug!(ticker, attempt, error = %e, "transient failure, retrying");
                last_err = Some(e);
                if !retry.backoff.is_zero() {
                    std::thread::sleep(retry.backoff);
                }
            }
            Err(e) => return Err(e),
        }
    }

    Err(last_err.unwrap_or_else(|| ScreenerError::StatementsUnavailable {
        ticker: ticker.to_string(),
    }))
}

/// Run the screener over a ticker list. Failed tickers are logged and
/// excluded; absence from the batch is the failure signal. The returned
/// batch is sorted by descending FCF yield, input order breaking ties.
/// Never panics and never propagates a per-ticker error.
pub fn run_screener(
    port: &dyn FundamentalsPort,
    tickers: &[String],
    config: &ScreenerConfig,
    cancel: &CancelToken,
    mut progress: Option<ProgressHook<'_>>,
) -> Vec<ValuationResult> {
    let total = tickers.len();
    let mut batch: Vec<ValuationResult> = Vec::with_capacity(total);

    for (i, ticker) in tickers.iter().enumerate() {
        if cancel.is_cancelled() {
            debug!(processed = i, total, "screener cancelled");
            break;
        }

        let ticker = ticker.trim();
        match evaluate_with_retry(port, ticker, config.mode, &config.retry, cancel) {
            Ok(result) => batch.push(result),
            Err(e) => warn!(ticker, error = %e, "skipping ticker"),
        }

        if let Some(hook) = progress.as_mut() {
            hook(i + 1, total);
        }

        if i + 1 < total && !config.pace_delay.is_zero() {
            std::thread::sleep(config.pace_delay);
        }
    }

    // Stable sort: equal yields keep input order.
    batch.sort_by(|a, b| {
        b.fcf_yield
            .partial_cmp(&a.fcf_yield)
            .unwrap_or(Ordering::Equal)
    });
    batch
}
