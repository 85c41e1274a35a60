//! Domain error types.

/// Watchlist parsing errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum WatchlistError {
    #[error("empty token in ticker list")]
    EmptyToken,

    #[error("duplicate ticker: {0}")]
    DuplicateTicker(String),
}

/// Top-level error type for fcfscreen.
#[derive(Debug, thiserror::Error)]
pub enum ScreenerError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Watchlist(#[from] WatchlistError),

    /// No usable cash-flow or income statement for the ticker. Permanent;
    /// the ticker is dropped from the batch without retrying.
    #[error("no usable statements for {ticker}")]
    StatementsUnavailable { ticker: String },

    /// Transient upstream fault (timeout, throttling, connection drop).
    /// Eligible for retry.
    #[error("provider error for {ticker}: {reason}")]
    Provider { ticker: String, reason: String },

    /// Malformed snapshot data on disk. Permanent.
    #[error("snapshot read error at {path}: {reason}")]
    SnapshotRead { path: String, reason: String },

    #[error("report write error at {path}: {reason}")]
    Report { path: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ScreenerError {
    /// Whether a retry could plausibly succeed. Statement absence and
    /// malformed data are permanent; only upstream faults are transient.
    pub fn is_transient(&self) -> bool {
        matches!(self, ScreenerError::Provider { .. })
    }
}

impl From<&ScreenerError> for std::process::ExitCode {
    fn from(err: &ScreenerError) -> Self {
        let code: u8 = match err {
            ScreenerError::Io(_) => 1,
            ScreenerError::ConfigParse { .. }
            | ScreenerError::ConfigMissing { .. }
            | ScreenerError::ConfigInvalid { .. } => 2,
            ScreenerError::Provider { .. } | ScreenerError::SnapshotRead { .. } => 3,
            ScreenerError::Watchlist(_) => 4,
            ScreenerError::StatementsUnavailable { .. } => 5,
            ScreenerError::Report { .. } => 6,
        };
        std::process::ExitCode::from(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_errors_are_transient() {
        let err = ScreenerError::Provider {
            ticker: "AAPL".into(),
            reason: "429 too many requests".into(),
        };
        assert!(err.is_transient());
    }

    #[test]
    fn statement_absence_is_permanent() {
        let err = ScreenerError::StatementsUnavailable {
            ticker: "AAPL".into(),
        };
        assert!(!err.is_transient());
    }

    #[test]
    fn snapshot_read_is_permanent() {
        let err = ScreenerError::SnapshotRead {
            path: "/data/AAPL_cashflow.csv".into(),
            reason: "bad row".into(),
        };
        assert!(!err.is_transient());
    }
}
