//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use crate::adapters::csv_report_adapter::{CsvReportAdapter, RefreshMetadata};
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::snapshot_adapter::SnapshotAdapter;
use crate::domain::config_validation::{parse_tickers, validate_screener_config};
use crate::domain::error::ScreenerError;
use crate::domain::screener::{run_screener, CancelToken, RetryPolicy, ScreenerConfig};
use crate::domain::valuation::{Mode, ValuationResult};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::FundamentalsPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "fcfscreen", about = "Free Cash Flow Yield equity screener")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the screener and write a result table
    Screen {
        #[arg(short, long)]
        config: PathBuf,
        /// Conservative methodology (working-capital and expansion-capex
        /// adjustments), overriding the configured mode
        #[arg(long)]
        conservative: bool,
        /// Comma-separated ticker list overriding the configured watchlist
        #[arg(long)]
        tickers: Option<String>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Refresh both mode tables plus the freshness metadata record
    Refresh {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Validate a screener configuration
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Screen {
            config,
            conservative,
            tickers,
            output,
        } => run_screen(&config, conservative, tickers.as_deref(), output.as_ref()),
        Command::Refresh { config } => run_refresh(&config),
        Command::Validate { config } => run_validate(&config),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = ScreenerError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

/// Build runner settings from the `[screener]` section. `conservative`
/// forces conservative mode regardless of the configured one.
pub fn build_screener_config(adapter: &dyn ConfigPort, conservative: bool) -> ScreenerConfig {
    let mode = if conservative {
        Mode::Conservative
    } else {
        adapter
            .get_string("screener", "mode")
            .and_then(|v| Mode::parse(&v))
            .unwrap_or(Mode::Normal)
    };

    ScreenerConfig {
        mode,
        retry: RetryPolicy {
            max_attempts: adapter.get_int("screener", "max_attempts", 3).max(1) as u32,
            backoff: Duration::from_millis(adapter.get_int("screener", "backoff_ms", 2000) as u64),
        },
        pace_delay: Duration::from_millis(adapter.get_int("screener", "pace_ms", 1500) as u64),
    }
}

/// Ticker list from the CLI override or the configured watchlist.
pub fn resolve_tickers(
    override_list: Option<&str>,
    adapter: &dyn ConfigPort,
) -> Result<Vec<String>, ScreenerError> {
    let raw = match override_list {
        Some(list) => list.to_string(),
        None => adapter.get_string("screener", "tickers").ok_or_else(|| {
            ScreenerError::ConfigMissing {
                section: "screener".into(),
                key: "tickers".into(),
            }
        })?,
    };
    Ok(parse_tickers(&raw)?)
}

fn build_data_port(adapter: &dyn ConfigPort) -> Result<SnapshotAdapter, ScreenerError> {
    let dir = adapter.get_string("data", "snapshot_dir").ok_or_else(|| {
        ScreenerError::ConfigMissing {
            section: "data".into(),
            key: "snapshot_dir".into(),
        }
    })?;
    Ok(SnapshotAdapter::new(PathBuf::from(dir)))
}

fn output_dir(adapter: &dyn ConfigPort) -> PathBuf {
    PathBuf::from(
        adapter
            .get_string("output", "dir")
            .unwrap_or_else(|| "data".to_string()),
    )
}

fn screen_with_progress(
    port: &dyn FundamentalsPort,
    tickers: &[String],
    config: &ScreenerConfig,
) -> Vec<ValuationResult> {
    let mut progress = |done: usize, total: usize| {
        eprintln!("  [{done}/{total}] {}", tickers[done - 1]);
    };
    run_screener(port, tickers, config, &CancelToken::new(), Some(&mut progress))
}

fn run_screen(
    config_path: &PathBuf,
    conservative: bool,
    ticker_override: Option<&str>,
    output_path: Option<&PathBuf>,
) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_screener_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let screener_config = build_screener_config(&adapter, conservative);
    let tickers = match resolve_tickers(ticker_override, &adapter) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let port = match build_data_port(&adapter) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprintln!(
        "Screening {} tickers ({} mode)...",
        tickers.len(),
        screener_config.mode.name()
    );
    let batch = screen_with_progress(&port, &tickers, &screener_config);
    eprintln!("{} of {} tickers evaluated", batch.len(), tickers.len());

    let default_path;
    let path = match output_path {
        Some(p) => p,
        None => {
            let dir = output_dir(&adapter);
            default_path = dir.join(format!("screener_{}.csv", screener_config.mode.name()));
            &default_path
        }
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && let Err(e) = std::fs::create_dir_all(parent)
    {
        eprintln!("error: {e}");
        return ExitCode::from(1);
    }

    if let Err(e) = CsvReportAdapter::new().write_batch(&batch, path) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    eprintln!("Wrote {}", path.display());
    ExitCode::SUCCESS
}

fn run_refresh(config_path: &PathBuf) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_screener_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let tickers = match resolve_tickers(None, &adapter) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let port = match build_data_port(&adapter) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let dir = output_dir(&adapter);
    if let Err(e) = std::fs::create_dir_all(&dir) {
        eprintln!("error: {e}");
        return ExitCode::from(1);
    }

    let report = CsvReportAdapter::new();
    let mut ok_counts = [0usize; 2];

    for (i, conservative) in [false, true].into_iter().enumerate() {
        let screener_config = build_screener_config(&adapter, conservative);
        eprintln!(
            "Refreshing {} mode ({} tickers)...",
            screener_config.mode.name(),
            tickers.len()
        );
        let batch = screen_with_progress(&port, &tickers, &screener_config);
        ok_counts[i] = batch.len();

        let path = dir.join(format!("screener_{}.csv", screener_config.mode.name()));
        if let Err(e) = report.write_batch(&batch, &path) {
            eprintln!("error: {e}");
            return (&e).into();
        }
        eprintln!("Wrote {} ({} tickers)", path.display(), batch.len());
    }

    let meta = RefreshMetadata {
        last_updated: chrono::Utc::now().to_rfc3339(),
        tickers_total: tickers.len(),
        tickers_normal_ok: ok_counts[0],
        tickers_conservative_ok: ok_counts[1],
    };
    let meta_path = dir.join("metadata.json");
    if let Err(e) = report.write_metadata(&meta, &meta_path) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    eprintln!("Wrote {}", meta_path.display());
    ExitCode::SUCCESS
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    match validate_screener_config(&adapter) {
        Ok(()) => {
            eprintln!("Config OK");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}
