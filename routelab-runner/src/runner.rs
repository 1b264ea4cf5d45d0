//! Backtest runner — wires together validation, search, baselines, and report.
//!
//! Two entry points:
//! - `run_backtest()`: takes pre-loaded snapshots. Used by tests and callers
//!   that manage their own data.
//! - `run_backtest_from_csv()`: loads snapshots from an L1 CSV first. Used by
//!   the CLI.

use std::path::Path;
use thiserror::Error;

use routelab_core::domain::{validate_snapshots, QuoteError, Snapshot};
use routelab_core::{best_ask, twap, vwap};

use crate::config::{BacktestConfig, ConfigError};
use crate::data_loader::{load_snapshots, LoadError};
use crate::report::{build_report, BacktestReport};
use crate::search::{ParamGrid, ParamSweep};

/// Errors from the runner.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("data error: {0}")]
    Load(#[from] LoadError),
    #[error("invalid snapshot data: {0}")]
    Quote(#[from] QuoteError),
    #[error("parameter grid expanded to zero values")]
    EmptyGrid,
}

/// Run the full pipeline on pre-loaded snapshots.
///
/// Validates config and data, sweeps the parameter grid (rayon-parallel),
/// evaluates the three baselines, and assembles the report. Deterministic:
/// identical snapshots and config always produce an identical report.
pub fn run_backtest(
    snapshots: &[Snapshot],
    config: &BacktestConfig,
) -> Result<BacktestReport, RunError> {
    config.validate()?;
    validate_snapshots(snapshots)?;

    let order = config.order_spec();
    let grid = ParamGrid::from(config.param_grid);

    let best = ParamSweep::new()
        .sweep(snapshots, order, &grid)
        .ok_or(RunError::EmptyGrid)?;

    let best_ask_out = best_ask(snapshots, order);
    let twap_out = twap(snapshots, order);
    let vwap_out = vwap(snapshots, order);

    Ok(build_report(&best, best_ask_out, twap_out, vwap_out, order))
}

/// Load snapshots from an L1 CSV, then run the full pipeline.
pub fn run_backtest_from_csv(
    path: &Path,
    config: &BacktestConfig,
) -> Result<BacktestReport, RunError> {
    config.validate()?;
    let loaded = load_snapshots(path, config)?;
    run_backtest(&loaded.snapshots, config)
}
