//! RouteLab Runner — backtest orchestration, parameter search, reporting.
//!
//! This crate builds on `routelab-core` to provide:
//! - L1 CSV snapshot loading with validation and dedup (plus deterministic
//!   synthetic generation for offline runs)
//! - TOML-backed run configuration with fail-fast validation
//! - Rayon-parallel exhaustive grid search over the router's risk parameters
//! - Report building: basis-point savings of the tuned router versus the
//!   best-ask, TWAP, and VWAP baselines

pub mod config;
pub mod data_loader;
pub mod report;
pub mod runner;
pub mod search;

pub use config::{BacktestConfig, ConfigError, GridConfig};
pub use data_loader::{
    compute_dataset_hash, generate_synthetic_snapshots, load_snapshots, LoadError, LoadedSnapshots,
};
pub use report::{build_report, savings_bps, twap_savings_bps, BacktestReport, ExecutionSummary};
pub use runner::{run_backtest, run_backtest_from_csv, RunError};
pub use search::{ParamGrid, ParamSweep, TrialResult};
