//! RouteLab CLI — run backtests and inspect snapshot files.
//!
//! Commands:
//! - `run` — load an L1 CSV (or synthesize snapshots), sweep the parameter
//!   grid, and print the JSON report
//! - `inspect` — summarize a snapshot file: snapshot count, venues, time range

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use routelab_runner::{
    generate_synthetic_snapshots, load_snapshots, run_backtest, BacktestConfig, LoadedSnapshots,
};

#[derive(Parser)]
#[command(
    name = "routelab",
    about = "RouteLab CLI — smart order-router backtesting engine"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a backtest and print the JSON report.
    Run {
        /// Path to an L1 CSV file (ts_event, publisher_id, ask_px_00, ask_sz_00).
        #[arg(long)]
        input: Option<PathBuf>,

        /// Generate this many deterministic synthetic snapshots instead of
        /// reading a file.
        #[arg(long)]
        synthetic: Option<usize>,

        /// Path to a TOML config file. Defaults to the reference constants.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Also write the report JSON to this path.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Summarize a snapshot file without running a backtest.
    Inspect {
        /// Path to an L1 CSV file.
        #[arg(long)]
        input: PathBuf,

        /// Path to a TOML config file (fee/rebate rates for loading).
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            input,
            synthetic,
            config,
            output,
        } => run_cmd(input, synthetic, config, output),
        Commands::Inspect { input, config } => inspect_cmd(&input, config),
    }
}

fn load_config(path: Option<PathBuf>) -> Result<BacktestConfig> {
    match path {
        Some(p) => {
            BacktestConfig::from_toml_path(&p).with_context(|| format!("loading {}", p.display()))
        }
        None => Ok(BacktestConfig::default()),
    }
}

fn load_input(
    input: Option<PathBuf>,
    synthetic: Option<usize>,
    config: &BacktestConfig,
) -> Result<LoadedSnapshots> {
    match (input, synthetic) {
        (Some(path), None) => {
            load_snapshots(&path, config).with_context(|| format!("loading {}", path.display()))
        }
        (None, Some(count)) => {
            if count == 0 {
                bail!("--synthetic requires at least one snapshot");
            }
            Ok(generate_synthetic_snapshots("routelab-demo", count, config))
        }
        (Some(_), Some(_)) => bail!("--input and --synthetic are mutually exclusive"),
        (None, None) => bail!("one of --input or --synthetic is required"),
    }
}

fn run_cmd(
    input: Option<PathBuf>,
    synthetic: Option<usize>,
    config_path: Option<PathBuf>,
    output: Option<PathBuf>,
) -> Result<()> {
    let config = load_config(config_path)?;
    let loaded = load_input(input, synthetic, &config)?;

    if loaded.synthetic {
        eprintln!("WARNING: running on synthetic data — results are for demonstration only");
    }

    let report = run_backtest(&loaded.snapshots, &config)?;
    let json = report.to_json_pretty()?;

    if let Some(path) = &output {
        std::fs::write(path, &json).with_context(|| format!("writing {}", path.display()))?;
    }
    println!("{json}");
    Ok(())
}

fn inspect_cmd(input: &Path, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config(config_path)?;
    let loaded =
        load_snapshots(input, &config).with_context(|| format!("loading {}", input.display()))?;

    let snapshots = &loaded.snapshots;
    let venue_counts: Vec<usize> = snapshots.iter().map(|s| s.venues.len()).collect();
    let max_venues = venue_counts.iter().copied().max().unwrap_or(0);
    let total_displayed: u64 = snapshots.iter().map(|s| s.total_displayed()).sum();

    println!("snapshots:       {}", snapshots.len());
    println!("max venues/snap: {max_venues}");
    println!("total displayed: {total_displayed}");
    if let (Some(first), Some(last)) = (snapshots.first(), snapshots.last()) {
        println!("time range:      {} .. {}", first.ts, last.ts);
    }
    println!("dataset hash:    {}", loaded.dataset_hash);
    Ok(())
}
