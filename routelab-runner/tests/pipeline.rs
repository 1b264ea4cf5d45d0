//! End-to-end pipeline tests: CSV in, JSON report out.

use std::io::Write;

use routelab_runner::{
    generate_synthetic_snapshots, run_backtest, run_backtest_from_csv, BacktestConfig,
};

fn write_csv(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// Two snapshots, two venues each, enough liquidity to fill 1000 shares.
const FIXTURE: &str = "\
ts_event,publisher_id,ask_px_00,ask_sz_00
2024-08-01T13:30:00.000000000Z,1,100.00,600
2024-08-01T13:30:00.000000000Z,2,100.10,600
2024-08-01T13:30:00.250000000Z,1,100.05,600
2024-08-01T13:30:00.250000000Z,2,100.02,600
";

fn small_config() -> BacktestConfig {
    let mut config = BacktestConfig {
        order_size: 1000,
        step: 100,
        ..Default::default()
    };
    // 3 values per parameter → 27 trials; fast enough for an exhaustive run.
    config.param_grid.stop = 0.0004;
    config
}

#[test]
fn csv_to_report_end_to_end() {
    let file = write_csv(FIXTURE);
    let config = small_config();
    let report = run_backtest_from_csv(file.path(), &config).unwrap();

    assert!(report.smart_router.total_cash > 0.0);
    // 1000 shares around px 100 plus fees.
    assert!(report.smart_router.total_cash > 90_000.0);
    assert!(report.smart_router.total_cash < 120_000.0);
    assert!(report.best_ask.total_cash > 0.0);
    assert!(report.twap.total_cash > 0.0);
    assert!(report.vwap.total_cash > 0.0);
}

#[test]
fn rerunning_pipeline_yields_byte_identical_reports() {
    let file = write_csv(FIXTURE);
    let config = small_config();

    let first = run_backtest_from_csv(file.path(), &config).unwrap();
    let second = run_backtest_from_csv(file.path(), &config).unwrap();

    assert_eq!(
        first.to_json_pretty().unwrap(),
        second.to_json_pretty().unwrap()
    );
}

#[test]
fn synthetic_run_is_idempotent() {
    let config = small_config();
    let loaded = generate_synthetic_snapshots("pipeline", 15, &config);

    let first = run_backtest(&loaded.snapshots, &config).unwrap();
    let second = run_backtest(&loaded.snapshots, &config).unwrap();

    assert_eq!(
        first.to_json_pretty().unwrap(),
        second.to_json_pretty().unwrap()
    );
}

#[test]
fn best_ask_baseline_matches_hand_computation() {
    let file = write_csv(FIXTURE);
    let config = small_config();
    let report = run_backtest_from_csv(file.path(), &config).unwrap();

    // Snapshot 1: cheapest is venue 1 at 100.00, take 600.
    // Snapshot 2: cheapest is venue 2 at 100.02, take remaining 400.
    let expected = 600.0 * (100.00 + config.fee) + 400.0 * (100.02 + config.fee);
    assert!((report.best_ask.total_cash - expected).abs() < 1e-9);
    assert!((report.best_ask.avg_fill_px - expected / 1000.0).abs() < 1e-12);
}

#[test]
fn report_best_params_come_from_configured_grid() {
    let file = write_csv(FIXTURE);
    let config = small_config();
    let report = run_backtest_from_csv(file.path(), &config).unwrap();

    let g = config.param_grid;
    for value in [
        report.best_params.lambda_over,
        report.best_params.lambda_under,
        report.best_params.theta,
    ] {
        assert!(value >= g.start && value < g.stop);
    }
}

#[test]
fn underfilled_run_still_reports() {
    // Total displayed liquidity (2400) far below the order (10000): the run
    // ends partially filled and the report still builds, with the router's
    // cost carrying the underfill penalties.
    let file = write_csv(FIXTURE);
    let config = BacktestConfig {
        order_size: 10_000,
        step: 100,
        ..small_config()
    };
    let report = run_backtest_from_csv(file.path(), &config).unwrap();
    assert!(report.smart_router.total_cash.is_finite());
    assert!(report.savings_vs_twap_bps.is_some());
}
