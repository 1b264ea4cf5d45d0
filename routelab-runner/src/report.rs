//! Report building — basis-point savings of the tuned router versus baselines.
//!
//! Best-ask and VWAP comparisons are cost-based:
//! `10000 * (baseline_cost − best_cost) / baseline_cost`. The TWAP comparison
//! is *price*-based (average fill price over executed quantity versus the
//! router's average over target quantity) and is absent when TWAP executed
//! nothing. The asymmetry is intentional policy carried over from the source
//! cost-basis convention — do not "fix" it to match the other two.

use serde::{Deserialize, Serialize};

use routelab_core::domain::{OrderSpec, RiskParams, StrategyOutcome};

use crate::search::TrialResult;

/// Total cash and average fill price for one execution path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExecutionSummary {
    pub total_cash: f64,
    pub avg_fill_px: f64,
}

impl From<StrategyOutcome> for ExecutionSummary {
    fn from(outcome: StrategyOutcome) -> Self {
        Self {
            total_cash: outcome.total_cost,
            avg_fill_px: outcome.avg_price,
        }
    }
}

/// Final output of a backtest run.
///
/// `savings_vs_twap_bps` serializes as JSON `null` when TWAP executed zero
/// quantity — explicitly absent, never zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestReport {
    pub best_params: RiskParams,
    pub smart_router: ExecutionSummary,
    pub best_ask: ExecutionSummary,
    pub twap: ExecutionSummary,
    pub vwap: ExecutionSummary,
    pub savings_vs_best_ask_bps: f64,
    pub savings_vs_twap_bps: Option<f64>,
    pub savings_vs_vwap_bps: f64,
}

impl BacktestReport {
    /// Serialize to pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Assemble the report from the winning trial and the three baselines.
pub fn build_report(
    best: &TrialResult,
    best_ask: StrategyOutcome,
    twap: StrategyOutcome,
    vwap: StrategyOutcome,
    order: OrderSpec,
) -> BacktestReport {
    BacktestReport {
        best_params: best.params,
        smart_router: ExecutionSummary {
            total_cash: best.total_cost,
            avg_fill_px: best.avg_price,
        },
        best_ask: best_ask.into(),
        twap: twap.into(),
        vwap: vwap.into(),
        savings_vs_best_ask_bps: savings_bps(best_ask.total_cost, best.total_cost),
        savings_vs_twap_bps: twap_savings_bps(best.total_cost, twap, order),
        savings_vs_vwap_bps: savings_bps(vwap.total_cost, best.total_cost),
    }
}

/// Cost-based savings in basis points, guarded against a zero baseline.
pub fn savings_bps(baseline_cost: f64, best_cost: f64) -> f64 {
    if baseline_cost == 0.0 {
        return 0.0;
    }
    10_000.0 * (baseline_cost - best_cost) / baseline_cost
}

/// Price-based TWAP savings: compares average fill prices, not raw totals.
///
/// `None` when TWAP executed nothing (no comparable price exists) or when
/// the comparison would divide by zero.
pub fn twap_savings_bps(
    best_cost: f64,
    twap: StrategyOutcome,
    order: OrderSpec,
) -> Option<f64> {
    if twap.executed == 0 || order.target_qty == 0 {
        return None;
    }
    let twap_px = twap.total_cost / twap.executed as f64;
    if twap_px == 0.0 {
        return None;
    }
    let router_px = best_cost / order.target_qty as f64;
    Some(10_000.0 * (twap_px - router_px) / twap_px)
}
