//! Exhaustive parameter search over the router's risk parameters.
//!
//! The three penalty parameters share one discretized range; the search
//! evaluates the full Cartesian product (lambda_over outer, lambda_under
//! middle, theta inner) and keeps the minimum-cost trial. Trials are
//! independent — each owns its own remaining-quantity state — so they run on
//! a rayon pool by default. The reduction orders by `(total_cost,
//! enumeration index)`, which makes parallel and sequential sweeps agree
//! bit-for-bit and resolves cost ties to the first-enumerated triple.

use rayon::prelude::*;
use std::cmp::Ordering;

use routelab_core::domain::{OrderSpec, RiskParams, Snapshot, StrategyOutcome};
use routelab_core::run_router;

use crate::config::GridConfig;

/// Discretized parameter grid shared by all three risk parameters.
#[derive(Debug, Clone, Copy)]
pub struct ParamGrid {
    /// Lower bound (inclusive).
    pub start: f64,
    /// Upper bound (exclusive).
    pub stop: f64,
    /// Increment.
    pub step: f64,
}

impl From<GridConfig> for ParamGrid {
    fn from(g: GridConfig) -> Self {
        Self {
            start: g.start,
            stop: g.stop,
            step: g.step,
        }
    }
}

impl ParamGrid {
    /// Expand the range into concrete values.
    ///
    /// Values are generated as `start + i*step` while below `stop` and
    /// rounded to 7 decimals, so accumulated float error never leaks into
    /// reported parameters.
    pub fn values(&self) -> Vec<f64> {
        let mut vals = Vec::new();
        let mut i = 0u32;
        loop {
            let v = self.start + f64::from(i) * self.step;
            if v >= self.stop - 1e-12 {
                break;
            }
            vals.push((v * 1e7).round() / 1e7);
            i += 1;
        }
        vals
    }

    /// All parameter triples in enumeration order:
    /// lambda_over outer, lambda_under middle, theta inner.
    pub fn triples(&self) -> Vec<RiskParams> {
        let values = self.values();
        let mut triples = Vec::with_capacity(values.len().pow(3));
        for &lambda_over in &values {
            for &lambda_under in &values {
                for &theta in &values {
                    triples.push(RiskParams {
                        lambda_over,
                        lambda_under,
                        theta,
                    });
                }
            }
        }
        triples
    }
}

/// One evaluated grid point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrialResult {
    pub params: RiskParams,
    pub total_cost: f64,
    pub avg_price: f64,
}

impl TrialResult {
    fn from_outcome(params: RiskParams, outcome: StrategyOutcome) -> Self {
        Self {
            params,
            total_cost: outcome.total_cost,
            avg_price: outcome.avg_price,
        }
    }
}

/// Grid sweep executor.
pub struct ParamSweep {
    parallel: bool,
}

impl ParamSweep {
    pub fn new() -> Self {
        Self { parallel: true }
    }

    /// Enables or disables parallel execution.
    pub fn with_parallelism(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Run the router once per grid triple and return the minimum-cost trial.
    ///
    /// Returns `None` only for an empty grid. Ties on total cost resolve to
    /// the first triple in enumeration order.
    pub fn sweep(
        &self,
        snapshots: &[Snapshot],
        order: OrderSpec,
        grid: &ParamGrid,
    ) -> Option<TrialResult> {
        let triples = grid.triples();

        let run_trial = |(idx, params): (usize, &RiskParams)| {
            let outcome = run_router(snapshots, order, params);
            (idx, TrialResult::from_outcome(*params, outcome))
        };

        let best = if self.parallel {
            triples
                .par_iter()
                .enumerate()
                .map(run_trial)
                .min_by(|a, b| compare_trials(a, b))
        } else {
            triples
                .iter()
                .enumerate()
                .map(run_trial)
                .min_by(|a, b| compare_trials(a, b))
        };

        best.map(|(_, trial)| trial)
    }
}

impl Default for ParamSweep {
    fn default() -> Self {
        Self::new()
    }
}

/// Order trials by (total_cost, enumeration index).
///
/// The index component makes the ordering total, so a parallel reduction
/// returns exactly the trial a sequential first-minimum scan would.
fn compare_trials(a: &(usize, TrialResult), b: &(usize, TrialResult)) -> Ordering {
    a.1.total_cost
        .partial_cmp(&b.1.total_cost)
        .unwrap_or(Ordering::Equal)
        .then(a.0.cmp(&b.0))
}
