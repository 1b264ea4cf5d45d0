//! Parent order specification, risk parameters, and strategy outcomes.

use serde::{Deserialize, Serialize};

/// The parent order: total quantity to fill plus allocation granularity.
///
/// Threaded explicitly through every component call so the engine stays pure
/// and independently testable — there are no module-level constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderSpec {
    /// Total quantity to fill over the snapshot sequence.
    pub target_qty: u64,
    /// Allocation step: every candidate quantity except a venue's remainder
    /// slot is a multiple of this.
    pub step_qty: u64,
}

/// Risk/penalty parameters for one router trial.
///
/// `lambda_over` and `lambda_under` price over- and underfill asymmetrically;
/// `theta` penalizes any mismatch symmetrically (queue risk). Separating the
/// symmetric term lets the grid search express "fear of not filling" and
/// "dislike of filling too much" independently.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskParams {
    pub lambda_over: f64,
    pub lambda_under: f64,
    pub theta: f64,
}

/// Result of running one execution strategy over a snapshot sequence.
///
/// `avg_price` normalization differs by strategy: the router, best-ask, and
/// VWAP divide by the original target quantity; TWAP divides by executed
/// quantity. The report layer depends on this distinction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrategyOutcome {
    pub total_cost: f64,
    pub avg_price: f64,
    pub executed: u64,
}

impl StrategyOutcome {
    /// Outcome for a strategy that never traded.
    pub fn zero() -> Self {
        Self {
            total_cost: 0.0,
            avg_price: 0.0,
            executed: 0,
        }
    }
}
