//! Execution simulator — the smart-router path.
//!
//! Walks the snapshot sequence, calling the allocator with the current
//! remaining quantity at each step and accumulating the allocator's cost.
//! State is strictly sequential: each step depends on the prior remaining
//! quantity, so there is no parallelism inside a run. Whole runs are
//! independent and safe to execute concurrently across parameter trials.

use crate::allocator::allocate;
use crate::domain::{OrderSpec, RiskParams, Snapshot, StrategyOutcome};

/// Run the router over the snapshot sequence with one parameter triple.
///
/// Per snapshot while quantity remains: allocate, execute
/// `Σ min(alloc_i, ask_size_i)`, decrement remaining, accumulate the
/// allocator's cost (which already embeds fill penalties). Stops early once
/// the order is filled; running out of snapshots with quantity left is not an
/// error — the underfill penalties in the accumulated cost account for it.
///
/// `avg_price` divides by the *original* target quantity, so a badly-filled
/// run reports a penalty-diluted average price.
pub fn run_router(snapshots: &[Snapshot], order: OrderSpec, params: &RiskParams) -> StrategyOutcome {
    let mut remaining = order.target_qty;
    let mut total_cost = 0.0;

    for snap in snapshots {
        if remaining == 0 {
            break;
        }
        let (split, cost) = allocate(remaining, &snap.venues, order.step_qty, params);
        let executed: u64 = split
            .iter()
            .zip(&snap.venues)
            .map(|(q, v)| (*q).min(v.ask_size))
            .sum();
        // executed <= Σ split = remaining, so this never underflows.
        remaining -= executed;
        total_cost += cost;
    }

    let avg_price = if order.target_qty > 0 {
        total_cost / order.target_qty as f64
    } else {
        0.0
    };

    StrategyOutcome {
        total_cost,
        avg_price,
        executed: order.target_qty - remaining,
    }
}
