//! Baseline execution strategies — best-ask, TWAP, VWAP.
//!
//! Three non-optimizing policies sharing the router's loop shape (remaining
//! quantity decreases monotonically over the snapshot sequence) but with no
//! cost minimization. They exist purely as comparison yardsticks for the
//! report layer.

use std::cmp::Ordering;

use crate::domain::{OrderSpec, Snapshot, StrategyOutcome, VenueQuote};

/// Venue with the lowest ask; first wins on price ties (snapshot order).
fn cheapest_venue(venues: &[VenueQuote]) -> Option<&VenueQuote> {
    venues
        .iter()
        .min_by(|a, b| a.ask.partial_cmp(&b.ask).unwrap_or(Ordering::Equal))
}

/// Best-ask sweep: each snapshot, hit the cheapest venue for
/// `min(remaining, displayed)`.
///
/// Never routes more than it can fill, so rebates play no role. Average
/// price is normalized over the target quantity.
pub fn best_ask(snapshots: &[Snapshot], order: OrderSpec) -> StrategyOutcome {
    let mut remaining = order.target_qty;
    let mut total_cost = 0.0;

    for snap in snapshots {
        if remaining == 0 {
            break;
        }
        let Some(best) = cheapest_venue(&snap.venues) else {
            continue;
        };
        let take = remaining.min(best.ask_size);
        total_cost += take as f64 * (best.ask + best.fee);
        remaining -= take;
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

/// TWAP: split the order into `min(n_snapshots, target/step)` equal time
/// slices and take up to one chunk per snapshot at the cheapest venue.
///
/// The chunk uses integer division, so the final slice may leave a remainder
/// unexecuted. Unlike the other strategies, average price is normalized over
/// the quantity actually *executed* — the report layer's TWAP comparison
/// depends on exactly this convention.
pub fn twap(snapshots: &[Snapshot], order: OrderSpec) -> StrategyOutcome {
    debug_assert!(order.step_qty > 0);

    let n_slices = snapshots
        .len()
        .min((order.target_qty / order.step_qty) as usize);
    if n_slices == 0 {
        return StrategyOutcome::zero();
    }
    let chunk = order.target_qty / n_slices as u64;

    let mut remaining = order.target_qty;
    let mut total_cost = 0.0;
    let mut executed: u64 = 0;

    for snap in &snapshots[..n_slices] {
        if remaining == 0 {
            break;
        }
        let Some(best) = cheapest_venue(&snap.venues) else {
            continue;
        };
        let take = chunk.min(best.ask_size).min(remaining);
        total_cost += take as f64 * (best.ask + best.fee);
        executed += take;
        remaining -= take;
    }

    let avg_price = if executed > 0 {
        total_cost / executed as f64
    } else {
        0.0
    };

    StrategyOutcome {
        total_cost,
        avg_price,
        executed,
    }
}

/// VWAP: each snapshot, spread the *target* quantity across venues in
/// proportion to displayed size, capped by each venue's size and remaining.
///
/// Per-venue takes use `floor(weight * target)`. Snapshots with zero total
/// displayed size contribute nothing (degenerate-weight guard). Average
/// price is normalized over the target quantity.
pub fn vwap(snapshots: &[Snapshot], order: OrderSpec) -> StrategyOutcome {
    let mut remaining = order.target_qty;
    let mut total_cost = 0.0;

    for snap in snapshots {
        if remaining == 0 {
            break;
        }
        let total_size = snap.total_displayed();
        if total_size == 0 {
            continue;
        }
        for venue in &snap.venues {
            let weight = venue.ask_size as f64 / total_size as f64;
            let take = ((weight * order.target_qty as f64) as u64)
                .min(venue.ask_size)
                .min(remaining);
            total_cost += take as f64 * (venue.ask + venue.fee);
            remaining -= take;
        }
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
