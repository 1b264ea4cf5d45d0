//! Allocation cost model — pure function scoring one split against one snapshot.
//!
//! The score blends realized cash (price + fee on filled quantity, minus
//! rebates on routed-but-unfilled quantity) with penalty terms for missing
//! the target: a symmetric queue-risk term (`theta`) plus asymmetric
//! over/underfill terms (`lambda_over` / `lambda_under`).

use crate::domain::{RiskParams, VenueQuote};

/// Score a candidate allocation against one snapshot's venues.
///
/// Per venue `i` with routed quantity `q_i`:
/// - executed `= min(q_i, ask_size_i)` — never more than displayed
/// - cash `+= executed * (ask_i + fee_i)`
/// - cash `-= (q_i - executed) * rebate_i` for quantity posted but unfilled
///
/// Then with `underfill = max(target - executed_total, 0)` and
/// `overfill = max(executed_total - target, 0)`:
///
/// `score = cash + theta*(underfill+overfill)
///        + lambda_under*underfill + lambda_over*overfill`
///
/// `split` and `venues` must have equal length.
pub fn allocation_cost(
    split: &[u64],
    venues: &[VenueQuote],
    target_qty: u64,
    params: &RiskParams,
) -> f64 {
    debug_assert_eq!(split.len(), venues.len());

    let mut executed: u64 = 0;
    let mut cash_spent = 0.0;

    for (q, venue) in split.iter().zip(venues) {
        let exe = (*q).min(venue.ask_size);
        executed += exe;
        cash_spent += exe as f64 * (venue.ask + venue.fee);
        cash_spent -= (q - exe) as f64 * venue.rebate;
    }

    let underfill = target_qty.saturating_sub(executed) as f64;
    let overfill = executed.saturating_sub(target_qty) as f64;

    let risk_pen = params.theta * (underfill + overfill);
    let cost_pen = params.lambda_under * underfill + params.lambda_over * overfill;

    cash_spent + risk_pen + cost_pen
}
