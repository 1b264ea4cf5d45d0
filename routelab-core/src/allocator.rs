//! Step-discretized exhaustive allocator.
//!
//! Enumerates candidate splits venue-by-venue as a depth-first search over a
//! single reusable prefix buffer rather than materializing the cross-product,
//! so memory stays O(num_venues) regardless of grid size. Every candidate
//! sums exactly to the remaining order quantity: the last venue's slot is not
//! enumerated, it absorbs whatever the prefix leaves over.

use crate::cost::allocation_cost;
use crate::domain::{RiskParams, VenueQuote};

/// Find the minimum-cost split of `remaining_qty` across `venues`.
///
/// Every venue except the last is assigned a candidate quantity from
/// `0..=min(remaining - used, ask_size)` in increments of `step_qty`; the
/// last venue takes the remainder, which may exceed its displayed size
/// (deliberate overfill when displayed liquidity is short — allowed input,
/// not an error). Underfill of the *routed* total is impossible by
/// construction; the cost model still penalizes executed shortfall.
///
/// Ties go to the first candidate in enumeration order (venues in snapshot
/// order, quantities ascending), so results are deterministic.
///
/// Complexity is O((remaining/step + 1)^(venues−1)); callers keep venue
/// counts and step granularity within practical bounds.
pub fn allocate(
    remaining_qty: u64,
    venues: &[VenueQuote],
    step_qty: u64,
    params: &RiskParams,
) -> (Vec<u64>, f64) {
    debug_assert!(!venues.is_empty());
    debug_assert!(step_qty > 0);

    let mut search = SplitSearch {
        venues,
        remaining_qty,
        step_qty,
        params,
        prefix: vec![0; venues.len()],
        best_split: Vec::new(),
        best_cost: f64::INFINITY,
    };
    search.descend(0, 0);

    (search.best_split, search.best_cost)
}

/// DFS state for one allocate() call.
struct SplitSearch<'a> {
    venues: &'a [VenueQuote],
    remaining_qty: u64,
    step_qty: u64,
    params: &'a RiskParams,
    prefix: Vec<u64>,
    best_split: Vec<u64>,
    best_cost: f64,
}

impl SplitSearch<'_> {
    fn descend(&mut self, depth: usize, used: u64) {
        if depth == self.venues.len() - 1 {
            // Remainder slot: makes every candidate sum exact.
            self.prefix[depth] = self.remaining_qty - used;
            let cost = allocation_cost(
                &self.prefix,
                self.venues,
                self.remaining_qty,
                self.params,
            );
            if cost < self.best_cost {
                self.best_cost = cost;
                self.best_split = self.prefix.clone();
            }
            return;
        }

        let cap = (self.remaining_qty - used).min(self.venues[depth].ask_size);
        let mut q = 0;
        loop {
            self.prefix[depth] = q;
            self.descend(depth + 1, used + q);
            q += self.step_qty;
            if q > cap {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn quote(id: &str, ask: f64, size: u64) -> VenueQuote {
        VenueQuote {
            venue_id: id.into(),
            ask,
            ask_size: size,
            fee: 0.0,
            rebate: 0.0,
        }
    }

    fn params(lo: f64, lu: f64, th: f64) -> RiskParams {
        RiskParams {
            lambda_over: lo,
            lambda_under: lu,
            theta: th,
        }
    }

    #[test]
    fn single_venue_takes_whole_order() {
        let venues = vec![quote("1", 100.0, 5000)];
        let (split, cost) = allocate(5000, &venues, 100, &params(0.1, 0.1, 0.1));
        assert_eq!(split, vec![5000]);
        assert_eq!(cost, 500_000.0);
    }

    #[test]
    fn split_sums_to_remaining() {
        let venues = vec![
            quote("1", 100.0, 2000),
            quote("2", 101.0, 2000),
            quote("3", 102.0, 2000),
        ];
        let (split, _) = allocate(4300, &venues, 100, &params(0.001, 0.001, 0.001));
        assert_eq!(split.iter().sum::<u64>(), 4300);
    }

    #[test]
    fn prefers_cheaper_venue_up_to_displayed_size() {
        // Two venues, asks 100 and 101, 2000 displayed each, target 5000.
        // A large theta punishes any executed shortfall; the optimum still
        // sums to 5000 and loads the cheap venue to its full displayed size.
        let venues = vec![quote("1", 100.0, 2000), quote("2", 101.0, 2000)];
        let (split, _) = allocate(5000, &venues, 100, &params(0.0, 0.0, 200.0));
        assert_eq!(split.iter().sum::<u64>(), 5000);
        assert_eq!(split[0], 2000);
        // Remainder lands on the second slot even beyond its displayed size.
        assert_eq!(split[1], 3000);
    }

    #[test]
    fn insufficient_liquidity_overfills_last_slot() {
        let venues = vec![quote("1", 100.0, 1000), quote("2", 100.5, 1000)];
        let (split, cost) = allocate(5000, &venues, 100, &params(0.001, 0.001, 0.001));
        assert_eq!(split.iter().sum::<u64>(), 5000);
        assert!(cost.is_finite());
    }

    #[test]
    fn ties_resolve_to_first_enumerated() {
        // Identical venues with zero penalties: many splits score equally;
        // the first candidate (all quantity in the remainder slot) wins.
        let venues = vec![quote("1", 100.0, 5000), quote("2", 100.0, 5000)];
        let (split, _) = allocate(1000, &venues, 100, &params(0.0, 0.0, 0.0));
        assert_eq!(split, vec![0, 1000]);
    }

    #[test]
    fn deterministic_across_calls() {
        let venues = vec![quote("1", 99.5, 1500), quote("2", 100.0, 3000)];
        let p = params(0.0004, 0.0006, 0.0002);
        let first = allocate(4000, &venues, 100, &p);
        let second = allocate(4000, &venues, 100, &p);
        assert_eq!(first.0, second.0);
        assert_eq!(first.1, second.1);
    }

    proptest! {
        /// Construction invariant: every returned split sums exactly to the
        /// requested remaining quantity, whatever the venues display.
        #[test]
        fn split_always_sums_to_remaining(
            remaining in 1u64..=3000,
            sizes in proptest::collection::vec(0u64..=2500, 1..=4),
            lo in 0.0f64..0.01,
            lu in 0.0f64..0.01,
            th in 0.0f64..0.01,
        ) {
            let venues: Vec<VenueQuote> = sizes
                .iter()
                .enumerate()
                .map(|(i, &sz)| quote(&format!("{i}"), 100.0 + i as f64, sz))
                .collect();
            let (split, cost) = allocate(
                remaining,
                &venues,
                100,
                &params(lo, lu, th),
            );
            prop_assert_eq!(split.len(), venues.len());
            prop_assert_eq!(split.iter().sum::<u64>(), remaining);
            prop_assert!(cost.is_finite());
        }
    }
}
