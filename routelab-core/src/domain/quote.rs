//! Venue quotes and snapshots — the fundamental market data units.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Top-of-book ask quote for a single venue at a single instant.
///
/// `fee` is charged per unit on filled quantity; `rebate` is credited per unit
/// on quantity routed to the venue but left unfilled (resting liquidity).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueQuote {
    pub venue_id: String,
    pub ask: f64,
    pub ask_size: u64,
    pub fee: f64,
    pub rebate: f64,
}

/// Market state across all venues at one instant.
///
/// Venues are stored in stable order (ties broken by venue id upstream) and
/// carry unique venue ids within the snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub ts: DateTime<Utc>,
    pub venues: Vec<VenueQuote>,
}

/// Validation errors for snapshot data.
///
/// The core assumes validated input everywhere else; callers run validation
/// once at the ingestion boundary and fail fast.
#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("snapshot at {ts} has no venues")]
    EmptyVenueList { ts: DateTime<Utc> },

    #[error("snapshot at {ts}: venue '{venue_id}' has non-positive ask {ask}")]
    NonPositiveAsk {
        ts: DateTime<Utc>,
        venue_id: String,
        ask: f64,
    },

    #[error("snapshot at {ts}: venue '{venue_id}' has negative fee or rebate")]
    NegativeFeeOrRebate {
        ts: DateTime<Utc>,
        venue_id: String,
    },

    #[error("snapshot at {ts}: duplicate venue id '{venue_id}'")]
    DuplicateVenue {
        ts: DateTime<Utc>,
        venue_id: String,
    },

    #[error("snapshot sequence is empty")]
    EmptySequence,
}

impl Snapshot {
    /// Check structural invariants: non-empty venue list, positive asks,
    /// non-negative fees/rebates, unique venue ids.
    pub fn validate(&self) -> Result<(), QuoteError> {
        if self.venues.is_empty() {
            return Err(QuoteError::EmptyVenueList { ts: self.ts });
        }
        let mut seen = HashSet::with_capacity(self.venues.len());
        for v in &self.venues {
            if !(v.ask > 0.0) || !v.ask.is_finite() {
                return Err(QuoteError::NonPositiveAsk {
                    ts: self.ts,
                    venue_id: v.venue_id.clone(),
                    ask: v.ask,
                });
            }
            if v.fee < 0.0 || v.rebate < 0.0 {
                return Err(QuoteError::NegativeFeeOrRebate {
                    ts: self.ts,
                    venue_id: v.venue_id.clone(),
                });
            }
            if !seen.insert(v.venue_id.as_str()) {
                return Err(QuoteError::DuplicateVenue {
                    ts: self.ts,
                    venue_id: v.venue_id.clone(),
                });
            }
        }
        Ok(())
    }

    /// Total displayed quantity across all venues.
    pub fn total_displayed(&self) -> u64 {
        self.venues.iter().map(|v| v.ask_size).sum()
    }
}

/// Validate an entire snapshot sequence, failing on the first bad snapshot.
pub fn validate_snapshots(snapshots: &[Snapshot]) -> Result<(), QuoteError> {
    if snapshots.is_empty() {
        return Err(QuoteError::EmptySequence);
    }
    for snap in snapshots {
        snap.validate()?;
    }
    Ok(())
}
