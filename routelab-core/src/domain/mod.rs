//! Domain types shared by the allocator, simulator, and baselines.

pub mod order;
pub mod quote;

pub use order::{OrderSpec, RiskParams, StrategyOutcome};
pub use quote::{validate_snapshots, QuoteError, Snapshot, VenueQuote};
