//! RouteLab Core — allocation engine, cost model, execution simulator, baselines.
//!
//! This crate contains the heart of the order-routing backtester:
//! - Domain types (venue quotes, snapshots, order spec, risk parameters)
//! - Per-snapshot allocation cost model (price + fees − rebates + fill penalties)
//! - Exhaustive step-discretized allocator
//! - Sequential execution simulator (the "smart router" path)
//! - Three non-optimizing baseline strategies (best-ask, TWAP, VWAP)
//!
//! Everything here is pure and synchronous: no I/O, no clocks, no randomness.
//! Identical inputs always produce identical outputs.

pub mod allocator;
pub mod baselines;
pub mod cost;
pub mod domain;
pub mod simulator;

pub use allocator::allocate;
pub use baselines::{best_ask, twap, vwap};
pub use cost::allocation_cost;
pub use domain::{
    validate_snapshots, OrderSpec, QuoteError, RiskParams, Snapshot, StrategyOutcome, VenueQuote,
};
pub use simulator::run_router;
