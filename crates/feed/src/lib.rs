//! Order book collection across venues
//!
//! Features:
//! - REST adapters for Binance, OKX and Bybit
//! - Concurrent fan-out with a join on every venue
//! - Per-venue failure isolation
//! - Cross-venue band totals via `bandbook-core`

pub mod orchestrator;
pub mod venues;

pub use orchestrator::{
    collect_outcomes, collect_snapshots, LiquidityAggregator, LiquiditySnapshot, VenueFailure,
    VenueOutcome,
};
pub use venues::{build_adapters, http_client, ExchangeAdapter};
