//! Core types and algorithms for cross-venue liquidity snapshots
//!
//! This crate provides everything that does not touch the network:
//! - Order book levels and normalized snapshots
//! - The fixed price bands and per-band aggregation
//! - Per-venue reports and the cross-venue merge
//! - Configuration and error types

pub mod types;
pub mod bands;
pub mod aggregate;
pub mod report;
pub mod config;
pub mod errors;

pub use types::*;
pub use bands::*;
pub use aggregate::*;
pub use report::*;
pub use config::*;
pub use errors::*;
