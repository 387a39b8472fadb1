//! Snapshot orchestrator - fans out to every venue and joins on all of them
//!
//! Every adapter runs in its own task. The join waits for each task to reach
//! a terminal state; a failed or panicked venue is logged and left out, it
//! never cancels or delays its siblings.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde::{Serialize, Serializer};
use tracing::{debug, info, warn};

use bandbook_core::{merge, AggregatedReport, AppConfig, FetchError, FetchResult, VenueReport};

use crate::venues::{build_adapters, http_client, ExchangeAdapter};

/// Terminal state of one venue's fetch + banding
#[derive(Debug)]
pub struct VenueOutcome {
    pub venue: String,
    pub result: FetchResult<VenueReport>,
}

/// A venue that produced no report, kept as a diagnostic
#[derive(Debug, Clone, Serialize)]
pub struct VenueFailure {
    pub venue: String,
    #[serde(serialize_with = "serialize_display")]
    pub error: FetchError,
}

fn serialize_display<S: Serializer>(error: &FetchError, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}

async fn fetch_and_band(adapter: Arc<dyn ExchangeAdapter>) -> FetchResult<VenueReport> {
    let snapshot = adapter.fetch().await?;
    let report = VenueReport::from_snapshot(adapter.name(), &snapshot)?;

    debug!(
        "{}: reference {:.6}, {} ask bands, {} bid bands",
        report.exchange,
        report.reference_price,
        report.asks.len(),
        report.bids.len()
    );
    Ok(report)
}

/// Run every adapter concurrently and return one outcome per adapter, in adapter order.
pub async fn collect_outcomes(adapters: &[Arc<dyn ExchangeAdapter>]) -> Vec<VenueOutcome> {
    let handles: Vec<_> = adapters
        .iter()
        .map(|adapter| tokio::spawn(fetch_and_band(Arc::clone(adapter))))
        .collect();

    let joined = join_all(handles).await;

    adapters
        .iter()
        .zip(joined)
        .map(|(adapter, joined)| {
            let result = joined.unwrap_or_else(|e| Err(FetchError::Aborted(e.to_string())));
            if let Err(e) = &result {
                warn!("{} excluded from snapshot: {}", adapter.name(), e);
            }
            VenueOutcome {
                venue: adapter.name().to_string(),
                result,
            }
        })
        .collect()
}

/// Reports of the venues that succeeded. Empty when every adapter failed.
pub async fn collect_snapshots(adapters: &[Arc<dyn ExchangeAdapter>]) -> Vec<VenueReport> {
    collect_outcomes(adapters)
        .await
        .into_iter()
        .filter_map(|outcome| outcome.result.ok())
        .collect()
}

/// Result of one run, handed to the reporter
#[derive(Debug, Clone, Serialize)]
pub struct LiquiditySnapshot {
    pub pair: String,
    pub taken_at: DateTime<Utc>,
    pub venues: Vec<VenueReport>,
    pub failures: Vec<VenueFailure>,
    pub aggregated: AggregatedReport,
}

impl LiquiditySnapshot {
    pub fn from_outcomes(pair: impl Into<String>, outcomes: Vec<VenueOutcome>) -> Self {
        let mut venues = Vec::with_capacity(outcomes.len());
        let mut failures = Vec::new();

        for outcome in outcomes {
            match outcome.result {
                Ok(report) => venues.push(report),
                Err(error) => failures.push(VenueFailure {
                    venue: outcome.venue,
                    error,
                }),
            }
        }

        let aggregated = merge(&venues);

        Self {
            pair: pair.into(),
            taken_at: Utc::now(),
            venues,
            failures,
            aggregated,
        }
    }

    /// False when no venue produced data, as opposed to zero observed liquidity.
    pub fn has_data(&self) -> bool {
        !self.venues.is_empty()
    }
}

/// Owns the adapters for one pair and produces snapshots on demand
pub struct LiquidityAggregator {
    pair: String,
    adapters: Vec<Arc<dyn ExchangeAdapter>>,
}

impl LiquidityAggregator {
    pub fn new(pair: impl Into<String>, adapters: Vec<Arc<dyn ExchangeAdapter>>) -> Self {
        Self {
            pair: pair.into(),
            adapters,
        }
    }

    /// Validate `config` and build one HTTP adapter per enabled venue.
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        config.validate()?;
        let client = http_client(&config.http)?;
        Ok(Self::new(config.pair.display(), build_adapters(config, client)))
    }

    pub fn pair(&self) -> &str {
        &self.pair
    }

    pub fn adapter_count(&self) -> usize {
        self.adapters.len()
    }

    /// Fetch every venue once and merge whatever succeeded.
    pub async fn run(&self) -> LiquiditySnapshot {
        info!("Collecting {} order books for {}", self.adapters.len(), self.pair);

        let outcomes = collect_outcomes(&self.adapters).await;
        let snapshot = LiquiditySnapshot::from_outcomes(self.pair.clone(), outcomes);

        if snapshot.has_data() {
            info!(
                "Snapshot for {}: {} venues ok, {} failed",
                self.pair,
                snapshot.venues.len(),
                snapshot.failures.len()
            );
        } else {
            warn!("No venue returned data for {}", self.pair);
        }

        snapshot
    }
}
