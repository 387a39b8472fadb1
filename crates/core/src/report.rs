//! Per-venue reports and the cross-venue merge

use serde::{Deserialize, Serialize};

use crate::aggregate::ordered_sum;
use crate::{aggregate, Band, BandSummary, CoreResult, NormalizedSnapshot, Side, BAND_COUNT};

/// Banded view of one venue's book
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VenueReport {
    pub exchange: String,
    pub reference_price: f64,
    /// Ascending by representative price.
    pub asks: Vec<BandSummary>,
    /// Descending by representative price.
    pub bids: Vec<BandSummary>,
}

impl VenueReport {
    /// Compute the mid price and band both sides of `snapshot`.
    pub fn from_snapshot(exchange: impl Into<String>, snapshot: &NormalizedSnapshot) -> CoreResult<Self> {
        let reference = snapshot.reference_price()?;

        Ok(Self {
            exchange: exchange.into(),
            reference_price: reference.value(),
            asks: aggregate(&snapshot.asks, reference, Side::Ask),
            bids: aggregate(&snapshot.bids, reference, Side::Bid),
        })
    }

    pub fn side(&self, side: Side) -> &[BandSummary] {
        match side {
            Side::Ask => &self.asks,
            Side::Bid => &self.bids,
        }
    }

    pub fn band(&self, side: Side, band: Band) -> Option<&BandSummary> {
        self.side(side).iter().find(|s| s.band == band)
    }
}

/// Cross-venue total for one band on one side
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandTotal {
    pub band: Band,
    pub notional_quote: f64,
}

/// Per-band notional summed across every venue that reported it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedReport {
    /// Always Inner, Middle, Outer.
    pub asks: [BandTotal; BAND_COUNT],
    pub bids: [BandTotal; BAND_COUNT],
}

impl AggregatedReport {
    /// All bands at zero notional.
    pub fn empty() -> Self {
        let zero = Band::ALL.map(|band| BandTotal {
            band,
            notional_quote: 0.0,
        });
        Self {
            asks: zero,
            bids: zero,
        }
    }

    pub fn side(&self, side: Side) -> &[BandTotal; BAND_COUNT] {
        match side {
            Side::Ask => &self.asks,
            Side::Bid => &self.bids,
        }
    }

    pub fn band_total(&self, band: Band, side: Side) -> f64 {
        self.side(side)[band.index()].notional_quote
    }

    /// Sum over the three bands of `side`.
    pub fn total(&self, side: Side) -> f64 {
        self.side(side).iter().map(|t| t.notional_quote).sum()
    }

    pub fn is_zero(&self) -> bool {
        self.total(Side::Ask) == 0.0 && self.total(Side::Bid) == 0.0
    }
}

impl Default for AggregatedReport {
    fn default() -> Self {
        Self::empty()
    }
}

fn merge_side(reports: &[VenueReport], side: Side) -> [BandTotal; BAND_COUNT] {
    let mut contributions: [Vec<f64>; BAND_COUNT] = Default::default();

    for report in reports {
        for summary in report.side(side) {
            contributions[summary.band.index()].push(summary.total_notional_quote);
        }
    }

    let mut totals = [0.0; BAND_COUNT];
    for (total, values) in totals.iter_mut().zip(contributions.iter_mut()) {
        *total = ordered_sum(values);
    }

    Band::ALL.map(|band| BandTotal {
        band,
        notional_quote: totals[band.index()],
    })
}

/// Sum band notionals across venues. Venues lacking a band contribute zero.
///
/// The result does not depend on the order of `reports`.
pub fn merge(reports: &[VenueReport]) -> AggregatedReport {
    AggregatedReport {
        asks: merge_side(reports, Side::Ask),
        bids: merge_side(reports, Side::Bid),
    }
}
