//! Order classification and per-band aggregation

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{Band, RawOrder, ReferencePrice, Side, BAND_COUNT};

/// Aggregate of one non-empty band on one side of one venue
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandSummary {
    pub band: Band,
    /// Closest price to the reference within the band: min for asks, max for bids.
    pub representative_price: f64,
    /// Sum of `price * quantity` over the band's orders.
    pub total_notional_quote: f64,
}

impl BandSummary {
    pub fn label(&self) -> &'static str {
        self.band.label()
    }
}

/// Sum in a canonical order so the result does not depend on input order.
pub(crate) fn ordered_sum(values: &mut [f64]) -> f64 {
    values.sort_by(f64::total_cmp);
    values.iter().sum()
}

#[derive(Default)]
struct BandBucket {
    extreme_price: Option<f64>,
    notionals: Vec<f64>,
}

impl BandBucket {
    fn push(&mut self, order: &RawOrder, side: Side) {
        self.extreme_price = Some(match (self.extreme_price, side) {
            (None, _) => order.price(),
            (Some(p), Side::Ask) => p.min(order.price()),
            (Some(p), Side::Bid) => p.max(order.price()),
        });
        self.notionals.push(order.notional());
    }
}

/// Bin `orders` into bands around `reference` and summarise each non-empty band.
///
/// Orders further than the last bound are dropped. Output is ordered from the
/// reference outward: ascending price for asks, descending for bids.
pub fn aggregate(orders: &[RawOrder], reference: ReferencePrice, side: Side) -> Vec<BandSummary> {
    let mut buckets: [BandBucket; BAND_COUNT] = Default::default();
    let mut dropped = 0usize;

    for order in orders {
        match Band::classify(reference.distance_percent(order.price())) {
            Some(band) => buckets[band.index()].push(order, side),
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        trace!(%side, dropped, reference = reference.value(), "orders beyond outer band dropped");
    }

    let mut summaries: Vec<BandSummary> = Band::ALL
        .into_iter()
        .zip(buckets.iter_mut())
        .filter_map(|(band, bucket)| {
            let representative_price = bucket.extreme_price?;
            Some(BandSummary {
                band,
                representative_price,
                total_notional_quote: ordered_sum(&mut bucket.notionals),
            })
        })
        .collect();

    match side {
        Side::Ask => summaries.sort_by(|a, b| a.representative_price.total_cmp(&b.representative_price)),
        Side::Bid => summaries.sort_by(|a, b| b.representative_price.total_cmp(&a.representative_price)),
    }

    summaries
}
