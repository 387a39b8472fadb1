//! Price bands relative to the reference price
//!
//! Three fixed bins with inclusive upper bounds on the relative distance
//! `|price - reference| / reference`. The label is the stable identity of a
//! band across venues.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ReferencePrice;

/// Number of bands
pub const BAND_COUNT: usize = 3;

/// One of the three relative-distance bins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Band {
    #[serde(rename = "0-0.5%")]
    Inner,
    #[serde(rename = "0.5-1.5%")]
    Middle,
    #[serde(rename = "1.5-3%")]
    Outer,
}

impl Band {
    /// All bands, in increasing bound order. Classification scans this order.
    pub const ALL: [Band; BAND_COUNT] = [Band::Inner, Band::Middle, Band::Outer];

    pub fn label(&self) -> &'static str {
        match self {
            Band::Inner => "0-0.5%",
            Band::Middle => "0.5-1.5%",
            Band::Outer => "1.5-3%",
        }
    }

    /// Inclusive upper bound, in percent of the reference price.
    pub fn upper_bound_percent(&self) -> f64 {
        match self {
            Band::Inner => 0.5,
            Band::Middle => 1.5,
            Band::Outer => 3.0,
        }
    }

    /// Position in [`Band::ALL`]
    pub fn index(&self) -> usize {
        match self {
            Band::Inner => 0,
            Band::Middle => 1,
            Band::Outer => 2,
        }
    }

    pub fn from_label(label: &str) -> Option<Band> {
        Band::ALL.into_iter().find(|b| b.label() == label)
    }

    /// First band whose upper bound is >= `distance_percent`.
    ///
    /// Returns `None` beyond the last bound (and for NaN).
    pub fn classify(distance_percent: f64) -> Option<Band> {
        Band::ALL
            .into_iter()
            .find(|b| distance_percent <= b.upper_bound_percent())
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// A band's threshold materialised against a concrete reference price
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BandThreshold {
    pub band: Band,
    pub label: &'static str,
    pub upper_bound_percent: f64,
    /// Upper bound as an absolute price distance from the reference.
    pub upper_bound_abs: f64,
}

/// The three thresholds for `reference`, in increasing order.
pub fn bands(reference: ReferencePrice) -> [BandThreshold; BAND_COUNT] {
    Band::ALL.map(|band| BandThreshold {
        band,
        label: band.label(),
        upper_bound_percent: band.upper_bound_percent(),
        upper_bound_abs: reference.value() * band.upper_bound_percent() / 100.0,
    })
}
