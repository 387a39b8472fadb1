//! Core type definitions

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{CoreError, CoreResult};

/// Book side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Bid,
    Ask,
}

impl Side {
    pub fn name(&self) -> &'static str {
        match self {
            Side::Bid => "bid",
            Side::Ask => "ask",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Supported venues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Venue {
    Binance,
    Okx,
    Bybit,
}

impl Venue {
    pub const ALL: [Venue; 3] = [Venue::Binance, Venue::Okx, Venue::Bybit];

    pub fn name(&self) -> &'static str {
        match self {
            Venue::Binance => "binance",
            Venue::Okx => "okx",
            Venue::Bybit => "bybit",
        }
    }

    /// Human-readable name used in reports.
    pub fn display_name(&self) -> &'static str {
        match self {
            Venue::Binance => "Binance",
            Venue::Okx => "OKX",
            Venue::Bybit => "Bybit",
        }
    }

    pub fn from_name(name: &str) -> Option<Venue> {
        Venue::ALL
            .into_iter()
            .find(|v| v.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Venue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// A single book level. Quantity is in base-asset units.
///
/// Only constructible through [`RawOrder::new`], so every instance has a
/// positive finite price and a non-negative finite quantity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LevelFields")]
pub struct RawOrder {
    price: f64,
    quantity: f64,
}

#[derive(Deserialize)]
struct LevelFields {
    price: f64,
    quantity: f64,
}

impl TryFrom<LevelFields> for RawOrder {
    type Error = CoreError;

    fn try_from(fields: LevelFields) -> CoreResult<Self> {
        RawOrder::new(fields.price, fields.quantity)
    }
}

impl RawOrder {
    /// Build a level, rejecting non-positive prices and negative quantities.
    pub fn new(price: f64, quantity: f64) -> CoreResult<Self> {
        if !price.is_finite() || price <= 0.0 {
            return Err(CoreError::invalid_order(price, quantity, "price must be positive"));
        }
        if !quantity.is_finite() || quantity < 0.0 {
            return Err(CoreError::invalid_order(
                price,
                quantity,
                "quantity must be non-negative",
            ));
        }
        Ok(Self { price, quantity })
    }

    /// Parse a level from the decimal strings venues send on the wire.
    pub fn parse(price: &str, quantity: &str) -> CoreResult<Self> {
        let p: f64 = price
            .trim()
            .parse()
            .map_err(|_| CoreError::invalid_order(price, quantity, "price is not a number"))?;
        let q: f64 = quantity
            .trim()
            .parse()
            .map_err(|_| CoreError::invalid_order(price, quantity, "quantity is not a number"))?;
        Self::new(p, q)
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    /// Quote-currency value of the level.
    pub fn notional(&self) -> f64 {
        self.price * self.quantity
    }
}

/// Parse `[price, quantity, ...]` rows; extra columns are ignored.
pub fn parse_levels<S: AsRef<str>>(levels: &[Vec<S>]) -> CoreResult<Vec<RawOrder>> {
    levels
        .iter()
        .map(|level| match level.as_slice() {
            [price, quantity, ..] => RawOrder::parse(price.as_ref(), quantity.as_ref()),
            short => Err(CoreError::invalid_order(
                short.first().map(|s| s.as_ref()).unwrap_or(""),
                "",
                format!("expected [price, quantity], got {} fields", short.len()),
            )),
        })
        .collect()
}

/// Mid price anchoring the band computation. Always positive and finite.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct ReferencePrice(f64);

impl ReferencePrice {
    pub fn new(value: f64) -> CoreResult<Self> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(CoreError::InvalidReferencePrice(value))
        }
    }

    /// Arithmetic mean of best bid and best ask. A crossed book is accepted as-is.
    pub fn mid(best_bid: f64, best_ask: f64) -> CoreResult<Self> {
        Self::new((best_bid + best_ask) / 2.0)
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Relative distance of `price` from this reference, in percent.
    pub fn distance_percent(&self, price: f64) -> f64 {
        (price - self.0).abs() / self.0 * 100.0
    }
}

impl fmt::Display for ReferencePrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Venue-agnostic order book snapshot produced by an exchange adapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedSnapshot {
    pub best_bid: f64,
    pub best_ask: f64,
    /// Descending by convention, not required.
    pub bids: Vec<RawOrder>,
    pub asks: Vec<RawOrder>,
}

impl NormalizedSnapshot {
    /// Build from parsed levels, taking the first level of each side as the best price.
    pub fn from_levels(bids: Vec<RawOrder>, asks: Vec<RawOrder>) -> CoreResult<Self> {
        let best_bid = bids
            .first()
            .map(|o| o.price)
            .ok_or(CoreError::EmptyBook { side: Side::Bid })?;
        let best_ask = asks
            .first()
            .map(|o| o.price)
            .ok_or(CoreError::EmptyBook { side: Side::Ask })?;

        Ok(Self {
            best_bid,
            best_ask,
            bids,
            asks,
        })
    }

    pub fn reference_price(&self) -> CoreResult<ReferencePrice> {
        ReferencePrice::mid(self.best_bid, self.best_ask)
    }

    pub fn orders(&self, side: Side) -> &[RawOrder] {
        match side {
            Side::Bid => &self.bids,
            Side::Ask => &self.asks,
        }
    }
}
