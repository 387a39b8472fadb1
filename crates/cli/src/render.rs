//! Report rendering for a finished snapshot

use std::fmt;

use bandbook_core::{Band, Side, VenueReport};
use bandbook_feed::LiquiditySnapshot;

/// `$1,234,567.89`
pub fn format_usd(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}${grouped}.{frac_part}")
}

fn side_title(side: Side) -> &'static str {
    match side {
        Side::Ask => "Asks (sell offers)",
        Side::Bid => "Bids (buy offers)",
    }
}

/// Plain-text report, one section per side plus optional per-venue detail
pub struct TextReport<'a> {
    snapshot: &'a LiquiditySnapshot,
    venue_detail: bool,
}

impl<'a> TextReport<'a> {
    pub fn new(snapshot: &'a LiquiditySnapshot) -> Self {
        Self {
            snapshot,
            venue_detail: true,
        }
    }

    pub fn with_venue_detail(mut self, enabled: bool) -> Self {
        self.venue_detail = enabled;
        self
    }

    fn write_side(&self, f: &mut fmt::Formatter<'_>, side: Side) -> fmt::Result {
        let aggregated = &self.snapshot.aggregated;
        writeln!(f, "{}:", side_title(side))?;
        for total in aggregated.side(side) {
            writeln!(f, "  Band {:<9}: {}", total.band.label(), format_usd(total.notional_quote))?;
        }
        writeln!(f, "  Total {}s: {}", side, format_usd(aggregated.total(side)))
    }

    fn write_venue(&self, f: &mut fmt::Formatter<'_>, venue: &VenueReport) -> fmt::Result {
        writeln!(f, "  {} (mid {:.4})", venue.exchange, venue.reference_price)?;
        for side in [Side::Ask, Side::Bid] {
            for band in Band::ALL {
                if let Some(summary) = venue.band(side, band) {
                    writeln!(
                        f,
                        "    {:<4} {:<9} @ {:<12.4} {}",
                        side,
                        band.label(),
                        summary.representative_price,
                        format_usd(summary.total_notional_quote)
                    )?;
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.snapshot;

        writeln!(f, "=== Aggregated liquidity {} ===", snapshot.pair)?;
        writeln!(
            f,
            "Taken at {} from {} venue(s)",
            snapshot.taken_at.format("%Y-%m-%d %H:%M:%S UTC"),
            snapshot.venues.len()
        )?;
        if !snapshot.has_data() {
            writeln!(f, "No data collected: every venue failed.")?;
        }
        writeln!(f)?;

        self.write_side(f, Side::Ask)?;
        writeln!(f)?;
        self.write_side(f, Side::Bid)?;

        if self.venue_detail && snapshot.has_data() {
            writeln!(f)?;
            writeln!(f, "Per venue:")?;
            for venue in &snapshot.venues {
                self.write_venue(f, venue)?;
            }
        }

        if !snapshot.failures.is_empty() {
            writeln!(f)?;
            writeln!(f, "Unavailable venues:")?;
            for failure in &snapshot.failures {
                writeln!(f, "  {}: {}", failure.venue, failure.error)?;
            }
        }

        Ok(())
    }
}

pub fn render_json(snapshot: &LiquiditySnapshot) -> serde_json::Result<String> {
    serde_json::to_string_pretty(snapshot)
}
