//! Command-line arguments

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use bandbook_core::{AppConfig, Venue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "bandbook", version)]
#[command(about = "Cross-exchange order book liquidity by distance from the mid price")]
pub struct Args {
    /// Config file (TOML, JSON or YAML). Defaults to ./bandbook.toml when present.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Base asset, e.g. AAVE
    #[arg(long)]
    pub base: Option<String>,

    /// Quote asset, e.g. USDT
    #[arg(long)]
    pub quote: Option<String>,

    /// Only query these venues (repeatable)
    #[arg(long = "venue", value_parser = parse_venue)]
    pub venues: Vec<Venue>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Skip the per-venue breakdown in text output
    #[arg(long)]
    pub no_venue_detail: bool,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

fn parse_venue(s: &str) -> Result<Venue, String> {
    Venue::from_name(s).ok_or_else(|| {
        let known: Vec<&str> = Venue::ALL.iter().map(|v| v.name()).collect();
        format!("unknown venue '{}', expected one of: {}", s, known.join(", "))
    })
}

impl Args {
    /// Overlay command-line overrides on the loaded config.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(base) = &self.base {
            config.pair.base = base.clone();
        }
        if let Some(quote) = &self.quote {
            config.pair.quote = quote.clone();
        }
        config.restrict_to(&self.venues);
    }
}
