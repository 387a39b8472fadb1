//! Configuration types

use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult, Venue};

/// Trading pair the snapshot is computed for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PairConfig {
    pub base: String,
    pub quote: String,
}

impl Default for PairConfig {
    fn default() -> Self {
        Self {
            base: "AAVE".to_string(),
            quote: "USDT".to_string(),
        }
    }
}

impl PairConfig {
    /// Venue-specific instrument symbol, e.g. `AAVEUSDT` or `AAVE-USDT`.
    pub fn symbol_for(&self, venue: Venue) -> String {
        let base = self.base.to_uppercase();
        let quote = self.quote.to_uppercase();
        match venue {
            Venue::Binance | Venue::Bybit => format!("{base}{quote}"),
            Venue::Okx => format!("{base}-{quote}"),
        }
    }

    /// Display form, e.g. `AAVE/USDT`.
    pub fn display(&self) -> String {
        format!("{}/{}", self.base.to_uppercase(), self.quote.to_uppercase())
    }
}

/// Per-venue fetch settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueConfig {
    pub venue: Venue,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Number of levels requested per side.
    pub depth_limit: u32,
    pub base_url: String,
}

fn default_enabled() -> bool {
    true
}

impl VenueConfig {
    pub fn default_for(venue: Venue) -> Self {
        let (depth_limit, base_url) = match venue {
            Venue::Binance => (500, "https://api.binance.com"),
            Venue::Okx => (400, "https://www.okx.com"),
            Venue::Bybit => (500, "https://api.bybit.com"),
        };
        Self {
            venue,
            enabled: true,
            depth_limit,
            base_url: base_url.to_string(),
        }
    }
}

/// HTTP client settings shared by all adapters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_ms: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 10_000,
            user_agent: format!("bandbook/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub pair: PairConfig,
    pub venues: Vec<VenueConfig>,
    pub http: HttpConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            pair: PairConfig::default(),
            venues: Venue::ALL.into_iter().map(VenueConfig::default_for).collect(),
            http: HttpConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn enabled_venues(&self) -> impl Iterator<Item = &VenueConfig> {
        self.venues.iter().filter(|v| v.enabled)
    }

    pub fn get_venue_config(&self, venue: Venue) -> Option<&VenueConfig> {
        self.venues.iter().find(|v| v.venue == venue)
    }

    /// Keep only the listed venues enabled. An empty filter leaves the config as is.
    pub fn restrict_to(&mut self, venues: &[Venue]) {
        if venues.is_empty() {
            return;
        }
        for v in &mut self.venues {
            v.enabled = venues.contains(&v.venue);
        }
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.pair.base.trim().is_empty() || self.pair.quote.trim().is_empty() {
            return Err(CoreError::InvalidConfig("pair base and quote must be set".into()));
        }
        if self.http.timeout_ms == 0 {
            return Err(CoreError::InvalidConfig("http.timeout_ms must be positive".into()));
        }
        for v in self.enabled_venues() {
            if v.depth_limit == 0 {
                return Err(CoreError::InvalidConfig(format!(
                    "{}: depth_limit must be positive",
                    v.venue
                )));
            }
            if v.base_url.trim().is_empty() {
                return Err(CoreError::InvalidConfig(format!("{}: base_url is empty", v.venue)));
            }
        }
        if self.enabled_venues().next().is_none() {
            return Err(CoreError::InvalidConfig("no venue enabled".into()));
        }
        Ok(())
    }
}
