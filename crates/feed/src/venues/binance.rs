//! Binance spot depth (`GET /api/v3/depth`)

use serde::Deserialize;
use tracing::debug;

use bandbook_core::{parse_levels, FetchResult, NormalizedSnapshot, PairConfig, Venue, VenueConfig};

use super::{get_json, ExchangeAdapter};

#[derive(Debug, Deserialize)]
pub(crate) struct DepthResponse {
    bids: Vec<Vec<String>>,
    asks: Vec<Vec<String>>,
}

impl DepthResponse {
    fn into_snapshot(self) -> FetchResult<NormalizedSnapshot> {
        let bids = parse_levels(&self.bids)?;
        let asks = parse_levels(&self.asks)?;
        Ok(NormalizedSnapshot::from_levels(bids, asks)?)
    }
}

pub struct BinanceAdapter {
    client: reqwest::Client,
    url: String,
    symbol: String,
    limit: u32,
}

impl BinanceAdapter {
    pub fn new(client: reqwest::Client, config: &VenueConfig, pair: &PairConfig) -> Self {
        Self {
            client,
            url: format!("{}/api/v3/depth", config.base_url.trim_end_matches('/')),
            symbol: pair.symbol_for(Venue::Binance),
            limit: config.depth_limit,
        }
    }
}

#[async_trait::async_trait]
impl ExchangeAdapter for BinanceAdapter {
    fn name(&self) -> &str {
        Venue::Binance.display_name()
    }

    async fn fetch(&self) -> FetchResult<NormalizedSnapshot> {
        let query = [("symbol", self.symbol.clone()), ("limit", self.limit.to_string())];
        let depth: DepthResponse = get_json(&self.client, &self.url, &query).await?;
        debug!(
            "binance {}: {} bids, {} asks",
            self.symbol,
            depth.bids.len(),
            depth.asks.len()
        );
        depth.into_snapshot()
    }
}
