//! Bybit spot order book (`GET /v5/market/orderbook`)

use serde::Deserialize;
use tracing::debug;

use bandbook_core::{
    parse_levels, FetchError, FetchResult, NormalizedSnapshot, PairConfig, Venue, VenueConfig,
};

use super::{get_json, ExchangeAdapter};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderbookResponse {
    ret_code: i64,
    #[serde(default)]
    ret_msg: String,
    #[serde(default)]
    result: Option<OrderbookResult>,
}

/// `b` holds bids, `a` holds asks. Both are absent on error responses.
#[derive(Debug, Deserialize)]
struct OrderbookResult {
    #[serde(default)]
    b: Vec<Vec<String>>,
    #[serde(default)]
    a: Vec<Vec<String>>,
}

impl OrderbookResponse {
    fn into_snapshot(self) -> FetchResult<NormalizedSnapshot> {
        if self.ret_code != 0 {
            return Err(FetchError::Api {
                code: self.ret_code.to_string(),
                message: self.ret_msg,
            });
        }
        let book = self
            .result
            .ok_or_else(|| FetchError::Malformed("missing result".into()))?;

        let bids = parse_levels(&book.b)?;
        let asks = parse_levels(&book.a)?;
        Ok(NormalizedSnapshot::from_levels(bids, asks)?)
    }
}

pub struct BybitAdapter {
    client: reqwest::Client,
    url: String,
    symbol: String,
    limit: u32,
}

impl BybitAdapter {
    pub fn new(client: reqwest::Client, config: &VenueConfig, pair: &PairConfig) -> Self {
        Self {
            client,
            url: format!("{}/v5/market/orderbook", config.base_url.trim_end_matches('/')),
            symbol: pair.symbol_for(Venue::Bybit),
            limit: config.depth_limit,
        }
    }
}

#[async_trait::async_trait]
impl ExchangeAdapter for BybitAdapter {
    fn name(&self) -> &str {
        Venue::Bybit.display_name()
    }

    async fn fetch(&self) -> FetchResult<NormalizedSnapshot> {
        let query = [
            ("category", "spot".to_string()),
            ("symbol", self.symbol.clone()),
            ("limit", self.limit.to_string()),
        ];
        let book: OrderbookResponse = get_json(&self.client, &self.url, &query).await?;
        debug!("bybit {}: retCode {}", self.symbol, book.ret_code);
        book.into_snapshot()
    }
}
