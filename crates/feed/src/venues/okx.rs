//! OKX order book (`GET /api/v5/market/books`)

use serde::Deserialize;
use tracing::debug;

use bandbook_core::{
    parse_levels, FetchError, FetchResult, NormalizedSnapshot, PairConfig, Venue, VenueConfig,
};

use super::{get_json, ExchangeAdapter};

/// Envelope: `code` is `"0"` on success. A body without `code` is not an error.
#[derive(Debug, Deserialize)]
pub(crate) struct BooksResponse {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    msg: String,
    #[serde(default)]
    data: Vec<BookData>,
}

/// Levels are `[price, size, deprecated, order_count]`.
#[derive(Debug, Deserialize)]
struct BookData {
    bids: Vec<Vec<String>>,
    asks: Vec<Vec<String>>,
}

impl BooksResponse {
    fn into_snapshot(self) -> FetchResult<NormalizedSnapshot> {
        if let Some(code) = self.code.filter(|c| c != "0") {
            return Err(FetchError::Api {
                code,
                message: self.msg,
            });
        }
        let book = self
            .data
            .into_iter()
            .next()
            .ok_or_else(|| FetchError::Malformed("empty data array".into()))?;

        let bids = parse_levels(&book.bids)?;
        let asks = parse_levels(&book.asks)?;
        Ok(NormalizedSnapshot::from_levels(bids, asks)?)
    }
}

pub struct OkxAdapter {
    client: reqwest::Client,
    url: String,
    inst_id: String,
    depth: u32,
}

impl OkxAdapter {
    pub fn new(client: reqwest::Client, config: &VenueConfig, pair: &PairConfig) -> Self {
        Self {
            client,
            url: format!("{}/api/v5/market/books", config.base_url.trim_end_matches('/')),
            inst_id: pair.symbol_for(Venue::Okx),
            depth: config.depth_limit,
        }
    }
}

#[async_trait::async_trait]
impl ExchangeAdapter for OkxAdapter {
    fn name(&self) -> &str {
        Venue::Okx.display_name()
    }

    async fn fetch(&self) -> FetchResult<NormalizedSnapshot> {
        let query = [("instId", self.inst_id.clone()), ("sz", self.depth.to_string())];
        let books: BooksResponse = get_json(&self.client, &self.url, &query).await?;
        debug!("okx {}: code {:?}, {} books", self.inst_id, books.code, books.data.len());
        books.into_snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> FetchResult<NormalizedSnapshot> {
        serde_json::from_str::<BooksResponse>(body).unwrap().into_snapshot()
    }

    #[test]
    fn test_parse_books() {
        let snapshot = parse(
            r#"{"code": "0", "msg": "", "data": [{
                "asks": [["100.2", "3", "0", "2"], ["100.9", "1", "0", "1"]],
                "bids": [["99.8", "5", "0", "4"]],
                "ts": "1700000000000"}]}"#,
        )
        .unwrap();

        assert_eq!(snapshot.best_bid, 99.8);
        assert_eq!(snapshot.best_ask, 100.2);
        assert_eq!(snapshot.asks.len(), 2);
    }

    #[test]
    fn test_api_error_code() {
        let err = parse(r#"{"code": "51001", "msg": "Instrument ID does not exist", "data": []}"#)
            .unwrap_err();
        assert_eq!(
            err,
            FetchError::Api {
                code: "51001".into(),
                message: "Instrument ID does not exist".into()
            }
        );
    }

    #[test]
    fn test_missing_code_is_success() {
        let snapshot = parse(
            r#"{"data": [{"asks": [["100.2", "3", "0", "2"]], "bids": [["99.8", "5", "0", "4"]]}]}"#,
        )
        .unwrap();
        assert_eq!(snapshot.best_bid, 99.8);
        assert_eq!(snapshot.best_ask, 100.2);
    }

    #[test]
    fn test_missing_data_is_malformed() {
        let err = parse(r#"{"code": "0", "msg": "", "data": []}"#).unwrap_err();
        assert!(matches!(err, FetchError::Malformed(_)));
    }
}
