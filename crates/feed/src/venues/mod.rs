//! REST order book adapters
//!
//! Each adapter fetches one venue's depth snapshot over HTTP, parses the
//! venue-specific body and hands back a [`NormalizedSnapshot`]. Every failure
//! mode (transport, status, API error, bad numbers, empty side) comes back as
//! a [`FetchError`]; nothing here retries.

pub mod binance;
pub mod bybit;
pub mod okx;

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde::de::DeserializeOwned;
use tracing::debug;

use bandbook_core::{AppConfig, FetchError, FetchResult, HttpConfig, NormalizedSnapshot, Venue};

pub use binance::BinanceAdapter;
pub use bybit::BybitAdapter;
pub use okx::OkxAdapter;

/// Source of one venue's order book snapshot
#[async_trait::async_trait]
pub trait ExchangeAdapter: Send + Sync {
    /// Name used in reports and diagnostics.
    fn name(&self) -> &str;

    async fn fetch(&self) -> FetchResult<NormalizedSnapshot>;
}

/// Shared HTTP client. The timeout here is the only deadline a fetch has.
pub fn http_client(config: &HttpConfig) -> anyhow::Result<reqwest::Client> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    let client = reqwest::Client::builder()
        .timeout(Duration::from_millis(config.timeout_ms))
        .user_agent(config.user_agent.clone())
        .default_headers(headers)
        .build()?;
    Ok(client)
}

/// One adapter per enabled venue, in config order.
pub fn build_adapters(config: &AppConfig, client: reqwest::Client) -> Vec<Arc<dyn ExchangeAdapter>> {
    config
        .enabled_venues()
        .map(|venue_config| -> Arc<dyn ExchangeAdapter> {
            match venue_config.venue {
                Venue::Binance => Arc::new(BinanceAdapter::new(client.clone(), venue_config, &config.pair)),
                Venue::Okx => Arc::new(OkxAdapter::new(client.clone(), venue_config, &config.pair)),
                Venue::Bybit => Arc::new(BybitAdapter::new(client.clone(), venue_config, &config.pair)),
            }
        })
        .collect()
}

fn map_transport_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Http(err.to_string())
    }
}

const MAX_ERROR_BODY: usize = 200;

/// GET `url` and decode the JSON body into `T`.
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
    query: &[(&str, String)],
) -> FetchResult<T> {
    debug!("GET {} {:?}", url, query);

    let response = client
        .get(url)
        .query(query)
        .send()
        .await
        .map_err(map_transport_error)?;

    let status = response.status();
    let body = response.text().await.map_err(map_transport_error)?;

    if !status.is_success() {
        let body = body.chars().take(MAX_ERROR_BODY).collect();
        return Err(FetchError::Status {
            status: status.as_u16(),
            body,
        });
    }

    serde_json::from_str(&body).map_err(|e| FetchError::Malformed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    #[derive(Debug, Deserialize)]
    struct Pong {
        ok: bool,
    }

    fn response(status: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        )
    }

    /// Answer a single request with `reply`, optionally after `stall`.
    async fn serve_once(reply: String, stall: Option<Duration>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            if let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = [0u8; 2048];
                let _ = socket.read(&mut buf).await;
                if let Some(stall) = stall {
                    tokio::time::sleep(stall).await;
                }
                let _ = socket.write_all(reply.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        format!("http://{}/book", addr)
    }

    fn local_client(timeout: Duration) -> reqwest::Client {
        reqwest::Client::builder()
            .timeout(timeout)
            .no_proxy()
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_get_json_decodes_success() {
        let url = serve_once(response("200 OK", r#"{"ok": true}"#), None).await;
        let client = local_client(Duration::from_secs(5));

        let pong: Pong = get_json(&client, &url, &[("symbol", "AAVEUSDT".into())])
            .await
            .unwrap();
        assert!(pong.ok);
    }

    #[tokio::test]
    async fn test_get_json_error_status_truncates_body() {
        let body = "x".repeat(300);
        let url = serve_once(response("503 Service Unavailable", &body), None).await;
        let client = local_client(Duration::from_secs(5));

        let err = get_json::<Pong>(&client, &url, &[]).await.unwrap_err();
        match err {
            FetchError::Status { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body.len(), MAX_ERROR_BODY);
            }
            other => panic!("expected Status, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_json_non_json_body_is_malformed() {
        let url = serve_once(response("200 OK", "<html>maintenance</html>"), None).await;
        let client = local_client(Duration::from_secs(5));

        let err = get_json::<Pong>(&client, &url, &[]).await.unwrap_err();
        assert!(matches!(err, FetchError::Malformed(_)));
    }

    #[tokio::test]
    async fn test_get_json_stalled_response_times_out() {
        let url = serve_once(
            response("200 OK", r#"{"ok": true}"#),
            Some(Duration::from_secs(2)),
        )
        .await;
        let client = local_client(Duration::from_millis(50));

        let err = get_json::<Pong>(&client, &url, &[]).await.unwrap_err();
        assert_eq!(err, FetchError::Timeout);
    }

    #[test]
    fn test_build_adapters_follows_enabled_venues() {
        let mut config = AppConfig::default();
        config.restrict_to(&[Venue::Okx, Venue::Binance]);

        let client = http_client(&config.http).unwrap();
        let adapters = build_adapters(&config, client);
        let names: Vec<&str> = adapters.iter().map(|a| a.name()).collect();
        assert_eq!(names, vec!["Binance", "OKX"]);
    }
}
