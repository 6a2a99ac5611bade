use log::error;
use tokio::task::JoinHandle;

use crate::error::{AppError, Result};
use crate::model::{Coin, ListingsResponse};

/// Generic message surfaced in the UI; the underlying cause only goes to
/// the log.
pub const FETCH_ERROR_MESSAGE: &str = "Error fetching cryptocurrency data";

/// Lifecycle of the single startup fetch. Loading is the initial state and
/// is left exactly once per attempt; there is no automatic retry.
#[derive(Debug)]
pub enum FetchState {
    Loading,
    Error(String),
    Ready(Vec<Coin>),
}

impl FetchState {
    /// Collapse a finished fetch task into its terminal state.
    pub fn from_outcome(
        outcome: std::result::Result<Result<Vec<Coin>>, tokio::task::JoinError>,
    ) -> Self {
        match outcome {
            Ok(Ok(coins)) => FetchState::Ready(coins),
            Ok(Err(err)) => {
                error!("Listings fetch failed: {}", err);
                FetchState::Error(FETCH_ERROR_MESSAGE.to_string())
            }
            Err(err) => {
                error!("Listings fetch task panicked or was aborted: {}", err);
                FetchState::Error(FETCH_ERROR_MESSAGE.to_string())
            }
        }
    }
}

/// One GET against the proxy, decoding `{ data: [...] }`.
pub async fn fetch_listings(proxy_url: &str) -> Result<Vec<Coin>> {
    let response = reqwest::get(proxy_url).await?;

    let status = response.status();
    if !status.is_success() {
        return Err(AppError::message(format!(
            "proxy responded with status {}",
            status
        )));
    }

    let listings: ListingsResponse = response.json().await?;
    Ok(listings.data)
}

/// Spawn the one-shot fetch so the UI can keep drawing while it runs. The
/// caller polls `is_finished` and applies the result once; if the UI is torn
/// down first the handle is simply dropped and the result discarded.
pub fn spawn_fetch(proxy_url: String) -> JoinHandle<Result<Vec<Coin>>> {
    tokio::spawn(async move { fetch_listings(&proxy_url).await })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    async fn spawn_proxy_stub(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    break;
                };
                let mut buf = [0u8; 4096];
                let _ = socket.read(&mut buf).await;
                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status_line,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        format!("http://{}/api", addr)
    }

    #[tokio::test]
    async fn decodes_coin_list_from_proxy() {
        let url = spawn_proxy_stub(
            "200 OK",
            r#"{"data":[{"id":1,"name":"Bitcoin","symbol":"BTC","cmc_rank":1,"quote":{"USD":{"price":50000.105,"percent_change_24h":2.345}}}]}"#,
        )
        .await;

        let coins = fetch_listings(&url).await.unwrap();
        assert_eq!(coins.len(), 1);
        assert_eq!(coins[0].name, "Bitcoin");
    }

    #[tokio::test]
    async fn proxy_error_status_is_an_error() {
        let url = spawn_proxy_stub(
            "500 Internal Server Error",
            r#"{"error":"Error fetching data from CoinMarketCap"}"#,
        )
        .await;

        let err = fetch_listings(&url).await.unwrap_err();
        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn failed_outcome_surfaces_generic_message() {
        let handle = spawn_fetch("http://127.0.0.1:1/api".to_string());
        let state = FetchState::from_outcome(handle.await);

        match state {
            FetchState::Error(message) => assert_eq!(message, FETCH_ERROR_MESSAGE),
            other => panic!("expected error state, got {:?}", other),
        }
    }
}
