//! JSON catalog downloads with a single automatic retry

use crate::error::{CatalogKind, CreateError, Result};
use log::debug;
use serde::de::DeserializeOwned;
use url::Url;

/// Extra attempts after the first failed catalog download
pub const FETCH_RETRIES: u32 = 1;

/// Thin wrapper around a reqwest client that knows how to fetch catalogs
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: reqwest::Client,
}

impl CatalogClient {
    /// Create a new client with a custom user agent
    pub fn new(user_agent: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(user_agent)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    /// Fetch and decode a JSON document, retrying once on any failure
    pub async fn get_json<T: DeserializeOwned>(&self, url: &Url, catalog: CatalogKind) -> Result<T> {
        let mut attempt = 0;
        loop {
            match self.try_get_json(url).await {
                Ok(value) => return Ok(value),
                Err(reason) if attempt < FETCH_RETRIES => {
                    attempt += 1;
                    debug!("Fetching {} from {} failed ({}), retrying", catalog, url, reason);
                }
                Err(reason) => return Err(CreateError::catalog(catalog, reason)),
            }
        }
    }

    async fn try_get_json<T: DeserializeOwned>(&self, url: &Url) -> std::result::Result<T, String> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| format!("request to {} failed: {}", url, e))?;

        if !response.status().is_success() {
            return Err(format!("{} returned HTTP {}", url, response.status()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| format!("failed to read response from {}: {}", url, e))?;
        serde_json::from_str(&body).map_err(|e| format!("invalid JSON from {}: {}", url, e))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve the given canned responses in order, repeating the last one.
    /// Returns the base URL and a hit counter.
    pub(crate) async fn serve(responses: Vec<(u16, &'static str)>) -> (Url, Arc<AtomicUsize>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();

        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    break;
                };
                let n = counter.fetch_add(1, Ordering::SeqCst);
                let (status, body) = responses[n.min(responses.len() - 1)];

                let mut buf = vec![0u8; 4096];
                let _ = socket.read(&mut buf).await;

                let response = format!(
                    "HTTP/1.1 {} X\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        let url = Url::parse(&format!("http://{}/index.json", addr)).unwrap();
        (url, hits)
    }

    #[tokio::test]
    async fn test_get_json_success() {
        let (url, hits) = serve(vec![(200, r#"[1, 2, 3]"#)]).await;
        let client = CatalogClient::new("create-test");

        let values: Vec<u32> = client.get_json(&url, CatalogKind::Releases).await.unwrap();

        assert_eq!(values, vec![1, 2, 3]);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_get_json_retries_once_then_succeeds() {
        let (url, hits) = serve(vec![(503, ""), (200, r#"["ok"]"#)]).await;
        let client = CatalogClient::new("create-test");

        let values: Vec<String> = client.get_json(&url, CatalogKind::Templates).await.unwrap();

        assert_eq!(values, vec!["ok".to_string()]);
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_server_error_is_catalog_error_after_one_retry() {
        let (url, hits) = serve(vec![(500, "oops")]).await;
        let client = CatalogClient::new("create-test");

        let err = client
            .get_json::<Vec<String>>(&url, CatalogKind::Templates)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CreateError::CatalogFetch {
                catalog: CatalogKind::Templates,
                ..
            }
        ));
        assert!(err.to_string().contains("500"));
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_unparseable_payload_is_catalog_error() {
        let (url, _) = serve(vec![(200, "<html>not json</html>")]).await;
        let client = CatalogClient::new("create-test");

        let err = client
            .get_json::<Vec<String>>(&url, CatalogKind::Releases)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("invalid JSON"));
    }
}
