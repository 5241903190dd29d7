//! Outbound page fetch.
//!
//! Thin collaborator around reqwest: one GET with browser-like headers,
//! limited redirects, a hard timeout, and no retries — a failed fetch
//! is surfaced once and the caller decides whether to re-invoke.

use crate::config;
use crate::error::{LookupError, LookupResult};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use std::time::Duration;
use tracing::debug;

/// HTTP client for the source page.
#[derive(Clone)]
pub struct Fetcher {
    client: reqwest::Client,
}

impl Fetcher {
    pub fn new(timeout: Duration) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(config::ACCEPT));
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static(config::ACCEPT_LANGUAGE),
        );

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(config::USER_AGENT)
            .default_headers(headers)
            .build()
            .unwrap_or_default();

        Self { client }
    }

    /// GET the page body. Non-success statuses preserve the upstream
    /// code; transport failures carry no status.
    pub async fn fetch_page(&self, url: &str) -> LookupResult<String> {
        debug!(url, "fetching source page");

        let response = self.client.get(url).send().await.map_err(|e| {
            LookupError::Upstream {
                status: e.status().map(|s| s.as_u16()),
                message: e.to_string(),
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Upstream {
                status: Some(status.as_u16()),
                message: format!("source returned {status}"),
            });
        }

        let body = response.text().await.map_err(|e| LookupError::Upstream {
            status: None,
            message: format!("failed to read body: {e}"),
        })?;

        debug!(len = body.len(), "page fetched");
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    #[test]
    fn test_fetcher_creation() {
        let fetcher = Fetcher::new(Duration::from_secs(5));
        // Builder must not panic with the static header set.
        let _ = fetcher;
    }

    /// Serve one canned HTTP/1.1 response on a local port.
    async fn one_shot_server(response: &'static [u8]) -> std::net::SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = stream.read(&mut buf).await;
            let _ = stream.write_all(response).await;
            let _ = stream.shutdown().await;
        });
        addr
    }

    #[tokio::test]
    async fn test_upstream_503_status_preserved_through_fetch() {
        let addr = one_shot_server(
            b"HTTP/1.1 503 Service Unavailable\r\n\
              content-length: 0\r\nconnection: close\r\n\r\n",
        )
        .await;

        let fetcher = Fetcher::new(Duration::from_secs(5));
        let err = fetcher
            .fetch_page(&format!("http://{addr}/"))
            .await
            .expect_err("non-success status must be an error, not found=false");

        match err {
            LookupError::Upstream { status, .. } => assert_eq!(status, Some(503)),
            other => panic!("expected upstream error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_success_body_passes_through() {
        let addr = one_shot_server(
            b"HTTP/1.1 200 OK\r\ncontent-type: text/html\r\n\
              content-length: 13\r\nconnection: close\r\n\r\n<p>podium</p>",
        )
        .await;

        let fetcher = Fetcher::new(Duration::from_secs(5));
        let body = fetcher.fetch_page(&format!("http://{addr}/")).await.unwrap();
        assert_eq!(body, "<p>podium</p>");
    }

    #[tokio::test]
    async fn test_connection_refused_has_no_status() {
        // Bind then drop to get a port with nothing listening.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let fetcher = Fetcher::new(Duration::from_secs(5));
        let err = fetcher
            .fetch_page(&format!("http://{addr}/"))
            .await
            .expect_err("nothing is listening");

        match err {
            LookupError::Upstream { status, .. } => assert_eq!(status, None),
            other => panic!("expected upstream error, got {other:?}"),
        }
    }
}
