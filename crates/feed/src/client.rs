//! Telemetry endpoint client.
//!
//! Async HTTP client using `reqwest`; one GET per [`Client::fetch`].

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use reqwest::Url;
use tracing::debug;

use airwatch_protocol::{ApiResponse, decode_response};

use crate::error::FeedError;
use crate::source::TelemetrySource;

/// Client for one telemetry endpoint.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    url: Url,
}

impl Client {
    /// Creates a client for `url` with a per-request `timeout`.
    pub fn new(url: &str, timeout: Duration) -> Result<Self, FeedError> {
        let url = Url::parse(url).map_err(|e| FeedError::InvalidUrl(format!("{url}: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(FeedError::InvalidUrl(format!(
                "{url}: unsupported scheme {}",
                url.scheme()
            )));
        }

        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self { http, url })
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    /// Fetches and decodes the current readings.
    pub async fn fetch(&self) -> Result<ApiResponse, FeedError> {
        let resp = self.http.get(self.url.clone()).send().await?;
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(FeedError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp.bytes().await?;
        let response = decode_response(&body)?;
        debug!(
            url = %self.url,
            status = %response.status,
            readings = response.data.len(),
            "fetched telemetry"
        );
        Ok(response)
    }
}

impl TelemetrySource for Client {
    fn fetch(&self) -> Pin<Box<dyn Future<Output = Result<ApiResponse, FeedError>> + Send + '_>> {
        Box::pin(Client::fetch(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Starts a one-shot HTTP server answering with `status` and `body`.
    async fn mock_server(status: u16, body: &str) -> (String, tokio::task::JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let url = format!("http://127.0.0.1:{port}/ambil-data");
        let body = body.to_string();

        let handle = tokio::spawn(async move {
            if let Ok((mut stream, _)) = listener.accept().await {
                let mut buf = vec![0u8; 8192];
                let _ = stream.read(&mut buf).await;

                let resp = format!(
                    "HTTP/1.1 {status} Status\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    body.len(),
                    body
                );
                let _ = stream.write_all(resp.as_bytes()).await;
                let _ = stream.shutdown().await;
            }
        });

        (url, handle)
    }

    #[tokio::test]
    async fn fetch_decodes_readings() {
        let json = r#"{"status":"Sukses","data":[
            {"suhu":31.2,"kelembaban":"70","mq135_ppm":450.5,"mq2_ppm":null,"status_jalan":"BAIK","waktu":"Fri, 29 Nov 2024 00:10:05 GMT"}
        ]}"#;
        let (url, handle) = mock_server(200, json).await;

        let client = Client::new(&url, Duration::from_secs(5)).unwrap();
        let resp = client.fetch().await.unwrap();

        assert!(resp.is_success());
        let latest = resp.latest().unwrap();
        assert_eq!(latest.temperature, 31.2);
        assert_eq!(latest.humidity, 70.0);
        assert_eq!(latest.smoke_ppm, 0.0);

        handle.abort();
    }

    #[tokio::test]
    async fn fetch_reports_api_error() {
        let (url, handle) = mock_server(503, "maintenance").await;

        let client = Client::new(&url, Duration::from_secs(5)).unwrap();
        let err = client.fetch().await.unwrap_err();
        match err {
            FeedError::Api { status, ref body } => {
                assert_eq!(status, 503);
                assert_eq!(body, "maintenance");
            }
            other => panic!("expected Api error, got {other:?}"),
        }

        handle.abort();
    }

    #[tokio::test]
    async fn fetch_reports_malformed_json() {
        let (url, handle) = mock_server(200, "<html>oops</html>").await;

        let client = Client::new(&url, Duration::from_secs(5)).unwrap();
        let err = client.fetch().await.unwrap_err();
        assert!(matches!(err, FeedError::Protocol(_)), "got {err:?}");

        handle.abort();
    }

    #[tokio::test]
    async fn fetch_via_trait_object() {
        let (url, handle) = mock_server(200, r#"{"status":"Gagal","data":[]}"#).await;

        let source: Box<dyn TelemetrySource> =
            Box::new(Client::new(&url, Duration::from_secs(5)).unwrap());
        let resp = source.fetch().await.unwrap();
        assert_eq!(resp.status, "Gagal");
        assert!(!resp.is_success());

        handle.abort();
    }

    #[test]
    fn new_rejects_invalid_url() {
        let err = Client::new("not a url", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, FeedError::InvalidUrl(_)));

        let err = Client::new("ftp://example.com/data", Duration::from_secs(1)).unwrap_err();
        assert!(err.to_string().contains("unsupported scheme"));
    }

    #[test]
    fn new_keeps_url() {
        let client = Client::new("http://example.com/ambil-data", Duration::from_secs(1)).unwrap();
        assert_eq!(client.url(), "http://example.com/ambil-data");
    }
}
