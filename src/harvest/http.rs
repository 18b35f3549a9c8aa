//! `reqwest`-backed page source.

use async_trait::async_trait;
use tracing::debug;

use crate::traits::{FetchError, PageSource};

const DEFAULT_USER_AGENT: &str = concat!("catalog-harvester/", env!("CARGO_PKG_VERSION"));

/// Fetches pages over HTTP, one request at a time.
pub struct HttpSource {
    client: reqwest::Client,
}

impl HttpSource {
    /// Creates a source with the crate's default user agent.
    pub fn new() -> Result<Self, FetchError> {
        Self::with_user_agent(DEFAULT_USER_AGENT)
    }

    /// Creates a source sending `user_agent` with every request.
    pub fn with_user_agent(user_agent: &str) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|source| FetchError::Transport {
                url: String::new(),
                source,
            })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageSource for HttpSource {
    fn source_id(&self) -> &str {
        "http"
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        debug!(url, "GET");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| FetchError::Body {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serves one response with `body` on a local port and returns its URL.
    async fn serve_once(content_type: &'static str, body: &'static [u8]) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let head = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            );
            socket.write_all(head.as_bytes()).await.unwrap();
            socket.write_all(body).await.unwrap();
            socket.shutdown().await.unwrap();
        });
        format!("http://{addr}/projects/1")
    }

    #[tokio::test]
    async fn test_fetch_keeps_non_utf8_body() {
        let body: &'static [u8] = b"<p>caf\xe9</p>";
        let url = serve_once("text/html; charset=iso-8859-1", body).await;

        let source = HttpSource {
            client: reqwest::Client::builder().no_proxy().build().unwrap(),
        };
        let fetched = source.fetch(&url).await.unwrap();
        assert_eq!(fetched, body);
    }
}
