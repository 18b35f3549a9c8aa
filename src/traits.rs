use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },
    #[error("Failed to read body of {url}: {reason}")]
    Body { url: String, reason: String },
}

#[async_trait]
pub trait PageSource: Send + Sync {
    /// Returns a short identifier for logging (e.g., "http", "memory").
    fn source_id(&self) -> &str;

    /// Fetches the page at `url` and returns the response body unchanged.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}
